//! Client configuration for the ArkTS LSP tester.
//!
//! The base URL is configured once and shared by every request. The timeout
//! is explicit: `None` leaves the transport without a client-side limit.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the language server HTTP binding, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Per-request timeout covering connect, send and body read
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Maps a CLI seconds value to a timeout; zero disables it.
    pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    /// Full URL for an endpoint path such as `/definition`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.strip_suffix('/').unwrap_or(&self.base_url);
        format!("{}{}", base, path)
    }
}
