use serde::Serialize;

/// Uniform result of one request to the language server.
///
/// Every client operation returns one of these instead of an error, so
/// callers handle success and failure the same way for all three queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> OutcomeRecord<T> {
    pub fn succeeded(data: T, status_code: u16) -> Self {
        Self {
            success: true,
            data: Some(data),
            status_code: Some(status_code),
            error: None,
        }
    }

    /// `status_code` is set only when the server answered with a
    /// non-success status; transport failures have none.
    pub fn failed(error: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            success: false,
            data: None,
            status_code,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn map_data<U>(self, f: impl FnOnce(T) -> U) -> OutcomeRecord<U> {
        OutcomeRecord {
            success: self.success,
            data: self.data.map(f),
            status_code: self.status_code,
            error: self.error,
        }
    }
}
