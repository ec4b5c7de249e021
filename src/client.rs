//! HTTP client for the ArkTS language server.
//!
//! Each query is a single POST with a JSON body. The reply is classified into
//! an [`OutcomeRecord`]: transport errors, non-success statuses and
//! unparseable bodies are failures, everything else is a success, including
//! empty or oddly shaped results.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::outcome::OutcomeRecord;
use crate::protocol::{
    DefinitionRequest, Locations, Position, ReferencesRequest, SignatureReply, SignatureRequest,
};

/// The three queries the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Definition,
    References,
    Signature,
}

impl QueryKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Definition => "/definition",
            Self::References => "/references",
            Self::Signature => "/signature",
        }
    }

    /// Key used in the `all` report.
    pub fn name(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::References => "references",
            Self::Signature => "signature",
        }
    }
}

/// Results of running every query against one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunAllReport {
    pub definition: OutcomeRecord<Locations>,
    pub references: OutcomeRecord<Locations>,
    pub signature: OutcomeRecord<SignatureReply>,
}

impl RunAllReport {
    /// `(query, succeeded)` in execution order.
    pub fn entries(&self) -> [(QueryKind, bool); 3] {
        [
            (QueryKind::Definition, self.definition.is_success()),
            (QueryKind::References, self.references.is_success()),
            (QueryKind::Signature, self.signature.is_success()),
        ]
    }

    pub fn success_count(&self) -> usize {
        self.entries().iter().filter(|(_, ok)| *ok).count()
    }

    pub fn total(&self) -> usize {
        self.entries().len()
    }
}

pub struct RequestClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RequestClient {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("arkts-lsp-tester/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn find_definition(
        &self,
        file_path: &str,
        line: u32,
        character: u32,
    ) -> OutcomeRecord<Locations> {
        let req = DefinitionRequest::new(Position::for_file(file_path, line, character));
        self.send_request(QueryKind::Definition, &req)
            .await
            .map_data(Locations::from_value)
    }

    pub async fn find_references(
        &self,
        file_path: &str,
        line: u32,
        character: u32,
        include_declaration: bool,
    ) -> OutcomeRecord<Locations> {
        let req = ReferencesRequest::new(Position::for_file(file_path, line, character))
            .include_declaration(include_declaration);
        self.send_request(QueryKind::References, &req)
            .await
            .map_data(Locations::from_value)
    }

    pub async fn signature_help(
        &self,
        file_path: &str,
        line: u32,
        character: u32,
    ) -> OutcomeRecord<SignatureReply> {
        let req = SignatureRequest::new(Position::for_file(file_path, line, character));
        self.send_request(QueryKind::Signature, &req)
            .await
            .map_data(SignatureReply::from_value)
    }

    /// Runs definition, references (declarations included) and signature
    /// help in that order. A failure never skips the remaining queries.
    pub async fn run_all(&self, file_path: &str, line: u32, character: u32) -> RunAllReport {
        let definition = self.find_definition(file_path, line, character).await;
        let references = self
            .find_references(file_path, line, character, true)
            .await;
        let signature = self.signature_help(file_path, line, character).await;

        RunAllReport {
            definition,
            references,
            signature,
        }
    }

    async fn send_request<B: Serialize>(&self, kind: QueryKind, body: &B) -> OutcomeRecord<Value> {
        let url = self.config.endpoint(kind.endpoint());
        log::debug!("POST {}", url);

        let response = match self.http.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(kind, e, None),
        };

        let status = response.status();
        if let Err(e) = response.error_for_status_ref() {
            return transport_failure(kind, e, Some(status.as_u16()));
        }

        match response.json::<Value>().await {
            Ok(value) => {
                log::debug!("{} answered {}", kind.name(), status);
                OutcomeRecord::succeeded(value, status.as_u16())
            }
            Err(e) => transport_failure(kind, e, None),
        }
    }
}

fn transport_failure(
    kind: QueryKind,
    err: reqwest::Error,
    status_code: Option<u16>,
) -> OutcomeRecord<Value> {
    // `{:#}` renders the whole source chain, e.g. "... Connection refused".
    let message = format!("{:#}", anyhow::Error::from(err));
    log::warn!("{} request failed: {}", kind.name(), message);
    OutcomeRecord::failed(message, status_code)
}
