//! # QuickBill HTTP Client
//!
//! Wrapper around the QuickBill REST API for the registration wizard.

use quickbill_core::{Envelope, RegistrationPayload, SubmitFailure, primitives::REGISTER_PATH};
use serde_json::Value;

/// Default server URL when neither flag nor environment sets one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Errors from the HTTP client layer.
#[derive(Debug)]
pub enum ClientError {
    /// Cannot reach the QuickBill server.
    ConnectionFailed(String),
    /// The response body was not the expected JSON.
    ParseError(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "Cannot connect to QuickBill at {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for SubmitFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ConnectionFailed(msg) => SubmitFailure::Transport(msg),
            ClientError::ParseError(msg) => SubmitFailure::Parse(msg),
        }
    }
}

/// HTTP client that wraps calls to the QuickBill REST API.
#[derive(Debug, Clone)]
pub struct QuickbillClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuickbillClient {
    /// Create a new client pointing at the given server URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, &url)
    }

    /// Send a request and handle connection errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        req.send()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))
    }

    /// Read the body as an envelope, whatever the status code.
    async fn handle_envelope(&self, resp: reqwest::Response) -> Result<Envelope, ClientError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;
        tracing::debug!(status = status.as_u16(), "Registration response received");

        serde_json::from_str::<Envelope>(&body)
            .map_err(|e| ClientError::ParseError(format!("status {}: {e}", status.as_u16())))
    }

    /// GET /health
    pub async fn health(&self) -> Result<Value, ClientError> {
        let req = self.request(reqwest::Method::GET, "/health");
        let resp = self.send(req).await?;
        resp.json::<Value>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }

    /// POST /auth/register
    pub async fn register(&self, payload: &RegistrationPayload) -> Result<Envelope, ClientError> {
        let req = self
            .request(reqwest::Method::POST, REGISTER_PATH)
            .json(payload);
        let resp = self.send(req).await?;
        self.handle_envelope(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = QuickbillClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn client_errors_map_to_submit_failures() {
        let transport: SubmitFailure = ClientError::ConnectionFailed("down".into()).into();
        let parse: SubmitFailure = ClientError::ParseError("eof".into()).into();
        assert_eq!(transport, SubmitFailure::Transport("down".into()));
        assert_eq!(parse, SubmitFailure::Parse("eof".into()));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connection_failure() {
        // Port 9 (discard) is not expected to run an HTTP server.
        let client = QuickbillClient::new("http://127.0.0.1:9");
        let err = client.health().await;
        assert!(matches!(err, Err(ClientError::ConnectionFailed(_))));
    }
}
