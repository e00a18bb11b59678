//! HTTP client for the remote chat endpoint.
//!
//! One exchange per submission: `POST` a JSON `{ "message": ... }` body and
//! read back `{ "response": ... }`. No retries and no timeouts.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::widget::ChatError;

/// Endpoint the widget talks to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/chat";

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Parsed success body from the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Reply text, or `None` when the body had no usable `response` field.
    pub response: Option<String>,
}

impl ChatReply {
    /// Interpret a JSON body.
    ///
    /// `null`, `false`, `0` and `""` count as missing. Other non-string values
    /// are kept as their JSON text.
    #[must_use]
    pub fn from_value(body: &Value) -> Self {
        let response = match body.get("response") {
            None | Some(Value::Null | Value::Bool(false)) => None,
            Some(Value::String(text)) => (!text.is_empty()).then(|| text.clone()),
            Some(Value::Number(n)) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
            Some(other) => Some(other.to_string()),
        };
        Self { response }
    }
}

/// Something that can carry one chat exchange.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<ChatReply, ChatError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        (**self).send(message).await
    }
}

/// [`ChatTransport`] over HTTP.
///
/// # Example
///
/// ```rust,no_run
/// use folio_chat::client::{ChatTransport, HttpChatClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpChatClient::new("http://localhost:5000/api/chat")?;
/// let reply = client.send("What projects have you built?").await?;
/// println!("{:?}", reply.response);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpChatClient {
    /// Create a client for the full endpoint URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, url::ParseError> {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a client with a custom reqwest client.
    pub fn with_client(
        endpoint: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        Ok(Self { endpoint, http })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        debug!(name: "chat.request.sending", endpoint = %self.endpoint, "Sending chat request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| ChatError::Connectivity {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        debug!(name: "chat.response.received", status = status.as_u16(), "Chat response received");
        if !status.is_success() {
            return Err(ChatError::ServerStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ChatError::Other(format!("failed to read response body: {e}")))?;
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| ChatError::Other(format!("invalid JSON in response: {e}")))?;

        Ok(ChatReply::from_value(&value))
    }
}
