//! Chatbot backend client.
//!
//! The widget exchanges exactly one request/response pair per submission with
//! a backend that speaks this contract:
//!
//! - `POST /api/chatbot` with `{"message": "<user text>"}`
//! - 2xx with `{"response": "<ai text>"}` or `{"error": "<error text>"}`
//!
//! [`ChatbotBackend`] is the seam the widget depends on;
//! [`HttpChatbotBackend`] is the reqwest implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use chat_widget::backend::{ChatbotBackend, ChatbotRequest, HttpChatbotBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = HttpChatbotBackend::new("http://127.0.0.1:5000")?;
//! let reply = backend.send(&ChatbotRequest::new("Hello!")).await?;
//! println!("{reply:?}");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Path of the chatbot endpoint, relative to the backend base URL.
pub const CHATBOT_PATH: &str = "/api/chatbot";

/// Outbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotRequest {
    pub message: String,
}

impl ChatbotRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a successful (2xx) backend response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatbotReply {
    /// Classify the reply.
    ///
    /// A non-empty `response` wins over `error`; a non-empty `error` becomes
    /// [`ExchangeError::Application`]; a body carrying neither yields `None`.
    pub fn into_outcome(self) -> Result<Option<String>, ExchangeError> {
        match (self.response, self.error) {
            (Some(text), _) if !text.is_empty() => Ok(Some(text)),
            (_, Some(message)) if !message.is_empty() => Err(ExchangeError::Application(message)),
            _ => Ok(None),
        }
    }
}

/// Failure of a single exchange.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The request could not be sent or its body could not be read/decoded.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Http(StatusCode),

    /// The backend answered 2xx with an `error` field.
    #[error("server error: {0}")]
    Application(String),
}

/// Something that answers chatbot requests.
#[async_trait]
pub trait ChatbotBackend: Send + Sync {
    /// Exchange one message.
    ///
    /// `Ok(Some(text))` is an answer, `Ok(None)` a reply with nothing to show.
    async fn send(&self, request: &ChatbotRequest) -> Result<Option<String>, ExchangeError>;
}

/// HTTP implementation of [`ChatbotBackend`].
#[derive(Debug, Clone)]
pub struct HttpChatbotBackend {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpChatbotBackend {
    /// Create a backend client for the server at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend client with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(base_url.as_ref())?.join(CHATBOT_PATH)?;
        Ok(Self { endpoint, http })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatbotBackend for HttpChatbotBackend {
    async fn send(&self, request: &ChatbotRequest) -> Result<Option<String>, ExchangeError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExchangeError::Http(status));
        }

        let reply: ChatbotReply = response.json().await?;
        debug!(
            name: "backend.reply.received",
            status = status.as_u16(),
            has_response = reply.response.is_some(),
            has_error = reply.error.is_some(),
            "Chatbot reply received"
        );
        reply.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let json = serde_json::to_string(&ChatbotRequest::new("hello")).unwrap();
        assert_eq!(json, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_reply_with_response() {
        let reply: ChatbotReply = serde_json::from_str(r#"{"response":"Hi there"}"#).unwrap();
        assert_eq!(reply.into_outcome().unwrap(), Some("Hi there".to_string()));
    }

    #[test]
    fn test_reply_with_error() {
        let reply: ChatbotReply = serde_json::from_str(r#"{"error":"bad input"}"#).unwrap();
        match reply.into_outcome() {
            Err(ExchangeError::Application(message)) => assert_eq!(message, "bad input"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_reply_prefers_response() {
        let reply = ChatbotReply {
            response: Some("answer".to_string()),
            error: Some("ignored".to_string()),
        };
        assert_eq!(reply.into_outcome().unwrap(), Some("answer".to_string()));
    }

    #[test]
    fn test_empty_fields_are_nothing() {
        let reply: ChatbotReply = serde_json::from_str(r#"{"response":"","error":""}"#).unwrap();
        assert_eq!(reply.into_outcome().unwrap(), None);

        let reply: ChatbotReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.into_outcome().unwrap(), None);
    }

    #[test]
    fn test_endpoint_join() {
        let backend = HttpChatbotBackend::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            backend.endpoint().as_str(),
            "http://127.0.0.1:5000/api/chatbot"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpChatbotBackend::new("not a url").is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ExchangeError::Http(StatusCode::BAD_GATEWAY).to_string(),
            "HTTP error! status: 502 Bad Gateway"
        );
        assert_eq!(
            ExchangeError::Application("x".to_string()).to_string(),
            "server error: x"
        );
    }
}
