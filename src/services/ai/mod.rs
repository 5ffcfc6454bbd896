//! The `/ask` collaborator: an OpenAI-compatible chat-completion endpoint.
//!
//! The interpreter only sees `CompletionBackend`, an opaque async
//! request/response function. `client::OpenAiClient` is the HTTP
//! implementation; tests substitute their own.

pub mod client;
pub mod prompt;
pub mod response;

use async_trait::async_trait;
use serde::Serialize;

pub use client::OpenAiClient;
pub use prompt::Exchange;
pub use response::{AiQueryResult, Confidence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Everything one `/ask` sends upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
}

/// Opaque completion service. Returns the model's raw text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError>;
}

/// Why a completion call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    /// HTTP 401, or no credential configured at all
    Unauthorized,
    /// HTTP 429
    RateLimited,
    /// HTTP 400
    BadRequest(String),
    /// Any other non-success status
    Status { code: u16, message: String },
    /// Connection, TLS, or timeout failure
    Transport(String),
    /// A 2xx response whose envelope could not be read
    InvalidResponse(String),
}

impl AiError {
    pub fn from_status(code: u16, message: String) -> Self {
        match code {
            400 => AiError::BadRequest(message),
            401 => AiError::Unauthorized,
            429 => AiError::RateLimited,
            _ => AiError::Status { code, message },
        }
    }

    /// The single scrollback line shown for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AiError::Unauthorized => {
                "Error: Authentication failed. Check the API key configuration.".to_string()
            }
            AiError::RateLimited => {
                "Error: Rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            AiError::BadRequest(_) => "Error: Invalid request parameters.".to_string(),
            AiError::Status { message, .. }
            | AiError::Transport(message)
            | AiError::InvalidResponse(message) => {
                if message.trim().is_empty() {
                    "Error: Failed to get AI response.".to_string()
                } else {
                    format!("Error: Failed to get AI response: {}", message.trim())
                }
            }
        }
    }
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::Unauthorized => write!(f, "unauthorized"),
            AiError::RateLimited => write!(f, "rate limited"),
            AiError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            AiError::Status { code, message } => write!(f, "HTTP {code}: {message}"),
            AiError::Transport(msg) => write!(f, "transport error: {msg}"),
            AiError::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(AiError::from_status(401, String::new()), AiError::Unauthorized);
        assert_eq!(AiError::from_status(429, String::new()), AiError::RateLimited);
        assert!(matches!(
            AiError::from_status(400, "bad".into()),
            AiError::BadRequest(_)
        ));
        assert!(matches!(
            AiError::from_status(503, "down".into()),
            AiError::Status { code: 503, .. }
        ));
    }

    #[test]
    fn test_user_messages() {
        assert!(AiError::Unauthorized.user_message().contains("Authentication failed"));
        assert!(AiError::RateLimited.user_message().contains("Rate limit"));
        assert!(AiError::BadRequest("x".into())
            .user_message()
            .contains("Invalid request parameters"));
        assert_eq!(
            AiError::Transport("connection refused".into()).user_message(),
            "Error: Failed to get AI response: connection refused"
        );
        assert_eq!(
            AiError::Status {
                code: 500,
                message: "  ".into()
            }
            .user_message(),
            "Error: Failed to get AI response."
        );
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
