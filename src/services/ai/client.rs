//! HTTP client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! `ureq` is blocking, so each call runs on tokio's blocking pool and the
//! runtime stays free to redraw while a question is outstanding.

use super::{AiError, ChatMessage, CompletionBackend, CompletionRequest};
use crate::config::AiConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone)]
pub struct OpenAiClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Build a client from config; the key is read from the environment now.
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.model,
            config.api_key(),
            config.timeout(),
        )
        .with_sampling(config.temperature, config.max_tokens)
    }

    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
            api_key,
            temperature: 0.3,
            max_tokens: 800,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform the request on the current thread.
    pub fn complete_blocking(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("No API key configured for {}", self.endpoint);
            return Err(AiError::Unauthorized);
        };

        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        let body = serde_json::to_string(&body)
            .map_err(|e| AiError::InvalidResponse(format!("failed to encode request: {}", e)))?;

        tracing::debug!(
            "POST {} (model {}, {} messages)",
            self.endpoint,
            self.model,
            request.messages.len()
        );

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", api_key))
            .set("Content-Type", "application/json")
            .send_string(&body);

        match response {
            Ok(response) => {
                let text = response
                    .into_string()
                    .map_err(|e| AiError::Transport(e.to_string()))?;
                extract_content(&text)
            }
            Err(ureq::Error::Status(code, response)) => {
                let text = response.into_string().unwrap_or_default();
                Err(AiError::from_status(code, error_message(&text)))
            }
            Err(ureq::Error::Transport(transport)) => Err(AiError::Transport(transport.to_string())),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.complete_blocking(&request))
            .await
            .map_err(|e| AiError::Transport(format!("completion task failed: {}", e)))?
    }
}

/// Pull the first choice's text out of a completion envelope.
///
/// A choice with no content yields an empty string, which the answer
/// parser turns into an empty low-confidence answer.
fn extract_content(body: &str) -> Result<String, AiError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| AiError::InvalidResponse(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiError::InvalidResponse("response contained no choices".to_string()))?;

    Ok(choice.message.content.unwrap_or_default())
}

/// Best-effort human message from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = OpenAiClient::new("https://example.test/v1/", "m", None, Duration::from_secs(1));
        assert_eq!(client.endpoint(), "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_missing_key_is_unauthorized_without_network() {
        let client = OpenAiClient::new("http://127.0.0.1:9", "m", None, Duration::from_secs(1));
        let request = CompletionRequest {
            messages: vec![ChatMessage::user("hi")],
        };
        assert_eq!(client.complete_blocking(&request), Err(AiError::Unauthorized));
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"answer\":\"x\"}"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), r#"{"answer":"x"}"#);

        let no_content = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        assert_eq!(extract_content(no_content).unwrap(), "");

        assert!(matches!(
            extract_content(r#"{"choices":[]}"#),
            Err(AiError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_content("<html>"),
            Err(AiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        assert_eq!(
            error_message(r#"{"error":{"message":"model not found","code":404}}"#),
            "model not found"
        );
        assert_eq!(error_message(" upstream down \n"), "upstream down");
    }
}
