//! Stand-ins for the completion service.

use async_trait::async_trait;
use folio::services::ai::{AiError, CompletionBackend, CompletionRequest};
use std::sync::Mutex;

/// Replies with a fixed result and records every request it sees.
pub struct ScriptedBackend {
    reply: Result<String, AiError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    pub fn replying(raw: &str) -> Self {
        Self {
            reply: Ok(raw.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: AiError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}

/// Panics mid-request.
pub struct PanickingBackend;

#[async_trait]
impl CompletionBackend for PanickingBackend {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, AiError> {
        panic!("backend exploded");
    }
}
