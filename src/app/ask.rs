//! An `/ask` in flight.
//!
//! `Interpreter::submit` hands back a `PendingAsk` instead of awaiting the
//! backend itself, so the caller decides where the future runs. The busy
//! guard travels with the task and then with its outcome; input stays
//! gated until the outcome is applied or dropped.

use super::busy::BusyGuard;
use crate::services::ai::{AiError, AiQueryResult, CompletionBackend, CompletionRequest};
use crate::services::time_source::SharedTimeSource;
use std::time::Duration;

#[derive(Debug)]
pub struct PendingAsk {
    question: String,
    request: CompletionRequest,
    guard: BusyGuard,
    time: SharedTimeSource,
}

impl PendingAsk {
    pub(crate) fn new(
        question: String,
        request: CompletionRequest,
        guard: BusyGuard,
        time: SharedTimeSource,
    ) -> Self {
        Self {
            question,
            request,
            guard,
            time,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// The exact request that will be sent.
    pub fn request(&self) -> &CompletionRequest {
        &self.request
    }

    /// Send the question and parse the reply.
    pub async fn run(self, backend: &dyn CompletionBackend) -> AskOutcome {
        let Self {
            question,
            request,
            guard,
            time,
        } = self;

        let started = time.now();
        let reply = backend.complete(request).await;
        let elapsed = time.elapsed_since(started);

        let result = match reply {
            Ok(raw) => {
                let parsed = AiQueryResult::parse(&raw);
                tracing::info!(
                    "AI answered in {:?} (confidence {}, {} sources)",
                    elapsed,
                    parsed.confidence.label(),
                    parsed.sources_used.len()
                );
                Ok(parsed)
            }
            Err(e) => {
                tracing::warn!("AI query failed after {:?}: {}", elapsed, e);
                Err(e)
            }
        };

        AskOutcome {
            question,
            result,
            elapsed,
            guard,
        }
    }
}

/// A finished query, ready for `Interpreter::finish_ask`.
#[derive(Debug)]
pub struct AskOutcome {
    pub question: String,
    pub result: Result<AiQueryResult, AiError>,
    pub elapsed: Duration,
    guard: BusyGuard,
}

impl AskOutcome {
    /// Scrollback lines for the outcome, without the trailing blank.
    /// A failure is always exactly one line.
    pub fn render(&self) -> Vec<String> {
        match &self.result {
            Ok(answer) => answer.render(),
            Err(e) => vec![e.user_message()],
        }
    }

    /// Release the busy flag, keeping the result.
    pub(crate) fn into_parts(self) -> (String, Result<AiQueryResult, AiError>) {
        let Self {
            question,
            result,
            guard,
            ..
        } = self;
        drop(guard);
        (question, result)
    }
}
