//! In-process chat provider for handler and reviewer tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use revisor_protocols::error::ProviderError;
use revisor_protocols::provider::{ChatProvider, ChatReply, ChatRequest};
use revisor_protocols::types::Usage;

enum Scripted {
    Content(Value),
    Failure { status: u16, message: String },
}

/// Provider that answers every call with a scripted outcome and records
/// what it was asked.
pub struct StubProvider {
    outcome: Scripted,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Self {
        Self::with_content(Value::String(text.to_string()))
    }

    pub fn with_content(content: Value) -> Self {
        Self::scripted(Scripted::Content(content))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::scripted(Scripted::Failure {
            status,
            message: message.to_string(),
        })
    }

    fn scripted(outcome: Scripted) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn id(&self) -> &str {
        "stub"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        match &self.outcome {
            Scripted::Content(content) => Ok(ChatReply {
                content: content.clone(),
                finish_reason: Some("stop".to_string()),
                usage: Usage::default(),
            }),
            Scripted::Failure { status, message } => Err(ProviderError::ApiError {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
