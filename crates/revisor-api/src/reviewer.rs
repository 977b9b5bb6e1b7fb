//! Review execution: one chat completion per request.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use revisor_config::ReviewerConfig;
use revisor_protocols::provider::{ChatProvider, ChatRequest};

use crate::error::ApiError;
use crate::unwrapper::normalize_reply;

/// Sends the fixed instruction plus the caller's text to a provider and
/// normalizes what comes back.
pub struct Reviewer {
    provider: Arc<dyn ChatProvider>,
    system_prompt: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl Reviewer {
    pub fn new(provider: Arc<dyn ChatProvider>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn from_config(provider: Arc<dyn ChatProvider>, config: &ReviewerConfig) -> Self {
        Self {
            provider,
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn build_request(&self, deployment: &str, text: &str) -> ChatRequest {
        let mut request = ChatRequest::instructed(deployment, self.system_prompt.as_str(), text);
        request.max_tokens = self.max_tokens;
        request.temperature = self.temperature;
        request
    }

    /// Run one review against `deployment`.
    pub async fn review(&self, deployment: &str, text: &str) -> Result<Value, ApiError> {
        info!(
            provider = self.provider.id(),
            deployment = %deployment,
            chars = text.chars().count(),
            "Submitting review"
        );

        let reply = self
            .provider
            .complete(self.build_request(deployment, text))
            .await?;

        debug!(
            finish_reason = reply.finish_reason.as_deref().unwrap_or("unknown"),
            prompt_tokens = reply.usage.prompt_tokens,
            completion_tokens = reply.usage.completion_tokens,
            "Review reply received"
        );

        normalize_reply(reply.content)
    }
}
