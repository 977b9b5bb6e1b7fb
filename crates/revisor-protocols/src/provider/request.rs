//! Chat request types.

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Request for a chat completion against one deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Deployment (model configuration) at the provider.
    pub deployment: String,

    /// Messages in the exchange.
    pub messages: Vec<Message>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for sampling (0.0 - 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(deployment: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            deployment: deployment.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Build the fixed two-message exchange: system instruction, then user text.
    pub fn instructed(
        deployment: impl Into<String>,
        instruction: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            deployment,
            vec![Message::system(instruction), Message::user(text)],
        )
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
