//! Chat provider trait definition.

use async_trait::async_trait;

use super::{ChatReply, ChatRequest};
use crate::error::ProviderError;

/// Core trait for chat-completion providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Run one chat completion and return the first choice.
    async fn complete(&self, request: ChatRequest) -> Result<ChatReply, ProviderError>;
}
