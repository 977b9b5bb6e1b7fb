//! Response parsing for the Azure OpenAI API.

use revisor_protocols::error::ProviderError;
use revisor_protocols::provider::ChatReply;
use revisor_protocols::types::Usage;

use crate::api::{ApiErrorBody, ApiResponse};

/// Take the first choice of a completion.
pub fn parse_response(response: ApiResponse) -> Result<ChatReply, ProviderError> {
    let usage = response
        .usage
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    Ok(ChatReply {
        content: choice.message.content,
        finish_reason: choice.finish_reason,
        usage,
    })
}

/// Build an error from a non-2xx response body.
pub fn parse_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());
    ProviderError::ApiError { status, message }
}
