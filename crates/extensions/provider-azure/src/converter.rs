//! Message conversion for the Azure OpenAI API.

use revisor_protocols::provider::ChatRequest;
use revisor_protocols::types::Message;

use crate::api::{ApiMessage, ApiRequest};

/// Convert a protocol request to the API body.
pub fn convert_request(request: &ChatRequest) -> ApiRequest {
    ApiRequest {
        messages: convert_messages(&request.messages),
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

/// Convert protocol messages to API format.
pub fn convert_messages(messages: &[Message]) -> Vec<ApiMessage> {
    messages
        .iter()
        .map(|msg| ApiMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        })
        .collect()
}
