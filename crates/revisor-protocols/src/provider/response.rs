//! Chat reply types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Usage;

/// The first choice of a chat completion.
///
/// `content` is kept as a raw JSON value: providers normally send a string,
/// but an empty completion arrives as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    #[serde(default)]
    pub usage: Usage,
}
