//! Model reply unwrapping.
//!
//! Chat models asked for JSON often wrap it: in quotes, in a fenced code
//! block, or both. [`unwrap_reply`] peels at most one layer of each kind,
//! by prefix/suffix matching only, and parses what is left.

use serde_json::Value;

use crate::error::ApiError;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";
const QUOTES: [char; 2] = ['"', '\''];

/// Normalize reply content by JSON type.
///
/// Only string content is unwrapped and parsed. Anything else, including
/// `null` from an empty completion, is passed through untouched.
pub fn normalize_reply(content: Value) -> Result<Value, ApiError> {
    match content {
        Value::String(text) => unwrap_reply(&text),
        other => Ok(other),
    }
}

/// Strip quote and fence wrappers from `raw` and parse the rest as JSON.
pub fn unwrap_reply(raw: &str) -> Result<Value, ApiError> {
    let trimmed = raw.trim();
    let (text, unquoted) = strip_quotes(trimmed);
    let (text, opened) = strip_opening_fence(text);
    let (text, closed) = match text.strip_suffix(FENCE) {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    let text = text.trim();

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        // A reply that is itself a JSON string literal keeps its string value.
        Err(_) if unquoted && !opened && !closed => {
            string_literal(trimmed).ok_or_else(|| ApiError::ContentFormat {
                raw: text.to_string(),
            })
        }
        Err(_) => Err(ApiError::ContentFormat {
            raw: text.to_string(),
        }),
    }
}

/// Remove one matching pair of quotes around `text`.
fn strip_quotes(text: &str) -> (&str, bool) {
    for quote in QUOTES {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return (&text[1..text.len() - 1], true);
        }
    }
    (text, false)
}

/// Remove a leading fence, with its `json` tag when present.
fn strip_opening_fence(text: &str) -> (&str, bool) {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return (text, false);
    };
    match rest.get(..JSON_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => (&rest[JSON_TAG.len()..], true),
        _ => (rest, true),
    }
}

/// `quoted` decoded as a JSON string literal, escapes included.
fn string_literal(quoted: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(quoted) {
        Ok(value @ Value::String(_)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
#[path = "unwrapper_tests.rs"]
mod tests;
