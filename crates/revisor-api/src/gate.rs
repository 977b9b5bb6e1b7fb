//! Request gate.
//!
//! Admits a review request in three steps, each failing with its own
//! [`ApiError`]: shared-secret check, `texto` extraction, deployment
//! resolution. The secret is checked before the body is read.

use axum::http::HeaderMap;
use serde_json::Value;
use tracing::debug;

use revisor_config::Config;

use crate::error::{ApiError, TEXT_REQUIRED};

/// Header carrying the shared secret.
pub const TOKEN_HEADER: &str = "token_id";
/// Header carrying the deployment override.
pub const DEPLOYMENT_HEADER: &str = "assistant_id";

// Hyphenated spellings sent by clients of the previous service.
const TOKEN_HEADER_ALIAS: &str = "token-id";
const DEPLOYMENT_HEADER_ALIAS: &str = "assistant-id";

/// Body field holding the text to review.
pub const TEXT_FIELD: &str = "texto";

/// A request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub text: String,
    pub deployment: String,
}

/// Validates inbound review requests against immutable settings.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    token: Option<String>,
    default_deployment: Option<String>,
}

impl RequestGate {
    pub fn new(token: Option<String>, default_deployment: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            default_deployment: default_deployment.filter(|d| !d.is_empty()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.auth.token_id.clone(),
            config.azure.deployment.clone(),
        )
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn default_deployment(&self) -> Option<&str> {
        self.default_deployment.as_deref()
    }

    /// Run all checks in order.
    pub fn admit(&self, headers: &HeaderMap, body: &[u8]) -> Result<Admission, ApiError> {
        self.authorize(headers)?;
        self.admit_body(headers, body)
    }

    /// Shared-secret check on the request headers alone.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        self.authenticate(header_value(headers, &[TOKEN_HEADER, TOKEN_HEADER_ALIAS]))
    }

    /// Body and deployment checks for a request that passed [`Self::authorize`].
    pub fn admit_body(&self, headers: &HeaderMap, body: &[u8]) -> Result<Admission, ApiError> {
        let text = extract_text(body)?;
        let deployment =
            self.resolve_deployment(header_value(headers, &[DEPLOYMENT_HEADER, DEPLOYMENT_HEADER_ALIAS]))?;

        debug!(deployment = %deployment, chars = text.chars().count(), "Request admitted");
        Ok(Admission { text, deployment })
    }

    /// Compare the presented secret with the configured one. With no
    /// configured secret nothing is accepted.
    pub fn authenticate(&self, presented: Option<&str>) -> Result<(), ApiError> {
        match (self.token.as_deref(), presented) {
            (Some(expected), Some(given)) if expected == given => Ok(()),
            _ => Err(ApiError::Authentication),
        }
    }

    /// Override if present and non-empty, else the configured default.
    pub fn resolve_deployment(&self, requested: Option<&str>) -> Result<String, ApiError> {
        requested
            .filter(|d| !d.is_empty())
            .or(self.default_deployment.as_deref())
            .map(str::to_string)
            .ok_or(ApiError::Configuration)
    }
}

/// Pull a non-empty string `texto` out of a JSON object body.
pub fn extract_text(body: &[u8]) -> Result<String, ApiError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Corpo da requisição inválido: {e}")))?;

    let Value::Object(mut fields) = payload else {
        return Err(ApiError::Validation(
            "Corpo da requisição deve ser um objeto JSON".to_string(),
        ));
    };

    match fields.remove(TEXT_FIELD) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        _ => Err(ApiError::Validation(TEXT_REQUIRED.to_string())),
    }
}

fn header_value<'a>(headers: &'a HeaderMap, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
