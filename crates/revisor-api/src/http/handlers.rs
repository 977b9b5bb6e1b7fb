//! Request handlers.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// Largest accepted `POST /revisor` body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Version reported by `GET /version`.
pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// `GET /version`. No authentication.
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: SERVICE_VERSION.to_string(),
    })
}

/// `POST /revisor`.
///
/// The body is streamed in only after the token check, so a bad token is
/// answered with 401 whatever the body's size or shape.
pub async fn review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<Value>, ApiError> {
    state.gate.authorize(&headers)?;

    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        ApiError::Validation(format!("Corpo da requisição inválido: {e}"))
    })?;
    let admission = state.gate.admit_body(&headers, &body)?;
    let value = state
        .reviewer
        .review(&admission.deployment, &admission.text)
        .await?;
    Ok(Json(value))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
