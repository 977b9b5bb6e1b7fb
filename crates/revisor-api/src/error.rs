//! API error types.
//!
//! Every failure of a review request ends up here and leaves the service as
//! `{"detail": "<message>"}` with the status from [`ApiError::status_code`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use revisor_protocols::error::ProviderError;

/// Detail for a missing or empty `texto` field.
pub const TEXT_REQUIRED: &str = "Campo 'texto' é obrigatório";

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Shared secret missing or wrong.
    #[error("Token inválido")]
    Authentication,

    /// Request body rejected.
    #[error("{0}")]
    Validation(String),

    /// No deployment from the request nor from configuration.
    #[error("Deployment não configurado.")]
    Configuration,

    /// The model reply is not JSON after unwrapping.
    #[error("Resposta do assistente não é JSON válido. Resposta recebida: {raw:?}")]
    ContentFormat { raw: String },

    /// The chat provider failed.
    #[error("{0}")]
    Upstream(#[from] ProviderError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Authentication => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration
            | ApiError::ContentFormat { .. }
            | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Authentication => "authentication",
            ApiError::Validation(_) => "validation",
            ApiError::Configuration => "configuration",
            ApiError::ContentFormat { .. } => "content_format",
            ApiError::Upstream(_) => "upstream",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(kind = self.kind(), error = ?self, "Review request failed: {}", detail);
        } else {
            warn!(kind = self.kind(), "Review request rejected: {}", detail);
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
