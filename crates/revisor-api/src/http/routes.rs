//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Create the service router.
///
/// ```text
/// GET  /version  - {"version": "1.0.0"}
/// POST /revisor  - review `texto`, answer with the model's JSON
/// ```
///
/// Any origin, method and header is allowed, credentials included.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/version", get(handlers::version))
        .route("/revisor", post(handlers::review))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
