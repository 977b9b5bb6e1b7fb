//! # Revisor API
//!
//! HTTP interface of the revisor service.
//!
//! ```text
//!  POST /revisor
//!       │
//!       ▼
//!  RequestGate ──► Reviewer ──► ChatProvider (Azure OpenAI)
//!  (token, texto,     │
//!   deployment)       ▼
//!                 unwrapper ──► JSON response / {"detail": ...}
//! ```
//!
//! - [`gate`]: shared-secret check, `texto` extraction, deployment resolution
//! - [`unwrapper`]: turns a model reply into a JSON value
//! - [`reviewer`]: builds the chat exchange and calls the provider
//! - [`http`]: routes and handlers
//! - [`error`]: error taxonomy and its HTTP mapping

pub mod error;
pub mod gate;
pub mod http;
pub mod reviewer;
pub mod server;
pub mod state;
pub mod unwrapper;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;
pub use gate::{Admission, RequestGate};
pub use http::routes::create_router;
pub use reviewer::Reviewer;
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::AppState;
pub use unwrapper::{normalize_reply, unwrap_reply};
