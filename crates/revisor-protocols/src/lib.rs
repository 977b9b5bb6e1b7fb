//! # Revisor Protocols
//!
//! Protocol definitions shared by the review service and its chat providers.
//! Contains only interface definitions and plain data types.
//!
//! ## Core Traits
//!
//! - [`ChatProvider`] - Trait for chat-completion provider implementations

pub mod error;
pub mod provider;
pub mod types;

pub use error::ProviderError;
pub use provider::{ChatProvider, ChatReply, ChatRequest};
pub use types::*;
