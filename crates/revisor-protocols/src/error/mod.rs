//! Error types for the revisor protocol layer.

mod provider;

pub use provider::*;
