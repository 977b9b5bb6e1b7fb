//! # Revisor Config
//!
//! Configuration for the revisor service: an optional TOML file with
//! `${VAR}` expansion, overlaid by the process environment.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH, ENV_API_KEY, ENV_API_VERSION, ENV_DEPLOYMENT, ENV_ENDPOINT, ENV_TOKEN_ID};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
