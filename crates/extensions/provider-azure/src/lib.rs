//! Azure OpenAI chat provider for revisor.

mod api;
mod converter;
mod parser;
mod provider;

pub use provider::{AzureOpenAIProvider, AzureSettings};
