//! Application state.

use std::sync::Arc;

use revisor_config::Config;
use revisor_protocols::provider::ChatProvider;

use crate::gate::RequestGate;
use crate::reviewer::Reviewer;

/// Application state shared across handlers. Immutable after startup.
pub struct AppState {
    pub gate: RequestGate,
    pub reviewer: Reviewer,
}

impl AppState {
    pub fn new(gate: RequestGate, reviewer: Reviewer) -> Self {
        Self { gate, reviewer }
    }

    pub fn from_config(config: &Config, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            gate: RequestGate::from_config(config),
            reviewer: Reviewer::from_config(provider, &config.reviewer),
        }
    }
}
