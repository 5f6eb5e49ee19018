use std::sync::Arc;

use blitz_core::{Config, DiscoveryOrchestrator, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<DiscoveryOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<DiscoveryOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn orchestrator(&self) -> &Arc<DiscoveryOrchestrator> {
        &self.orchestrator
    }
}
