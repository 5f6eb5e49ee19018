//! Discovery API handlers: one-shot search and trending runs.
//!
//! These endpoints never fail because of an upstream: absorbed provider
//! failures surface as fewer (or zero) items.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use blitz_core::{DiscoveryOutcome, ProviderAvailability};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct DiscoveryStatusResponse {
    pub providers: Vec<ProviderAvailability>,
    pub debounce_ms: u64,
    pub search_limit: usize,
    pub trending_limit: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/discovery/status
///
/// Which providers are available with the current configuration.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<DiscoveryStatusResponse> {
    let orchestrator = state.orchestrator();
    let config = orchestrator.config();
    Json(DiscoveryStatusResponse {
        providers: orchestrator.providers().availability(),
        debounce_ms: config.debounce_ms,
        search_limit: config.search_limit,
        trending_limit: config.trending_limit,
    })
}

/// GET /api/v1/discovery/search?q=
///
/// One active-search run. A blank query returns an empty result without
/// contacting any provider.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<DiscoveryOutcome> {
    Json(state.orchestrator().search(&params.q).await)
}

/// GET /api/v1/discovery/trending
pub async fn trending(State(state): State<Arc<AppState>>) -> Json<DiscoveryOutcome> {
    Json(state.orchestrator().trending().await)
}
