//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Provider adapters (requests, latency, absorbed failures)
//! - Discovery orchestration runs
//! - Search sessions (stale results dropped)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Provider Metrics
// =============================================================================

/// Provider requests by source and outcome.
pub static PROVIDER_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("blitz_provider_requests_total", "Total upstream provider requests"),
        &["source", "outcome"], // outcome: "ok", "failed"
    )
    .unwrap()
});

/// Provider request duration in seconds.
pub static PROVIDER_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "blitz_provider_request_duration_seconds",
            "Duration of upstream provider requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Discovery Metrics
// =============================================================================

/// Orchestration runs by mode.
pub static DISCOVERY_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("blitz_discovery_runs_total", "Total discovery orchestration runs"),
        &["mode"], // "search", "trending", "feed"
    )
    .unwrap()
});

/// Results dropped because a newer query superseded them.
pub static STALE_RESULTS_DISCARDED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "blitz_stale_results_discarded_total",
        "Search results discarded as stale",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(PROVIDER_REQUESTS.clone()),
        Box::new(PROVIDER_DURATION.clone()),
        Box::new(DISCOVERY_RUNS.clone()),
        Box::new(STALE_RESULTS_DISCARDED.clone()),
    ]
}
