//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the server:
//! - HTTP request metrics (latency, counts)
//! - Search session WebSocket metrics
//! - Core provider and discovery metrics, registered alongside

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "blitz_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("blitz_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "blitz_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Search Session Metrics
// =============================================================================

/// Search sessions currently open over WebSocket.
pub static WS_SESSIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "blitz_ws_sessions_active",
        "Number of open search sessions",
    )
    .unwrap()
});

/// Total search sessions (cumulative).
pub static WS_SESSIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "blitz_ws_sessions_total",
        "Total search sessions since startup",
    )
    .unwrap()
});

/// View snapshots pushed to clients.
pub static WS_VIEWS_SENT: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("blitz_ws_views_sent_total", "Search views pushed to clients").unwrap()
});

/// Client messages that could not be parsed.
pub static WS_INVALID_MESSAGES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "blitz_ws_invalid_messages_total",
        "Client WebSocket messages that could not be parsed",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // WebSocket
    registry
        .register(Box::new(WS_SESSIONS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_SESSIONS_TOTAL.clone()))
        .unwrap();
    registry.register(Box::new(WS_VIEWS_SENT.clone())).unwrap();
    registry
        .register(Box::new(WS_INVALID_MESSAGES.clone()))
        .unwrap();

    // Core metrics (providers, discovery runs, stale results)
    for metric in blitz_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Label used for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_includes_core_metrics() {
        blitz_core::metrics::STALE_RESULTS_DISCARDED.inc();
        HTTP_REQUESTS_IN_FLIGHT.set(0);

        let text = encode_metrics();
        assert!(text.contains("blitz_stale_results_discarded_total"));
        assert!(text.contains("blitz_http_requests_in_flight"));
    }
}
