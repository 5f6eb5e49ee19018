//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with mock catalogs injected, so every endpoint can be exercised without
//! network access.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use blitz_core::{
    testing::MockProvider, Config, DiscoveryConfig, DiscoveryOrchestrator, ProviderSet,
    ProviderSource, Randomness,
};
use blitz_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use blitz_core::testing::fixtures;

/// Test fixture for E2E testing with mock catalogs.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.books.set_results(fixtures::books("Dune", 3)).await;
///
///     let response = fixture.get("/api/v1/discovery/search?q=dune").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock book catalog, always present
    pub books: Arc<MockProvider>,
    /// Mock film/TV catalog, present when configured
    pub film: Option<Arc<MockProvider>>,
    /// Mock game catalog, present when configured
    pub games: Option<Arc<MockProvider>>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Which optional catalogs the fixture wires in.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub with_film: bool,
    pub with_games: bool,
    pub discovery: DiscoveryConfig,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            with_film: true,
            with_games: true,
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl TestConfig {
    /// Only the credential-free book catalog.
    pub fn books_only() -> Self {
        Self {
            with_film: false,
            with_games: false,
            ..Self::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with every catalog mocked.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let books = Arc::new(MockProvider::new(ProviderSource::Books));
        let film = test_config
            .with_film
            .then(|| Arc::new(MockProvider::new(ProviderSource::Tmdb)));
        let games = test_config
            .with_games
            .then(|| Arc::new(MockProvider::new(ProviderSource::Rawg)));

        let providers = ProviderSet::new(
            books.clone(),
            film.clone().map(|p| p as Arc<dyn blitz_core::CatalogProvider>),
            games.clone().map(|p| p as Arc<dyn blitz_core::CatalogProvider>),
        );

        let config = Config {
            discovery: test_config.discovery.clone(),
            ..Config::default()
        };

        let orchestrator = Arc::new(DiscoveryOrchestrator::with_randomness(
            providers,
            test_config.discovery,
            Arc::new(Randomness::seeded(7)),
        ));

        let state = Arc::new(AppState::new(config, orchestrator));
        let router = create_router(state);

        Self {
            router,
            books,
            film,
            games,
        }
    }

    /// The film mock; panics if the fixture was built without it.
    pub fn film(&self) -> &Arc<MockProvider> {
        self.film.as_ref().expect("fixture has no film catalog")
    }

    /// The game mock; panics if the fixture was built without it.
    pub fn games(&self) -> &Arc<MockProvider> {
        self.games.as_ref().expect("fixture has no game catalog")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }
}
