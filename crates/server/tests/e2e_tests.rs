//! End-to-end tests with mocked catalogs.
//!
//! These tests run the full router in-process with mock implementations of
//! the book, film/TV and game catalogs.

mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::{fixtures, TestConfig, TestFixture};

fn ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Basic API Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_hides_credentials() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["providers"]["tmdb"]["api_key_configured"], false);
    assert_eq!(response.body["providers"]["rawg"]["api_key_configured"], false);
    assert_eq!(response.body["discovery"]["debounce_ms"], 400);
    assert!(!response.body.to_string().contains("\"api_key\""));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Discovery Status
// =============================================================================

#[tokio::test]
async fn test_status_lists_all_providers() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/discovery/status").await;

    assert_eq!(response.status, StatusCode::OK);
    let providers = response.body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 3);
    assert!(providers.iter().all(|p| p["available"] == true));
    assert_eq!(response.body["debounce_ms"], 400);
    assert_eq!(response.body["search_limit"], 9);
}

#[tokio::test]
async fn test_status_reports_missing_credentials() {
    let fixture = TestFixture::with_config(TestConfig::books_only());
    let response = fixture.get("/api/v1/discovery/status").await;

    let providers = response.body["providers"].as_array().unwrap();
    let tmdb = providers.iter().find(|p| p["source"] == "tmdb").unwrap();
    let books = providers.iter().find(|p| p["source"] == "books").unwrap();
    assert_eq!(tmdb["available"], false);
    assert_eq!(tmdb["requires_credential"], true);
    assert_eq!(books["available"], true);
    assert_eq!(books["requires_credential"], false);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_merges_in_provider_order() {
    let fixture = TestFixture::new();
    fixture
        .film()
        .set_results(vec![fixtures::film(438631, "Dune", Some(7.8))])
        .await;
    fixture
        .games()
        .set_results(vec![fixtures::game(3498, "Dune: Spice Wars", Some(3.9))])
        .await;
    fixture
        .books
        .set_results(vec![fixtures::book("dune", "Dune", Some(4.3))])
        .await;

    let response = fixture.get("/api/v1/discovery/search?q=dune").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["mode"], "search");
    assert_eq!(response.body["query"], "dune");
    assert_eq!(
        ids(&response.body),
        vec!["tmdb-movie-438631", "rawg-3498", "book-dune"]
    );

    let film = &response.body["items"][0];
    assert_eq!(film["kind"], "movie");
    assert_eq!(film["rating"]["kind"], "measured");
    let rating = film["rating"]["value"].as_f64().unwrap();
    assert!((rating - 7.8).abs() < 0.01);

    let book = &response.body["items"][2];
    let rating = book["rating"]["value"].as_f64().unwrap();
    assert!((rating - 8.6).abs() < 0.01);
    assert!(book["image_url"].as_str().unwrap().starts_with("https://"));

    assert_eq!(response.body["config_notice"], false);
}

#[tokio::test]
async fn test_search_respects_budget() {
    let fixture = TestFixture::new();
    fixture.film().set_results(fixtures::films("Star", 10)).await;
    fixture.games().set_results(fixtures::games("Star", 10)).await;
    fixture.books.set_results(fixtures::books("Star", 10)).await;

    let response = fixture.get("/api/v1/discovery/search?q=star").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body).len(), 9);
}

#[tokio::test]
async fn test_blank_search_contacts_nobody() {
    let fixture = TestFixture::new();
    fixture.books.set_results(fixtures::books("Star", 3)).await;

    let response = fixture.get("/api/v1/discovery/search?q=%20%20").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(ids(&response.body).is_empty());
    assert!(fixture.books.recorded_calls().await.is_empty());
    assert!(fixture.film().recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_search_without_credentials_sets_notice() {
    let fixture = TestFixture::with_config(TestConfig::books_only());
    fixture.books.set_results(fixtures::books("Dune", 2)).await;

    let response = fixture.get("/api/v1/discovery/search?q=dune").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec!["book-dune-1", "book-dune-2"]);
    assert_eq!(response.body["config_notice"], true);
    assert_eq!(response.body["skipped"], serde_json::json!(["tmdb", "rawg"]));
}

#[tokio::test]
async fn test_provider_failure_is_absorbed() {
    let fixture = TestFixture::new();
    fixture.film().set_failing("upstream exploded").await;
    fixture.games().set_results(fixtures::games("Dune", 2)).await;
    fixture.books.set_results(fixtures::books("Dune", 2)).await;

    let response = fixture.get("/api/v1/discovery/search?q=dune").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        ids(&response.body),
        vec!["rawg-1", "rawg-2", "book-dune-1", "book-dune-2"]
    );
    assert!(!response.body.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn test_all_providers_failing_yields_empty_result() {
    let fixture = TestFixture::new();
    fixture.film().set_failing("down").await;
    fixture.games().set_failing("down").await;
    fixture.books.set_failing("down").await;

    let response = fixture.get("/api/v1/discovery/search?q=dune").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(ids(&response.body).is_empty());
}

// =============================================================================
// Trending
// =============================================================================

#[tokio::test]
async fn test_trending_returns_prefixed_ids_within_budget() {
    let fixture = TestFixture::new();
    fixture.film().set_trending(fixtures::films("Hit", 5)).await;
    fixture.games().set_trending(fixtures::games("Hit", 5)).await;
    fixture.books.set_trending(fixtures::books("Hit", 5)).await;

    let response = fixture.get("/api/v1/discovery/trending").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["mode"], "trending");
    assert_eq!(response.body["config_notice"], false);
    let ids = ids(&response.body);
    assert_eq!(ids.len(), 6);
    assert!(ids.iter().all(|id| id.starts_with("trend-")));
}

// =============================================================================
// Home Feed
// =============================================================================

async fn fill_feed(fixture: &TestFixture) {
    let film = fixture.film();
    film.set_trending_for(blitz_core::TrendingScope::Movies, fixtures::films("Movie", 8))
        .await;
    film.set_trending_for(
        blitz_core::TrendingScope::Shows,
        (1..=8)
            .map(|i| fixtures::show(100 + i, &format!("Show {}", i), Some(8.0)))
            .collect(),
    )
    .await;
    fixture.games().set_trending(fixtures::games("Game", 8)).await;
    fixture.books.set_trending(fixtures::books("Book", 8)).await;
}

#[tokio::test]
async fn test_feed_all_has_featured_strip() {
    let fixture = TestFixture::new();
    fill_feed(&fixture).await;

    let response = fixture.get("/api/v1/feed").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["filter"], "all");
    let featured = response.body["featured"].as_array().unwrap();
    let items = response.body["items"].as_array().unwrap();
    assert_eq!(featured.len(), 3);
    assert_eq!(items.len(), 12);
    assert!(featured.iter().all(|card| card["featured"] == true));
    assert!(items.iter().all(|card| card["featured"] == false));
    assert_eq!(response.body["stats"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_feed_category_filter() {
    let fixture = TestFixture::new();
    fill_feed(&fixture).await;

    let response = fixture.get("/api/v1/feed?category=games").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["filter"], "games");
    assert!(response.body["featured"].as_array().unwrap().is_empty());
    let items = response.body["items"].as_array().unwrap();
    assert!(items.iter().all(|card| card["kind"] == "game"));
}

#[tokio::test]
async fn test_feed_unknown_category_is_rejected() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/feed?category=podcasts").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("podcasts"));
    assert!(fixture.books.recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_feed_without_credentials_has_books_only() {
    let fixture = TestFixture::with_config(TestConfig::books_only());
    fixture.books.set_trending(fixtures::books("Book", 8)).await;

    let response = fixture.get("/api/v1/feed").await;

    assert_eq!(response.status, StatusCode::OK);
    let featured = response.body["featured"].as_array().unwrap();
    let items = response.body["items"].as_array().unwrap();
    assert_eq!(featured.len() + items.len(), 8);
    assert!(featured
        .iter()
        .chain(items.iter())
        .all(|card| card["kind"] == "book"));
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn test_metrics_endpoint_exposes_http_and_provider_metrics() {
    let fixture = TestFixture::new();
    fixture.books.set_results(fixtures::books("Dune", 1)).await;
    fixture.get("/api/v1/discovery/search?q=dune").await;

    let response = fixture.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let text = response.body.as_str().unwrap();
    assert!(text.contains("blitz_http_requests_total"));
    assert!(text.contains("/api/v1/discovery/search"));
    assert!(text.contains("blitz_provider_requests_total"));
}
