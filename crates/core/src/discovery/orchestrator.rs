//! Fan-out to every available provider and merge under a fixed policy.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::media::{FeedItem, MediaItem};
use crate::metrics;
use crate::provider::{ProviderAdapter, ProviderSource, TrendingScope};
use crate::random::Randomness;

use super::config::{DiscoveryConfig, ProviderCaps};
use super::feed::HomeFeed;
use super::providers::ProviderSet;

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryRequest {
    /// Active search with user text.
    Search(String),
    /// The idle suggestion set.
    Trending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    Search,
    Trending,
}

impl DiscoveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Search => "search",
            DiscoveryMode::Trending => "trending",
        }
    }
}

/// The merged result of one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryOutcome {
    pub mode: DiscoveryMode,
    /// Trimmed query text (search mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub items: Vec<MediaItem>,
    /// Optional providers skipped for lack of a credential.
    #[serde(default)]
    pub skipped: Vec<ProviderSource>,
    /// True when an active search ran with at least one provider skipped.
    #[serde(default)]
    pub config_notice: bool,
    #[serde(default)]
    pub duration_ms: u64,
}

impl DiscoveryOutcome {
    /// Result of an empty query: nothing queried, nothing skipped.
    pub fn empty_search() -> Self {
        Self {
            mode: DiscoveryMode::Search,
            query: None,
            items: Vec::new(),
            skipped: Vec::new(),
            config_notice: false,
            duration_ms: 0,
        }
    }
}

/// Runs searches, trending and the home feed against a [`ProviderSet`].
pub struct DiscoveryOrchestrator {
    providers: ProviderSet,
    config: DiscoveryConfig,
    randomness: Arc<Randomness>,
}

impl DiscoveryOrchestrator {
    pub fn new(providers: ProviderSet, config: DiscoveryConfig) -> Self {
        Self::with_randomness(providers, config, Arc::new(Randomness::from_entropy()))
    }

    /// Use a specific randomness source (seeded in tests).
    pub fn with_randomness(
        providers: ProviderSet,
        config: DiscoveryConfig,
        randomness: Arc<Randomness>,
    ) -> Self {
        Self {
            providers,
            config,
            randomness,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    pub async fn run(&self, request: DiscoveryRequest) -> DiscoveryOutcome {
        match request {
            DiscoveryRequest::Search(query) => self.search(&query).await,
            DiscoveryRequest::Trending => self.trending().await,
        }
    }

    /// Active search: film/TV, then games, then books, truncated to the
    /// search budget. Empty input returns immediately without any call.
    pub async fn search(&self, query: &str) -> DiscoveryOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty query, skipping providers");
            return DiscoveryOutcome::empty_search();
        }

        let start = Instant::now();
        metrics::DISCOVERY_RUNS
            .with_label_values(&[DiscoveryMode::Search.as_str()])
            .inc();

        let lanes = self.lanes(self.config.search_caps);
        let results = join_all(
            lanes
                .iter()
                .map(|(adapter, cap)| adapter.fetch_by_query(query, *cap)),
        )
        .await;

        let mut items: Vec<MediaItem> = results.into_iter().flatten().collect();
        items.truncate(self.config.search_limit);

        let skipped = self.providers.skipped();
        let outcome = DiscoveryOutcome {
            mode: DiscoveryMode::Search,
            query: Some(query.to_string()),
            config_notice: !skipped.is_empty(),
            items,
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            query = %query,
            items = outcome.items.len(),
            providers = lanes.len(),
            duration_ms = outcome.duration_ms,
            "Search completed"
        );

        outcome
    }

    /// Trending: every available provider's popular list, shuffled together
    /// and truncated to the trending budget.
    pub async fn trending(&self) -> DiscoveryOutcome {
        let start = Instant::now();
        metrics::DISCOVERY_RUNS
            .with_label_values(&[DiscoveryMode::Trending.as_str()])
            .inc();

        let lanes = self.lanes(self.config.trending_caps);
        let results = join_all(
            lanes
                .iter()
                .map(|(adapter, cap)| adapter.fetch_trending(*cap)),
        )
        .await;

        let mut items: Vec<MediaItem> = results.into_iter().flatten().collect();
        self.randomness.shuffle(&mut items);
        items.truncate(self.config.trending_limit);

        let outcome = DiscoveryOutcome {
            mode: DiscoveryMode::Trending,
            query: None,
            items,
            skipped: self.providers.skipped(),
            config_notice: false,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            items = outcome.items.len(),
            providers = lanes.len(),
            duration_ms = outcome.duration_ms,
            "Trending completed"
        );

        outcome
    }

    /// Home feed: movies, shows, games and books fetched concurrently,
    /// merged, shuffled and split into featured and grid.
    pub async fn home_feed(&self) -> HomeFeed {
        let start = Instant::now();
        metrics::DISCOVERY_RUNS.with_label_values(&["feed"]).inc();

        let per_category = self.config.feed_per_category;
        let policy = self.config.missing_rating;

        let mut lanes: Vec<(&ProviderAdapter, TrendingScope)> = Vec::new();
        if let Some(film) = self.providers.film() {
            lanes.push((film, TrendingScope::Movies));
            lanes.push((film, TrendingScope::Shows));
        }
        if let Some(games) = self.providers.games() {
            lanes.push((games, TrendingScope::Mixed));
        }
        lanes.push((self.providers.books(), TrendingScope::Mixed));

        let categories: Vec<Vec<FeedItem>> = join_all(lanes.iter().map(|(adapter, scope)| {
            adapter.fetch_feed(*scope, per_category, policy, &self.randomness)
        }))
        .await;

        let feed = HomeFeed::assemble(
            categories,
            self.config.feed_featured,
            self.config.feed_more,
            &self.randomness,
        );

        info!(
            featured = feed.featured.len(),
            more = feed.more.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Home feed assembled"
        );

        feed
    }

    /// Available adapters in merge order, each with its cap.
    fn lanes(&self, caps: ProviderCaps) -> Vec<(&ProviderAdapter, usize)> {
        let mut lanes = Vec::with_capacity(3);
        if let Some(film) = self.providers.film() {
            lanes.push((film, caps.film));
        }
        if let Some(games) = self.providers.games() {
            lanes.push((games, caps.game));
        }
        lanes.push((self.providers.books(), caps.book));
        lanes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use crate::testing::{fixtures, MockProvider};

    struct Harness {
        books: Arc<MockProvider>,
        film: Arc<MockProvider>,
        games: Arc<MockProvider>,
        orchestrator: DiscoveryOrchestrator,
    }

    fn harness() -> Harness {
        let books = Arc::new(MockProvider::new(ProviderSource::Books));
        let film = Arc::new(MockProvider::new(ProviderSource::Tmdb));
        let games = Arc::new(MockProvider::new(ProviderSource::Rawg));
        let providers = ProviderSet::new(books.clone(), Some(film.clone()), Some(games.clone()));
        let orchestrator = DiscoveryOrchestrator::with_randomness(
            providers,
            DiscoveryConfig::default(),
            Arc::new(Randomness::seeded(1)),
        );
        Harness {
            books,
            film,
            games,
            orchestrator,
        }
    }

    #[tokio::test]
    async fn test_search_merge_order_and_caps() {
        let h = harness();
        h.film.set_results(fixtures::films("Star", 10)).await;
        h.games.set_results(fixtures::games("Star", 10)).await;
        h.books.set_results(fixtures::books("Star", 10)).await;

        let outcome = h.orchestrator.search("star").await;
        let kinds: Vec<MediaKind> = outcome.items.iter().map(|i| i.kind).collect();

        assert_eq!(outcome.items.len(), 9);
        assert_eq!(&kinds[..4], &[MediaKind::Movie; 4]);
        assert_eq!(&kinds[4..7], &[MediaKind::Game; 3]);
        assert_eq!(&kinds[7..], &[MediaKind::Book; 2]);
        assert!(!outcome.config_notice);
    }

    #[tokio::test]
    async fn test_whitespace_query_short_circuits() {
        let h = harness();
        let outcome = h.orchestrator.search("   ").await;

        assert_eq!(outcome, DiscoveryOutcome::empty_search());
        assert!(h.books.recorded_calls().await.is_empty());
        assert!(h.film.recorded_calls().await.is_empty());
        assert!(h.games.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_query_is_trimmed_before_sending() {
        let h = harness();
        h.orchestrator.search("  dune ").await;
        assert_eq!(h.books.search_queries().await, vec!["dune"]);
    }

    #[tokio::test]
    async fn test_trending_is_shuffled_and_truncated() {
        let h = harness();
        h.film.set_trending(fixtures::films("Hit", 5)).await;
        h.games.set_trending(fixtures::games("Hit", 5)).await;
        h.books.set_trending(fixtures::books("Hit", 5)).await;

        let outcome = h.orchestrator.trending().await;

        assert_eq!(outcome.mode, DiscoveryMode::Trending);
        assert_eq!(outcome.items.len(), 6);
        assert!(outcome.items.iter().all(|i| i.id.starts_with("trend-")));
        assert!(!outcome.config_notice);
    }

    #[tokio::test]
    async fn test_home_feed_fetches_four_categories() {
        let h = harness();
        h.film
            .set_trending_for(TrendingScope::Movies, fixtures::films("Movie", 8))
            .await;
        h.film
            .set_trending_for(
                TrendingScope::Shows,
                (1..=8)
                    .map(|i| fixtures::show(100 + i, &format!("Show {}", i), Some(8.0)))
                    .collect(),
            )
            .await;
        h.games.set_trending(fixtures::games("Game", 8)).await;
        h.books.set_trending(fixtures::books("Book", 8)).await;

        let feed = h.orchestrator.home_feed().await;

        assert_eq!(feed.featured.len(), 3);
        assert_eq!(feed.more.len(), 12);
        assert_eq!(h.film.trending_count().await, 2);
        assert_eq!(h.games.trending_count().await, 1);
        assert_eq!(h.books.trending_count().await, 1);
    }
}
