//! Mock catalog provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::provider::{
    CatalogProvider, ProviderError, ProviderSource, RawCatalogItem, TrendingScope,
};

/// What a recorded call asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    Search { query: String, limit: usize },
    Trending { scope: TrendingScope, limit: usize },
}

/// A recorded provider call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    /// When the call was made (tokio clock, so paused-time tests see virtual time).
    pub at: tokio::time::Instant,
}

/// Mock implementation of the CatalogProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return a pool of items filtered by title, or fixed results per query
/// - Return trending items per scope
/// - Simulate failures and per-query delays
/// - Track calls for assertions
///
/// Like real catalogs, the mock ignores `limit` and may over-deliver; the
/// adapter is responsible for truncating.
///
/// # Example
///
/// ```rust,ignore
/// use blitz_core::testing::{MockProvider, fixtures};
///
/// let books = MockProvider::new(ProviderSource::Books);
/// books.set_results(vec![fixtures::book("1", "Dune", Some(4.2))]).await;
///
/// let items = books.search("dune", 3).await?;
/// assert_eq!(items.len(), 1);
/// assert_eq!(books.search_queries().await, vec!["dune"]);
/// ```
pub struct MockProvider {
    source: ProviderSource,
    /// Pool searched by title.
    pool: Arc<RwLock<Vec<RawCatalogItem>>>,
    /// Exact-query overrides (lowercased keys).
    query_results: Arc<RwLock<HashMap<String, Vec<RawCatalogItem>>>>,
    /// Trending items for every scope without an override.
    trending: Arc<RwLock<Vec<RawCatalogItem>>>,
    trending_by_scope: Arc<RwLock<HashMap<TrendingScope, Vec<RawCatalogItem>>>>,
    /// Delay applied to every call.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Delay applied to one query (lowercased keys), overriding `delay`.
    query_delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
    /// If set, every call fails with this message.
    failing: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("source", &self.source)
            .field("pool", &"<pool>")
            .field("calls", &"<calls>")
            .finish()
    }
}

impl MockProvider {
    /// Create a new mock provider with no items.
    pub fn new(source: ProviderSource) -> Self {
        Self {
            source,
            pool: Arc::new(RwLock::new(Vec::new())),
            query_results: Arc::new(RwLock::new(HashMap::new())),
            trending: Arc::new(RwLock::new(Vec::new())),
            trending_by_scope: Arc::new(RwLock::new(HashMap::new())),
            delay: Arc::new(RwLock::new(None)),
            query_delays: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            failing: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the pool that searches filter by title.
    pub async fn set_results(&self, items: Vec<RawCatalogItem>) {
        *self.pool.write().await = items;
    }

    /// Return exactly `items` when searched for `query`.
    pub async fn set_query_results(&self, query: &str, items: Vec<RawCatalogItem>) {
        self.query_results
            .write()
            .await
            .insert(query.to_lowercase(), items);
    }

    /// Set trending items for every scope.
    pub async fn set_trending(&self, items: Vec<RawCatalogItem>) {
        *self.trending.write().await = items;
    }

    /// Set trending items for one scope.
    pub async fn set_trending_for(&self, scope: TrendingScope, items: Vec<RawCatalogItem>) {
        self.trending_by_scope.write().await.insert(scope, items);
    }

    /// Delay every call by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Delay searches for `query` by `delay`.
    pub async fn set_query_delay(&self, query: &str, delay: Duration) {
        self.query_delays
            .write()
            .await
            .insert(query.to_lowercase(), delay);
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every call fail until cleared.
    pub async fn set_failing(&self, message: &str) {
        *self.failing.write().await = Some(message.to_string());
    }

    /// Stop failing.
    pub async fn clear_failing(&self) {
        *self.failing.write().await = None;
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Queries of recorded searches, in call order.
    pub async fn search_queries(&self) -> Vec<String> {
        self.calls
            .read()
            .await
            .iter()
            .filter_map(|c| match &c.kind {
                CallKind::Search { query, .. } => Some(query.clone()),
                CallKind::Trending { .. } => None,
            })
            .collect()
    }

    /// Number of recorded trending calls.
    pub async fn trending_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c.kind, CallKind::Trending { .. }))
            .count()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    async fn record(&self, kind: CallKind) {
        self.calls.write().await.push(RecordedCall {
            kind,
            at: tokio::time::Instant::now(),
        });
    }

    async fn wait(&self, query: Option<&str>) {
        let per_query = match query {
            Some(q) => self.query_delays.read().await.get(&q.to_lowercase()).copied(),
            None => None,
        };
        let delay = match per_query {
            Some(d) => Some(d),
            None => *self.delay.read().await,
        };
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }

    async fn injected_error(&self) -> Option<ProviderError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }
        self.failing
            .read()
            .await
            .as_ref()
            .map(|message| ProviderError::Api {
                status: 503,
                message: message.clone(),
            })
    }
}

fn title_of(item: &RawCatalogItem) -> &str {
    match item {
        RawCatalogItem::Book(book) => &book.title,
        RawCatalogItem::Film(film) => &film.title,
        RawCatalogItem::Game(game) => &game.name,
    }
}

#[async_trait]
impl CatalogProvider for MockProvider {
    fn source(&self) -> ProviderSource {
        self.source
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        self.record(CallKind::Search {
            query: query.to_string(),
            limit,
        })
        .await;

        self.wait(Some(query)).await;

        if let Some(err) = self.injected_error().await {
            return Err(err);
        }

        let query_lower = query.to_lowercase();
        if let Some(items) = self.query_results.read().await.get(&query_lower) {
            return Ok(items.clone());
        }

        let pool = self.pool.read().await;
        Ok(pool
            .iter()
            .filter(|item| {
                let title = title_of(item).to_lowercase();
                query_lower
                    .split_whitespace()
                    .all(|word| title.contains(word))
            })
            .cloned()
            .collect())
    }

    async fn trending(
        &self,
        scope: TrendingScope,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        self.record(CallKind::Trending { scope, limit }).await;

        self.wait(None).await;

        if let Some(err) = self.injected_error().await {
            return Err(err);
        }

        if let Some(items) = self.trending_by_scope.read().await.get(&scope) {
            return Ok(items.clone());
        }
        Ok(self.trending.read().await.clone())
    }
}
