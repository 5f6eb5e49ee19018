//! Failure-absorbing wrapper around a [`CatalogProvider`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::media::{FeedItem, MediaItem, MissingRatingPolicy, Rating};
use crate::metrics;
use crate::random::Randomness;

use super::raw::{IdScope, RawCatalogItem};
use super::{CatalogProvider, ProviderError, ProviderSource, TrendingScope};

/// Wraps one provider and turns every upstream failure into an empty result.
///
/// Network errors, non-success statuses, unparsable bodies and rejected
/// credentials are logged and counted, never propagated.
#[derive(Clone)]
pub struct ProviderAdapter {
    provider: Arc<dyn CatalogProvider>,
}

impl ProviderAdapter {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    pub fn source(&self) -> ProviderSource {
        self.provider.source()
    }

    /// Up to `limit` items matching `query`. Empty on failure.
    pub async fn fetch_by_query(&self, query: &str, limit: usize) -> Vec<MediaItem> {
        let raw = self
            .observe("search", self.provider.search(query, limit))
            .await;

        raw.into_iter()
            .take(limit)
            .map(|item| item.into_media_item(IdScope::Search))
            .collect()
    }

    /// Up to `limit` trending items. Empty on failure.
    pub async fn fetch_trending(&self, limit: usize) -> Vec<MediaItem> {
        let raw = self
            .observe(
                "trending",
                self.provider.trending(TrendingScope::Mixed, limit),
            )
            .await;

        raw.into_iter()
            .take(limit)
            .map(|item| item.into_media_item(IdScope::Trending))
            .collect()
    }

    /// Up to `limit` extended items for the home feed. Unrated items follow
    /// `policy`. Empty on failure.
    pub async fn fetch_feed(
        &self,
        scope: TrendingScope,
        limit: usize,
        policy: MissingRatingPolicy,
        randomness: &Randomness,
    ) -> Vec<FeedItem> {
        let raw = self
            .observe("feed", self.provider.trending(scope, limit))
            .await;

        let fallback = || match policy {
            MissingRatingPolicy::Unrated => Rating::Unrated,
            MissingRatingPolicy::Estimated => Rating::Estimated(randomness.estimated_rating()),
        };

        raw.into_iter()
            .take(limit)
            .map(|item| item.into_feed_item(&fallback))
            .collect()
    }

    async fn observe<F>(&self, operation: &str, call: F) -> Vec<RawCatalogItem>
    where
        F: std::future::Future<Output = Result<Vec<RawCatalogItem>, ProviderError>>,
    {
        let source = self.source();
        let start = Instant::now();
        let result = call.await;

        metrics::PROVIDER_DURATION
            .with_label_values(&[source.as_str()])
            .observe(start.elapsed().as_secs_f64());

        match result {
            Ok(items) => {
                metrics::PROVIDER_REQUESTS
                    .with_label_values(&[source.as_str(), "ok"])
                    .inc();
                debug!(
                    source = %source,
                    operation,
                    count = items.len(),
                    "Provider returned items"
                );
                items
            }
            Err(e) => {
                metrics::PROVIDER_REQUESTS
                    .with_label_values(&[source.as_str(), "failed"])
                    .inc();
                warn!(
                    source = %source,
                    operation,
                    error = %e,
                    "Provider failed, contributing no items"
                );
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("source", &self.source())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockProvider};

    fn adapter(provider: &Arc<MockProvider>) -> ProviderAdapter {
        ProviderAdapter::new(provider.clone())
    }

    #[tokio::test]
    async fn test_fetch_by_query_truncates_to_limit() {
        let provider = Arc::new(MockProvider::new(ProviderSource::Books));
        provider.set_results(fixtures::books("Dune", 10)).await;

        let items = adapter(&provider).fetch_by_query("dune", 3).await;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, "book-dune-1");
    }

    #[tokio::test]
    async fn test_failure_becomes_empty_contribution() {
        let provider = Arc::new(MockProvider::new(ProviderSource::Rawg));
        provider.set_results(fixtures::games("Zelda", 2)).await;
        provider
            .set_next_error(ProviderError::Parse("unexpected token".to_string()))
            .await;

        assert!(adapter(&provider).fetch_by_query("zelda", 3).await.is_empty());
        assert_eq!(adapter(&provider).fetch_by_query("zelda", 3).await.len(), 2);
    }

    #[tokio::test]
    async fn test_trending_uses_mixed_scope_and_prefix() {
        let provider = Arc::new(MockProvider::new(ProviderSource::Tmdb));
        provider.set_trending(fixtures::films("Hit", 4)).await;

        let items = adapter(&provider).fetch_trending(3).await;

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.id.starts_with("trend-tmdb-movie-")));
        let calls = provider.recorded_calls().await;
        assert!(matches!(
            calls[0].kind,
            crate::testing::CallKind::Trending {
                scope: TrendingScope::Mixed,
                limit: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_feed_missing_rating_policy() {
        let provider = Arc::new(MockProvider::new(ProviderSource::Books));
        provider
            .set_trending(vec![
                fixtures::book("a", "Rated", Some(4.0)),
                fixtures::book("b", "Unrated", None),
            ])
            .await;
        let randomness = Randomness::seeded(3);

        let unrated = adapter(&provider)
            .fetch_feed(TrendingScope::Mixed, 8, MissingRatingPolicy::Unrated, &randomness)
            .await;
        assert_eq!(unrated[0].item.rating, Rating::Measured(8.0));
        assert_eq!(unrated[1].item.rating, Rating::Unrated);

        let estimated = adapter(&provider)
            .fetch_feed(TrendingScope::Mixed, 8, MissingRatingPolicy::Estimated, &randomness)
            .await;
        assert_eq!(estimated[0].item.rating, Rating::Measured(8.0));
        assert!(matches!(
            estimated[1].item.rating,
            Rating::Estimated(v) if (7.0..=9.0).contains(&v)
        ));
        assert_eq!(estimated[1].reviewer_label, "Google Books Readers");
    }
}
