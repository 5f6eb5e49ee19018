//! The set of configured providers and their availability.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::ProvidersConfig;
use crate::provider::{
    CatalogProvider, GoogleBooksClient, ProviderAdapter, ProviderError, ProviderSource,
    RawgClient, TmdbClient,
};

/// Availability of one provider, derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAvailability {
    pub source: ProviderSource,
    pub available: bool,
    pub requires_credential: bool,
}

/// Adapters for every available provider.
///
/// The book catalog is always present. The film/TV and game catalogs are
/// present only when their credential is configured; absent ones are
/// skipped entirely, never queried and never reported as failed.
#[derive(Debug, Clone)]
pub struct ProviderSet {
    books: ProviderAdapter,
    film: Option<ProviderAdapter>,
    games: Option<ProviderAdapter>,
}

impl ProviderSet {
    pub fn new(
        books: Arc<dyn CatalogProvider>,
        film: Option<Arc<dyn CatalogProvider>>,
        games: Option<Arc<dyn CatalogProvider>>,
    ) -> Self {
        Self {
            books: ProviderAdapter::new(books),
            film: film.map(ProviderAdapter::new),
            games: games.map(ProviderAdapter::new),
        }
    }

    /// Build HTTP clients for every provider whose configuration allows it.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ProviderError> {
        let books: Arc<dyn CatalogProvider> =
            Arc::new(GoogleBooksClient::new(config.books.clone())?);

        let film: Option<Arc<dyn CatalogProvider>> = match config.tmdb_credential() {
            Some(tmdb) => Some(Arc::new(TmdbClient::new(tmdb.clone())?)),
            None => {
                info!("TMDB API key not configured, film/TV catalog unavailable");
                None
            }
        };

        let games: Option<Arc<dyn CatalogProvider>> = match config.rawg_credential() {
            Some(rawg) => Some(Arc::new(RawgClient::new(rawg.clone())?)),
            None => {
                info!("RAWG API key not configured, game catalog unavailable");
                None
            }
        };

        Ok(Self::new(books, film, games))
    }

    pub fn books(&self) -> &ProviderAdapter {
        &self.books
    }

    pub fn film(&self) -> Option<&ProviderAdapter> {
        self.film.as_ref()
    }

    pub fn games(&self) -> Option<&ProviderAdapter> {
        self.games.as_ref()
    }

    /// Optional providers skipped for lack of a credential, in merge order.
    pub fn skipped(&self) -> Vec<ProviderSource> {
        let mut skipped = Vec::new();
        if self.film.is_none() {
            skipped.push(ProviderSource::Tmdb);
        }
        if self.games.is_none() {
            skipped.push(ProviderSource::Rawg);
        }
        skipped
    }

    pub fn availability(&self) -> Vec<ProviderAvailability> {
        let entry = |source: ProviderSource, available: bool| ProviderAvailability {
            source,
            available,
            requires_credential: source.requires_credential(),
        };
        vec![
            entry(ProviderSource::Tmdb, self.film.is_some()),
            entry(ProviderSource::Rawg, self.games.is_some()),
            entry(ProviderSource::Books, true),
        ]
    }
}
