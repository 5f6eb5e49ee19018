//! Upstream catalog providers.
//!
//! Three HTTP clients (book, film/TV and game catalogs) implement
//! [`CatalogProvider`] and may fail. [`ProviderAdapter`] wraps a provider and
//! is the boundary where every failure is absorbed into an empty
//! contribution.

mod adapter;
mod google_books;
mod http;
mod raw;
mod rawg;
mod tmdb;

pub use adapter::ProviderAdapter;
pub use google_books::{BooksConfig, GoogleBooksClient};
pub use raw::{FilmKind, IdScope, RawBookItem, RawCatalogItem, RawFilmItem, RawGameItem};
pub use rawg::{RawgClient, RawgConfig};
pub use tmdb::{TmdbClient, TmdbConfig};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to an upstream catalog.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing or rejected API key).
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs carry API keys in the query string
        ProviderError::Http(error.without_url())
    }
}

/// Identity of an upstream catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderSource {
    /// Bibliographic catalog (Google Books shaped).
    Books,
    /// Film/TV catalog (TMDB shaped).
    Tmdb,
    /// Game catalog (RAWG shaped).
    Rawg,
}

impl ProviderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderSource::Books => "books",
            ProviderSource::Tmdb => "tmdb",
            ProviderSource::Rawg => "rawg",
        }
    }

    /// Prefix that namespaces this provider's item ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ProviderSource::Books => "book",
            ProviderSource::Tmdb => "tmdb",
            ProviderSource::Rawg => "rawg",
        }
    }

    /// Whether the provider needs a credential to be available.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, ProviderSource::Books)
    }

    pub fn reviewer_label(&self) -> &'static str {
        match self {
            ProviderSource::Books => "Google Books Readers",
            ProviderSource::Tmdb => "TMDB Community",
            ProviderSource::Rawg => "RAWG Players",
        }
    }

    pub fn avatar_initials(&self) -> &'static str {
        match self {
            ProviderSource::Books => "GB",
            ProviderSource::Tmdb => "TM",
            ProviderSource::Rawg => "RG",
        }
    }
}

impl fmt::Display for ProviderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which popular list to pull when no user text is given.
///
/// Only the film/TV catalog distinguishes scopes; the others serve their
/// single kind for every scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendingScope {
    #[default]
    Mixed,
    Movies,
    Shows,
}

/// Trait for upstream catalog clients.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Which catalog this is.
    fn source(&self) -> ProviderSource;

    /// Free-text search. Implementations may return more than `limit` items.
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError>;

    /// Popular/recent items, from a native trending endpoint or a fixed seed query.
    async fn trending(
        &self,
        scope: TrendingScope,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError>;
}
