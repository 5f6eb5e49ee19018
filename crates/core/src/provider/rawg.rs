//! Game catalog client (RAWG API shape).
//!
//! RAWG requires an API key. Trending is the "most added" ordering.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{build_client, decode_json};
use super::raw::{RawCatalogItem, RawGameItem};
use super::{CatalogProvider, ProviderError, ProviderSource, TrendingScope};

/// The API refuses `page_size` above this.
const MAX_PAGE_SIZE: usize = 40;

/// RAWG API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawgConfig {
    /// RAWG API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.rawg.io/api).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

/// RAWG API client.
pub struct RawgClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RawgClient {
    /// Create a new RAWG client.
    pub fn new(config: RawgConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "RAWG API key is required".to_string(),
            ));
        }

        let client = build_client(config.timeout_secs)?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.rawg.io/api".to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    async fn games(&self, params: &[(&str, &str)]) -> Result<Vec<RawCatalogItem>, ProviderError> {
        let url = format!("{}/games", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let page: RawgPage = decode_json(response, "RAWG").await?;

        Ok(page
            .results
            .into_iter()
            .filter_map(RawgGame::into_raw)
            .map(RawCatalogItem::Game)
            .collect())
    }
}

#[async_trait]
impl CatalogProvider for RawgClient {
    fn source(&self) -> ProviderSource {
        ProviderSource::Rawg
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        debug!("RAWG search: query='{}', limit={}", query, limit);

        let page_size = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        self.games(&[("search", query), ("page_size", page_size.as_str())])
            .await
    }

    async fn trending(
        &self,
        _scope: TrendingScope,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        debug!("RAWG most added: limit={}", limit);

        let page_size = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        self.games(&[("ordering", "-added"), ("page_size", page_size.as_str())])
            .await
    }
}

// ============================================================================
// RAWG API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawgPage {
    #[serde(default)]
    results: Vec<RawgGame>,
}

#[derive(Debug, Deserialize)]
struct RawgGame {
    id: u64,
    name: Option<String>,
    released: Option<String>,
    rating: Option<f32>,
    background_image: Option<String>,
    #[serde(default)]
    genres: Vec<RawgGenre>,
}

#[derive(Debug, Deserialize)]
struct RawgGenre {
    name: String,
}

impl RawgGame {
    fn into_raw(self) -> Option<RawGameItem> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(RawGameItem {
            id: self.id,
            name,
            released: self.released,
            rating: self.rating,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            background_image: self.background_image,
        })
    }
}
