//! Film/TV catalog client (TMDB API shape).
//!
//! TMDB requires an API key for access. Search uses the multi-type endpoint
//! and keeps only movies and series; trending uses the native trending feeds.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{build_client, decode_json};
use super::raw::{FilmKind, RawCatalogItem, RawFilmItem};
use super::{CatalogProvider, ProviderError, ProviderSource, TrendingScope};

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters/backdrops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    image_base_url: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = build_client(config.timeout_secs)?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        let image_base_url = config
            .image_base_url
            .unwrap_or_else(|| "https://image.tmdb.org/t/p".to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            image_base_url,
        })
    }

    async fn fetch(
        &self,
        path: &str,
        params: &[(&str, &str)],
        default_kind: Option<FilmKind>,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let page: TmdbPage = decode_json(response, "TMDB").await?;

        Ok(page
            .results
            .into_iter()
            .filter_map(|r| r.into_raw(default_kind, &self.image_base_url))
            .map(RawCatalogItem::Film)
            .collect())
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    fn source(&self) -> ProviderSource {
        ProviderSource::Tmdb
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        debug!("TMDB multi search: query='{}', limit={}", query, limit);

        self.fetch(
            "/search/multi",
            &[("query", query), ("include_adult", "false")],
            None,
        )
        .await
    }

    async fn trending(
        &self,
        scope: TrendingScope,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        debug!("TMDB trending: scope={:?}, limit={}", scope, limit);

        let (path, default_kind) = match scope {
            TrendingScope::Mixed => ("/trending/all/day", None),
            TrendingScope::Movies => ("/trending/movie/week", Some(FilmKind::Movie)),
            TrendingScope::Shows => ("/trending/tv/week", Some(FilmKind::Tv)),
        };

        self.fetch(path, &[], default_kind).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    results: Vec<TmdbResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbResult {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

impl TmdbResult {
    /// People and untitled entries are dropped.
    fn into_raw(self, default_kind: Option<FilmKind>, image_base_url: &str) -> Option<RawFilmItem> {
        let kind = match self.media_type.as_deref() {
            Some("movie") => FilmKind::Movie,
            Some("tv") => FilmKind::Tv,
            Some(_) => return None,
            None => default_kind?,
        };

        let title = self
            .title
            .or(self.name)
            .filter(|t| !t.trim().is_empty())?;

        let release_date = self
            .release_date
            .or(self.first_air_date)
            .filter(|d| !d.trim().is_empty());

        Some(RawFilmItem {
            id: self.id,
            kind,
            title,
            release_date,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            image_base_url: image_base_url.to_string(),
            vote_average: self.vote_average,
            genres: self
                .genre_ids
                .iter()
                .filter_map(|id| genre_name(*id))
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Genre names for the ids TMDB returns in list endpoints (movie and TV lists combined).
fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        10759 => "Action & Adventure",
        10762 => "Kids",
        10763 => "News",
        10764 => "Reality",
        10765 => "Sci-Fi & Fantasy",
        10766 => "Soap",
        10767 => "Talk",
        10768 => "War & Politics",
        _ => return None,
    };
    Some(name)
}
