//! Book catalog client (Google Books volumes API shape).
//!
//! No credential is required. There is no trending endpoint, so trending
//! queries a fixed subject ordered by newest.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{build_client, decode_json};
use super::raw::{RawBookItem, RawCatalogItem};
use super::{CatalogProvider, ProviderError, ProviderSource, TrendingScope};

/// The API refuses `maxResults` above this.
const MAX_RESULTS: usize = 40;

/// Book catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksConfig {
    /// Base URL (default: https://www.googleapis.com/books/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Subject used as the trending seed query.
    #[serde(default = "default_trending_subject")]
    pub trending_subject: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_trending_subject() -> String {
    "fiction".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            trending_subject: default_trending_subject(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Book catalog client.
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    trending_subject: String,
}

impl GoogleBooksClient {
    /// Create a new book catalog client.
    pub fn new(config: BooksConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout_secs)?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://www.googleapis.com/books/v1".to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            trending_subject: config.trending_subject,
        })
    }

    async fn volumes(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        let url = format!("{}/volumes", self.base_url);

        let response = self.client.get(&url).query(params).send().await?;
        let page: VolumesResponse = decode_json(response, "book catalog").await?;

        Ok(page
            .items
            .into_iter()
            .filter_map(Volume::into_raw)
            .map(RawCatalogItem::Book)
            .collect())
    }
}

#[async_trait]
impl CatalogProvider for GoogleBooksClient {
    fn source(&self) -> ProviderSource {
        ProviderSource::Books
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        debug!("Book search: query='{}', limit={}", query, limit);

        let max_results = limit.clamp(1, MAX_RESULTS).to_string();
        self.volumes(&[("q", query), ("maxResults", max_results.as_str())])
            .await
    }

    async fn trending(
        &self,
        _scope: TrendingScope,
        limit: usize,
    ) -> Result<Vec<RawCatalogItem>, ProviderError> {
        debug!(
            "Book trending: subject='{}', limit={}",
            self.trending_subject, limit
        );

        let query = format!("subject:{}", self.trending_subject);
        let max_results = limit.clamp(1, MAX_RESULTS).to_string();
        self.volumes(&[
            ("q", query.as_str()),
            ("orderBy", "newest"),
            ("maxResults", max_results.as_str()),
        ])
        .await
    }
}

// ============================================================================
// API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: String,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    average_rating: Option<f32>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    small_thumbnail: Option<String>,
    thumbnail: Option<String>,
}

impl Volume {
    /// Volumes without a title are dropped.
    fn into_raw(self) -> Option<RawBookItem> {
        let info = self.volume_info;
        let title = info.title.filter(|t| !t.trim().is_empty())?;
        let thumbnail = info
            .image_links
            .and_then(|links| links.small_thumbnail.or(links.thumbnail));

        Some(RawBookItem {
            id: self.id,
            title,
            authors: info.authors,
            average_rating: info.average_rating,
            published_date: info.published_date,
            thumbnail,
            categories: info.categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_response_parsing() {
        let json = r#"{
            "kind": "books#volumes",
            "totalItems": 2,
            "items": [
                {
                    "id": "B1hSG45JCX4C",
                    "volumeInfo": {
                        "title": "Dune",
                        "authors": ["Frank Herbert"],
                        "publishedDate": "2003",
                        "averageRating": 4,
                        "categories": ["Fiction"],
                        "imageLinks": {
                            "smallThumbnail": "http://books.google.com/small.jpg",
                            "thumbnail": "http://books.google.com/thumb.jpg"
                        }
                    }
                },
                {
                    "id": "untitled",
                    "volumeInfo": {}
                }
            ]
        }"#;

        let page: VolumesResponse = serde_json::from_str(json).unwrap();
        let books: Vec<RawBookItem> = page.items.into_iter().filter_map(Volume::into_raw).collect();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "B1hSG45JCX4C");
        assert_eq!(books[0].authors, vec!["Frank Herbert"]);
        assert_eq!(books[0].average_rating, Some(4.0));
        assert_eq!(
            books[0].thumbnail.as_deref(),
            Some("http://books.google.com/small.jpg")
        );
    }

    #[test]
    fn test_empty_response_has_no_items() {
        let page: VolumesResponse =
            serde_json::from_str(r#"{"kind": "books#volumes", "totalItems": 0}"#).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_falls_back_to_large_thumbnail() {
        let json = r#"{
            "id": "x",
            "volumeInfo": {
                "title": "Hyperion",
                "imageLinks": { "thumbnail": "http://books.google.com/thumb.jpg" }
            }
        }"#;
        let volume: Volume = serde_json::from_str(json).unwrap();
        let book = volume.into_raw().unwrap();
        assert_eq!(
            book.thumbnail.as_deref(),
            Some("http://books.google.com/thumb.jpg")
        );
        assert!(book.authors.is_empty());
    }
}
