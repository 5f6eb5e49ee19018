//! Raw provider items and their total mappings into the normalized model.
//!
//! Each provider client parses its own JSON into exactly one variant of
//! [`RawCatalogItem`]; nothing untyped crosses the adapter boundary.

use serde::{Deserialize, Serialize};

use crate::media::{
    genre_label, rescale_rating, secure_url, year_of, year_or_placeholder, FeedItem, MediaItem,
    MediaKind, Rating,
};

use super::ProviderSource;

/// Whether an item id belongs to a search or a trending result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    Search,
    Trending,
}

impl IdScope {
    fn prefix(&self) -> &'static str {
        match self {
            IdScope::Search => "",
            IdScope::Trending => "trend-",
        }
    }
}

/// One item as returned by an upstream catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum RawCatalogItem {
    Book(RawBookItem),
    Film(RawFilmItem),
    Game(RawGameItem),
}

impl RawCatalogItem {
    pub fn source(&self) -> ProviderSource {
        match self {
            RawCatalogItem::Book(_) => ProviderSource::Books,
            RawCatalogItem::Film(_) => ProviderSource::Tmdb,
            RawCatalogItem::Game(_) => ProviderSource::Rawg,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            RawCatalogItem::Book(_) => MediaKind::Book,
            RawCatalogItem::Film(film) => film.kind.media_kind(),
            RawCatalogItem::Game(_) => MediaKind::Game,
        }
    }

    /// Compact mapping used by the search dropdown.
    pub fn into_media_item(self, scope: IdScope) -> MediaItem {
        match self {
            RawCatalogItem::Book(book) => book.into_media_item(scope),
            RawCatalogItem::Film(film) => film.into_media_item(scope),
            RawCatalogItem::Game(game) => game.into_media_item(scope),
        }
    }

    /// Extended mapping used by the home feed. `fallback` supplies the rating
    /// for items the upstream has not rated.
    pub fn into_feed_item(self, fallback: &dyn Fn() -> Rating) -> FeedItem {
        match self {
            RawCatalogItem::Book(book) => book.into_feed_item(fallback),
            RawCatalogItem::Film(film) => film.into_feed_item(fallback),
            RawCatalogItem::Game(game) => game.into_feed_item(fallback),
        }
    }
}

fn attributed(item: MediaItem, year: String, genre: String, source: ProviderSource) -> FeedItem {
    FeedItem {
        item,
        year,
        genre,
        reviewer_label: source.reviewer_label().to_string(),
        avatar_initials: source.avatar_initials().to_string(),
        featured: false,
    }
}

fn rating_or(measured: Option<f32>, fallback: &dyn Fn() -> Rating) -> Rating {
    measured.map(Rating::Measured).unwrap_or_else(fallback)
}

// ============================================================================
// Book catalog
// ============================================================================

/// A volume from the book catalog. Native rating scale is 0-5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBookItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RawBookItem {
    const NATIVE_SCALE: f32 = 5.0;

    fn id(&self, scope: IdScope) -> String {
        format!("{}{}-{}", scope.prefix(), ProviderSource::Books.id_prefix(), self.id)
    }

    fn subtitle(&self) -> Option<String> {
        let authors: Vec<&str> = self
            .authors
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .collect();
        (!authors.is_empty()).then(|| authors.join(", "))
    }

    fn rating(&self) -> Option<f32> {
        rescale_rating(self.average_rating, Self::NATIVE_SCALE)
    }

    pub fn into_media_item(self, scope: IdScope) -> MediaItem {
        MediaItem {
            id: self.id(scope),
            subtitle: self.subtitle(),
            image_url: self.thumbnail.as_deref().map(secure_url),
            kind: MediaKind::Book,
            rating: Rating::measured_or_unrated(self.rating()),
            title: self.title,
        }
    }

    pub fn into_feed_item(self, fallback: &dyn Fn() -> Rating) -> FeedItem {
        let year = year_or_placeholder(self.published_date.as_deref());
        let genre = genre_label(&self.categories);
        let rating = rating_or(self.rating(), fallback);
        let mut item = self.into_media_item(IdScope::Trending);
        item.rating = rating;
        attributed(item, year, genre, ProviderSource::Books)
    }
}

// ============================================================================
// Film/TV catalog
// ============================================================================

/// Movie or series, as tagged by the film/TV catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilmKind {
    Movie,
    Tv,
}

impl FilmKind {
    pub fn media_kind(&self) -> MediaKind {
        match self {
            FilmKind::Movie => MediaKind::Movie,
            FilmKind::Tv => MediaKind::Tv,
        }
    }
}

/// Poster size for the compact dropdown.
const POSTER_THUMB_SIZE: &str = "w92";
/// Backdrop size for the home feed.
const BACKDROP_SIZE: &str = "w780";
/// Poster size for the home feed when no backdrop exists.
const POSTER_FEED_SIZE: &str = "w500";

/// A movie or series from the film/TV catalog. Native rating scale is 0-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFilmItem {
    pub id: u64,
    pub kind: FilmKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Path relative to `image_base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    pub image_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl RawFilmItem {
    const NATIVE_SCALE: f32 = 10.0;

    fn id(&self, scope: IdScope) -> String {
        // Movie and series ids are separate namespaces upstream.
        format!(
            "{}{}-{}-{}",
            scope.prefix(),
            ProviderSource::Tmdb.id_prefix(),
            self.kind.media_kind(),
            self.id
        )
    }

    fn image(&self, size: &str, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        let base = self.image_base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Some(secure_url(&format!("{}/{}/{}", base, size, path)))
    }

    fn rating(&self) -> Option<f32> {
        rescale_rating(self.vote_average, Self::NATIVE_SCALE)
    }

    pub fn into_media_item(self, scope: IdScope) -> MediaItem {
        MediaItem {
            id: self.id(scope),
            subtitle: year_of(self.release_date.as_deref()),
            image_url: self.image(POSTER_THUMB_SIZE, self.poster_path.as_deref()),
            kind: self.kind.media_kind(),
            rating: Rating::measured_or_unrated(self.rating()),
            title: self.title,
        }
    }

    pub fn into_feed_item(self, fallback: &dyn Fn() -> Rating) -> FeedItem {
        let year = year_or_placeholder(self.release_date.as_deref());
        let genre = genre_label(&self.genres);
        let rating = rating_or(self.rating(), fallback);
        let image = self
            .image(BACKDROP_SIZE, self.backdrop_path.as_deref())
            .or_else(|| self.image(POSTER_FEED_SIZE, self.poster_path.as_deref()));

        let mut item = self.into_media_item(IdScope::Trending);
        item.rating = rating;
        item.image_url = image;
        attributed(item, year, genre, ProviderSource::Tmdb)
    }
}

// ============================================================================
// Game catalog
// ============================================================================

/// A game from the game catalog. Native rating scale is 0-5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGameItem {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl RawGameItem {
    const NATIVE_SCALE: f32 = 5.0;

    fn id(&self, scope: IdScope) -> String {
        format!("{}{}-{}", scope.prefix(), ProviderSource::Rawg.id_prefix(), self.id)
    }

    fn normalized_rating(&self) -> Option<f32> {
        rescale_rating(self.rating, Self::NATIVE_SCALE)
    }

    pub fn into_media_item(self, scope: IdScope) -> MediaItem {
        MediaItem {
            id: self.id(scope),
            subtitle: year_of(self.released.as_deref()),
            image_url: self
                .background_image
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .map(secure_url),
            kind: MediaKind::Game,
            rating: Rating::measured_or_unrated(self.normalized_rating()),
            title: self.name,
        }
    }

    pub fn into_feed_item(self, fallback: &dyn Fn() -> Rating) -> FeedItem {
        let year = year_or_placeholder(self.released.as_deref());
        let genre = genre_label(&self.genres);
        let rating = rating_or(self.normalized_rating(), fallback);
        let mut item = self.into_media_item(IdScope::Trending);
        item.rating = rating;
        attributed(item, year, genre, ProviderSource::Rawg)
    }
}
