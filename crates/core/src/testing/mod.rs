//! Testing utilities and mock implementations.
//!
//! [`MockProvider`] stands in for any upstream catalog so orchestration and
//! search sessions can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use blitz_core::testing::{MockProvider, fixtures};
//! use blitz_core::provider::ProviderSource;
//!
//! let books = Arc::new(MockProvider::new(ProviderSource::Books));
//! books.set_results(vec![fixtures::book("1", "Dune", Some(4.2))]).await;
//!
//! let providers = ProviderSet::new(books.clone(), None, None);
//! ```

mod mock_provider;

pub use mock_provider::{CallKind, MockProvider, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::provider::{FilmKind, RawBookItem, RawCatalogItem, RawFilmItem, RawGameItem};

    /// Image base used by film fixtures.
    pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

    /// Create a book with an author and cover. `rating` is on the native 0-5 scale.
    pub fn book(id: &str, title: &str, rating: Option<f32>) -> RawCatalogItem {
        RawCatalogItem::Book(RawBookItem {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Frank Herbert".to_string()],
            average_rating: rating,
            published_date: Some("1965-08-01".to_string()),
            thumbnail: Some(format!("http://books.google.com/{}.jpg", id)),
            categories: vec!["Fiction".to_string()],
        })
    }

    /// Create a movie. `rating` is on the native 0-10 scale.
    pub fn film(id: u64, title: &str, rating: Option<f32>) -> RawCatalogItem {
        RawCatalogItem::Film(film_item(id, FilmKind::Movie, title, rating))
    }

    /// Create a series. `rating` is on the native 0-10 scale.
    pub fn show(id: u64, title: &str, rating: Option<f32>) -> RawCatalogItem {
        RawCatalogItem::Film(film_item(id, FilmKind::Tv, title, rating))
    }

    fn film_item(id: u64, kind: FilmKind, title: &str, rating: Option<f32>) -> RawFilmItem {
        RawFilmItem {
            id,
            kind,
            title: title.to_string(),
            release_date: Some("2021-09-15".to_string()),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            backdrop_path: Some(format!("/backdrop-{}.jpg", id)),
            image_base_url: IMAGE_BASE_URL.to_string(),
            vote_average: rating,
            genres: vec!["Science Fiction".to_string(), "Adventure".to_string()],
        }
    }

    /// Create a game. `rating` is on the native 0-5 scale.
    pub fn game(id: u64, name: &str, rating: Option<f32>) -> RawCatalogItem {
        RawCatalogItem::Game(RawGameItem {
            id,
            name: name.to_string(),
            released: Some("2022-04-26".to_string()),
            rating,
            genres: vec!["Strategy".to_string()],
            background_image: Some(format!("https://media.rawg.io/media/games/{}.jpg", id)),
        })
    }

    /// `count` distinct books titled "`prefix` N".
    pub fn books(prefix: &str, count: usize) -> Vec<RawCatalogItem> {
        (1..=count)
            .map(|i| {
                book(
                    &format!("{}-{}", prefix.to_lowercase(), i),
                    &format!("{} {}", prefix, i),
                    Some(4.0),
                )
            })
            .collect()
    }

    /// `count` distinct movies titled "`prefix` N".
    pub fn films(prefix: &str, count: usize) -> Vec<RawCatalogItem> {
        (1..=count as u64)
            .map(|i| film(i, &format!("{} {}", prefix, i), Some(7.0)))
            .collect()
    }

    /// `count` distinct games titled "`prefix` N".
    pub fn games(prefix: &str, count: usize) -> Vec<RawCatalogItem> {
        (1..=count as u64)
            .map(|i| game(i, &format!("{} {}", prefix, i), Some(4.0)))
            .collect()
    }
}
