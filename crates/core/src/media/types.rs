//! Types for normalized media items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of a media item. Fixed per adapter, never inferred from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Book,
    Movie,
    Tv,
    Game,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Book => "book",
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Game => "game",
        }
    }

    /// Home feed category this kind belongs to.
    pub fn category(&self) -> FeedCategory {
        match self {
            MediaKind::Book => FeedCategory::Books,
            MediaKind::Movie => FeedCategory::Movies,
            MediaKind::Tv => FeedCategory::Shows,
            MediaKind::Game => FeedCategory::Games,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rating on the common 0-10 scale.
///
/// `Estimated` values are placeholders drawn for display, never measured
/// upstream, and must not be presented as a real score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rating {
    Measured(f32),
    Estimated(f32),
    Unrated,
}

impl Rating {
    /// A measured rating, or `Unrated` when none is available.
    pub fn measured_or_unrated(value: Option<f32>) -> Self {
        value.map(Rating::Measured).unwrap_or(Rating::Unrated)
    }

    /// Displayed value, if any.
    pub fn value(&self) -> Option<f32> {
        match self {
            Rating::Measured(v) | Rating::Estimated(v) => Some(*v),
            Rating::Unrated => None,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Rating::Measured(_))
    }

    /// Stars out of five, `round(value / 2)`.
    pub fn stars(&self) -> u8 {
        self.value()
            .map(|v| (v / 2.0).round().clamp(0.0, 5.0) as u8)
            .unwrap_or(0)
    }
}

/// What to show on the home feed when an upstream item carries no rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRatingPolicy {
    /// Surface `Rating::Unrated`.
    #[default]
    Unrated,
    /// Draw a placeholder in 7.0-9.0, tagged `Rating::Estimated`.
    Estimated,
}

/// The normalized unit returned by every adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Provider-prefixed id, unique within a result set.
    pub id: String,
    pub title: String,
    /// Author list or release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Cover or poster URL, always on the secure scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub kind: MediaKind,
    pub rating: Rating,
}

/// Home feed categories, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedCategory {
    Movies,
    Shows,
    Games,
    Books,
}

impl FeedCategory {
    pub const ALL: [FeedCategory; 4] = [
        FeedCategory::Movies,
        FeedCategory::Shows,
        FeedCategory::Games,
        FeedCategory::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedCategory::Movies => "movies",
            FeedCategory::Shows => "shows",
            FeedCategory::Games => "games",
            FeedCategory::Books => "books",
        }
    }
}

impl FromStr for FeedCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movies" => Ok(FeedCategory::Movies),
            "shows" => Ok(FeedCategory::Shows),
            "games" => Ok(FeedCategory::Games),
            "books" => Ok(FeedCategory::Books),
            other => Err(format!("Unknown feed category: {}", other)),
        }
    }
}

/// Extended item used by the home feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub item: MediaItem,
    /// Release year, or `"N/A"`.
    pub year: String,
    /// Genre label, or `"N/A"`.
    pub genre: String,
    /// Provider attribution, not a real critic.
    pub reviewer_label: String,
    pub avatar_initials: String,
    /// Assigned by the orchestrator, never by a provider.
    #[serde(default)]
    pub featured: bool,
}

impl FeedItem {
    pub fn category(&self) -> FeedCategory {
        self.item.kind.category()
    }
}
