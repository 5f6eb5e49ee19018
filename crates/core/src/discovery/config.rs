//! Discovery configuration.

use serde::{Deserialize, Deserializer, Serialize};

use crate::media::MissingRatingPolicy;

/// Per-provider contribution caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCaps {
    /// Film/TV catalog.
    pub film: usize,
    /// Game catalog.
    pub game: usize,
    /// Book catalog.
    pub book: usize,
}

/// Configuration for search, trending and the home feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Quiet interval before a typed query is sent (milliseconds).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Merged dropdown budget in active-search mode.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Merged dropdown budget in trending mode.
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,

    /// Per-provider caps in active-search mode.
    /// A provider can never dominate the dropdown purely by response size.
    #[serde(default = "default_search_caps", deserialize_with = "search_caps")]
    pub search_caps: ProviderCaps,

    /// Per-provider caps in trending mode.
    #[serde(default = "default_trending_caps", deserialize_with = "trending_caps")]
    pub trending_caps: ProviderCaps,

    /// Items fetched per home feed category.
    #[serde(default = "default_feed_per_category")]
    pub feed_per_category: usize,

    /// Items flagged featured after the feed shuffle.
    #[serde(default = "default_feed_featured")]
    pub feed_featured: usize,

    /// Non-featured grid size; items past it are dropped.
    #[serde(default = "default_feed_more")]
    pub feed_more: usize,

    /// How the home feed shows items the upstream has not rated.
    #[serde(default)]
    pub missing_rating: MissingRatingPolicy,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_search_limit() -> usize {
    9
}

fn default_trending_limit() -> usize {
    6
}

fn default_search_caps() -> ProviderCaps {
    ProviderCaps {
        film: 4,
        game: 3,
        book: 3,
    }
}

fn default_trending_caps() -> ProviderCaps {
    ProviderCaps {
        film: 3,
        game: 3,
        book: 3,
    }
}

fn default_feed_per_category() -> usize {
    8
}

fn default_feed_featured() -> usize {
    3
}

fn default_feed_more() -> usize {
    12
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            search_limit: default_search_limit(),
            trending_limit: default_trending_limit(),
            search_caps: default_search_caps(),
            trending_caps: default_trending_caps(),
            feed_per_category: default_feed_per_category(),
            feed_featured: default_feed_featured(),
            feed_more: default_feed_more(),
            missing_rating: MissingRatingPolicy::default(),
        }
    }
}

/// A cap table with every field optional; omitted fields keep the defaults
/// of the table being configured.
#[derive(Deserialize)]
struct CapsPatch {
    film: Option<usize>,
    game: Option<usize>,
    book: Option<usize>,
}

impl CapsPatch {
    fn over(self, base: ProviderCaps) -> ProviderCaps {
        ProviderCaps {
            film: self.film.unwrap_or(base.film),
            game: self.game.unwrap_or(base.game),
            book: self.book.unwrap_or(base.book),
        }
    }
}

fn search_caps<'de, D>(deserializer: D) -> Result<ProviderCaps, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(CapsPatch::deserialize(deserializer)?.over(default_search_caps()))
}

fn trending_caps<'de, D>(deserializer: D) -> Result<ProviderCaps, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(CapsPatch::deserialize(deserializer)?.over(default_trending_caps()))
}
