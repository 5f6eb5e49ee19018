//! Home feed assembly: merge, shuffle, split into featured and grid.

use serde::{Deserialize, Serialize};

use crate::media::FeedItem;
use crate::random::Randomness;

/// The home page feed after the shuffle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    /// Flagged `featured = true`; chosen by position, not quality.
    pub featured: Vec<FeedItem>,
    /// The standard grid.
    pub more: Vec<FeedItem>,
}

impl HomeFeed {
    /// Merge category lists in the given order, shuffle, flag the first
    /// `featured` items and keep up to `more` after them. The rest is dropped.
    pub fn assemble(
        categories: Vec<Vec<FeedItem>>,
        featured: usize,
        more: usize,
        randomness: &Randomness,
    ) -> Self {
        let mut merged: Vec<FeedItem> = categories.into_iter().flatten().collect();
        randomness.shuffle(&mut merged);
        merged.truncate(featured.saturating_add(more));

        let grid = if merged.len() > featured {
            merged.split_off(featured)
        } else {
            Vec::new()
        };

        for item in &mut merged {
            item.featured = true;
        }

        Self {
            featured: merged,
            more: grid,
        }
    }

    pub fn len(&self) -> usize {
        self.featured.len() + self.more.len()
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.more.is_empty()
    }

    /// Featured items first, then the grid.
    pub fn iter(&self) -> impl Iterator<Item = &FeedItem> + Clone {
        self.featured.iter().chain(self.more.iter())
    }
}
