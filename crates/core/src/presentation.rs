//! Logic-only view contract for the search dropdown and the home feed.
//!
//! Nothing here fetches or styles anything: views are plain data derived
//! from controller state or a [`HomeFeed`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::discovery::HomeFeed;
use crate::media::{FeedCategory, FeedItem, MediaItem, MediaKind};
use crate::session::{ControllerState, SearchMachine};

// ============================================================================
// Search dropdown
// ============================================================================

/// Category glyph shown in place of a missing cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Book,
    Film,
    Tv,
    Gamepad,
}

impl From<MediaKind> for Glyph {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Book => Glyph::Book,
            MediaKind::Movie => Glyph::Film,
            MediaKind::Tv => Glyph::Tv,
            MediaKind::Game => Glyph::Gamepad,
        }
    }
}

/// Cover image, or the category glyph. Never a placeholder fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Thumbnail {
    Image(String),
    Glyph(Glyph),
}

impl Thumbnail {
    pub fn for_item(item: &MediaItem) -> Self {
        match &item.image_url {
            Some(url) => Thumbnail::Image(url.clone()),
            None => Thumbnail::Glyph(Glyph::from(item.kind)),
        }
    }
}

/// One row of the dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultCard {
    #[serde(flatten)]
    pub item: MediaItem,
    pub thumbnail: Thumbnail,
}

impl From<MediaItem> for ResultCard {
    fn from(item: MediaItem) -> Self {
        let thumbnail = Thumbnail::for_item(&item);
        Self { item, thumbnail }
    }
}

/// What the dropdown body shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Panel {
    Loading,
    Trending { items: Vec<ResultCard> },
    Results { items: Vec<ResultCard> },
    NoResults,
}

/// Snapshot of one search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchView {
    pub query: String,
    pub state: ControllerState,
    /// Whether the dropdown is shown.
    pub open: bool,
    pub panel: Panel,
    /// The last settled search skipped an unconfigured provider.
    pub config_notice: bool,
    pub generation: u64,
}

impl SearchView {
    pub fn of(machine: &SearchMachine) -> Self {
        let state = machine.state();

        let panel = match state {
            ControllerState::Idle => match machine.trending() {
                Some(trending) => Panel::Trending {
                    items: cards(&trending.items),
                },
                None => Panel::Loading,
            },
            ControllerState::Pending | ControllerState::InFlight => Panel::Loading,
            ControllerState::Settled => match machine.search() {
                Some(search) if !search.items.is_empty() => Panel::Results {
                    items: cards(&search.items),
                },
                _ => Panel::NoResults,
            },
        };

        let config_notice = state == ControllerState::Settled
            && machine.search().is_some_and(|s| s.config_notice);

        Self {
            query: machine.input().to_string(),
            state,
            open: machine.is_open(),
            panel,
            config_notice,
            generation: machine.generation(),
        }
    }
}

fn cards(items: &[MediaItem]) -> Vec<ResultCard> {
    items.iter().cloned().map(ResultCard::from).collect()
}

// ============================================================================
// Home feed
// ============================================================================

/// Category tab on the home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFilter {
    #[default]
    All,
    Category(FeedCategory),
}

impl FromStr for FeedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(FeedFilter::All);
        }
        s.parse().map(FeedFilter::Category)
    }
}

impl Serialize for FeedFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeedFilter::All => serializer.serialize_str("all"),
            FeedFilter::Category(category) => serializer.serialize_str(category.as_str()),
        }
    }
}

/// A feed card with its star count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedCard {
    #[serde(flatten)]
    pub item: FeedItem,
    /// Out of five; zero when unrated.
    pub stars: u8,
}

impl From<&FeedItem> for FeedCard {
    fn from(item: &FeedItem) -> Self {
        Self {
            stars: item.item.rating.stars(),
            item: item.clone(),
        }
    }
}

/// Count and measured average for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: FeedCategory,
    pub count: usize,
    /// Mean of measured ratings, one decimal. Estimated ratings never count.
    pub average_rating: Option<f32>,
}

impl CategoryStats {
    /// Stats for every category, in tab order.
    pub fn compute<'a>(items: impl Iterator<Item = &'a FeedItem> + Clone) -> Vec<Self> {
        FeedCategory::ALL
            .iter()
            .map(|category| {
                let in_category = items.clone().filter(|i| i.category() == *category);
                let count = in_category.clone().count();
                let measured: Vec<f32> = in_category
                    .filter(|i| i.item.rating.is_measured())
                    .filter_map(|i| i.item.rating.value())
                    .collect();
                let average_rating = (!measured.is_empty()).then(|| {
                    let mean = measured.iter().sum::<f32>() / measured.len() as f32;
                    (mean * 10.0).round() / 10.0
                });
                Self {
                    category: *category,
                    count,
                    average_rating,
                }
            })
            .collect()
    }
}

/// The home page for one category tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedView {
    pub filter: FeedFilter,
    /// Featured strip; empty unless the filter is `All`.
    pub featured: Vec<FeedCard>,
    pub items: Vec<FeedCard>,
    /// Always computed over the whole feed.
    pub stats: Vec<CategoryStats>,
}

impl FeedView {
    /// `All` shows the featured strip and the grid; a category shows every
    /// item of that category, featured ones included, and no strip.
    pub fn build(feed: &HomeFeed, filter: FeedFilter) -> Self {
        let (featured, items) = match filter {
            FeedFilter::All => (
                feed.featured.iter().map(FeedCard::from).collect(),
                feed.more.iter().map(FeedCard::from).collect(),
            ),
            FeedFilter::Category(category) => (
                Vec::new(),
                feed.iter()
                    .filter(|i| i.category() == category)
                    .map(FeedCard::from)
                    .collect(),
            ),
        };

        Self {
            filter,
            featured,
            items,
            stats: CategoryStats::compute(feed.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{DiscoveryMode, DiscoveryOutcome};
    use crate::media::Rating;
    use crate::provider::IdScope;
    use crate::session::ControllerEvent;
    use crate::testing::fixtures;

    fn outcome(mode: DiscoveryMode, items: Vec<MediaItem>, notice: bool) -> DiscoveryOutcome {
        DiscoveryOutcome {
            mode,
            query: None,
            items,
            skipped: Vec::new(),
            config_notice: notice,
            duration_ms: 0,
        }
    }

    fn settle(machine: &mut SearchMachine, text: &str, result: DiscoveryOutcome) {
        machine.handle(ControllerEvent::InputChanged(text.to_string()));
        machine.handle(ControllerEvent::TimerFired);
        machine.handle(ControllerEvent::ResultSettled {
            generation: machine.generation(),
            outcome: result,
        });
    }

    #[test]
    fn test_idle_before_trending_is_loading() {
        let view = SearchView::of(&SearchMachine::new());
        assert_eq!(view.panel, Panel::Loading);
        assert!(!view.config_notice);
    }

    #[test]
    fn test_idle_shows_trending_without_notice() {
        let mut machine = SearchMachine::new();
        let item = fixtures::book("1", "Dune", None).into_media_item(IdScope::Trending);
        machine.handle(ControllerEvent::TrendingSettled(outcome(
            DiscoveryMode::Trending,
            vec![item],
            false,
        )));

        let view = SearchView::of(&machine);
        assert!(matches!(view.panel, Panel::Trending { ref items } if items.len() == 1));
        assert!(!view.config_notice);
    }

    #[test]
    fn test_settled_empty_is_no_results() {
        let mut machine = SearchMachine::new();
        settle(&mut machine, "zzz", outcome(DiscoveryMode::Search, Vec::new(), true));

        let view = SearchView::of(&machine);
        assert_eq!(view.panel, Panel::NoResults);
        assert!(view.config_notice);
    }

    #[test]
    fn test_pending_shows_loading_and_hides_notice() {
        let mut machine = SearchMachine::new();
        settle(&mut machine, "dune", outcome(DiscoveryMode::Search, Vec::new(), true));
        machine.handle(ControllerEvent::InputChanged("dune 2".to_string()));

        let view = SearchView::of(&machine);
        assert_eq!(view.panel, Panel::Loading);
        assert!(!view.config_notice);
    }

    #[test]
    fn test_missing_cover_uses_glyph() {
        let mut item = fixtures::show(1, "Severance", None).into_media_item(IdScope::Search);
        item.image_url = None;
        assert_eq!(Thumbnail::for_item(&item), Thumbnail::Glyph(Glyph::Tv));

        let item = fixtures::game(1, "Hades", None).into_media_item(IdScope::Search);
        assert!(matches!(
            Thumbnail::for_item(&item),
            Thumbnail::Image(url) if url.starts_with("https://")
        ));
    }

    fn feed() -> HomeFeed {
        let feed_item =
            |raw: crate::provider::RawCatalogItem| raw.into_feed_item(&|| Rating::Unrated);
        let mut featured = vec![
            feed_item(fixtures::film(1, "Dune", Some(8.0))),
            feed_item(fixtures::book("b1", "Hyperion", Some(4.0))),
        ];
        for item in &mut featured {
            item.featured = true;
        }
        HomeFeed {
            featured,
            more: vec![
                feed_item(fixtures::film(2, "Arrival", Some(7.0))),
                feed_item(fixtures::film(3, "Tenet", None)),
                feed_item(fixtures::game(1, "Hades", Some(4.5))),
            ],
        }
    }

    #[test]
    fn test_all_filter_shows_strip_and_grid() {
        let view = FeedView::build(&feed(), FeedFilter::All);
        assert_eq!(view.featured.len(), 2);
        assert_eq!(view.items.len(), 3);
    }

    #[test]
    fn test_category_filter_includes_featured_and_drops_strip() {
        let view = FeedView::build(&feed(), FeedFilter::Category(FeedCategory::Movies));
        assert!(view.featured.is_empty());
        assert_eq!(view.items.len(), 3);
        assert!(view.items[0].item.featured);
    }

    #[test]
    fn test_stats_average_measured_only() {
        let view = FeedView::build(&feed(), FeedFilter::All);
        let movies = &view.stats[0];
        assert_eq!(movies.category, FeedCategory::Movies);
        assert_eq!(movies.count, 3);
        assert_eq!(movies.average_rating, Some(7.5));

        let shows = &view.stats[1];
        assert_eq!(shows.count, 0);
        assert_eq!(shows.average_rating, None);
    }

    #[test]
    fn test_stars_follow_rating() {
        let view = FeedView::build(&feed(), FeedFilter::Category(FeedCategory::Games));
        assert_eq!(view.items[0].stars, 5);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("ALL".parse::<FeedFilter>(), Ok(FeedFilter::All));
        assert_eq!(
            "games".parse::<FeedFilter>(),
            Ok(FeedFilter::Category(FeedCategory::Games))
        );
        assert!("music".parse::<FeedFilter>().is_err());
    }
}
