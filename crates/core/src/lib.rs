pub mod config;
pub mod discovery;
pub mod media;
pub mod metrics;
pub mod presentation;
pub mod provider;
pub mod random;
pub mod session;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ProvidersConfig,
    SanitizedConfig,
};
pub use discovery::{
    DiscoveryConfig, DiscoveryMode, DiscoveryOrchestrator, DiscoveryOutcome, DiscoveryRequest,
    HomeFeed, ProviderAvailability, ProviderCaps, ProviderSet,
};
pub use media::{FeedCategory, FeedItem, MediaItem, MediaKind, MissingRatingPolicy, Rating};
pub use presentation::{
    CategoryStats, FeedCard, FeedFilter, FeedView, Glyph, Panel, ResultCard, SearchView, Thumbnail,
};
pub use provider::{
    CatalogProvider, ProviderAdapter, ProviderError, ProviderSource, RawCatalogItem,
    TrendingScope,
};
pub use random::Randomness;
pub use session::{ControllerState, SearchSession, SessionError};
