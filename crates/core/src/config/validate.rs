use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Debounce interval is not 0
/// - Every display budget and per-provider cap is at least 1
/// - Every provider request timeout is at least 1 second
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let discovery = &config.discovery;
    if discovery.debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "discovery.debounce_ms cannot be 0".to_string(),
        ));
    }

    let budgets = [
        ("discovery.search_limit", discovery.search_limit),
        ("discovery.trending_limit", discovery.trending_limit),
        ("discovery.search_caps.film", discovery.search_caps.film),
        ("discovery.search_caps.game", discovery.search_caps.game),
        ("discovery.search_caps.book", discovery.search_caps.book),
        ("discovery.trending_caps.film", discovery.trending_caps.film),
        ("discovery.trending_caps.game", discovery.trending_caps.game),
        ("discovery.trending_caps.book", discovery.trending_caps.book),
        ("discovery.feed_per_category", discovery.feed_per_category),
        ("discovery.feed_featured", discovery.feed_featured),
        ("discovery.feed_more", discovery.feed_more),
    ];
    if let Some((name, _)) = budgets.iter().find(|(_, value)| *value == 0) {
        return Err(ConfigError::ValidationError(format!("{} cannot be 0", name)));
    }

    let providers = &config.providers;
    let timeouts = [
        Some(("providers.books.timeout_secs", providers.books.timeout_secs)),
        providers
            .tmdb
            .as_ref()
            .map(|t| ("providers.tmdb.timeout_secs", t.timeout_secs)),
        providers
            .rawg
            .as_ref()
            .map(|r| ("providers.rawg.timeout_secs", r.timeout_secs)),
    ];
    if let Some((name, _)) = timeouts.iter().flatten().find(|(_, secs)| *secs == 0) {
        return Err(ConfigError::ValidationError(format!("{} cannot be 0", name)));
    }

    Ok(())
}
