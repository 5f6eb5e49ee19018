use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::discovery::DiscoveryConfig;
use crate::provider::{BooksConfig, RawgConfig, TmdbConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Upstream catalog configuration.
///
/// The book catalog needs no credential and is always present. The film/TV
/// and game catalogs are optional: a missing section or an empty `api_key`
/// makes that provider unavailable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub books: BooksConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rawg: Option<RawgConfig>,
}

impl ProvidersConfig {
    /// TMDB credential, if one is configured and non-empty.
    pub fn tmdb_credential(&self) -> Option<&TmdbConfig> {
        self.tmdb.as_ref().filter(|c| !c.api_key.trim().is_empty())
    }

    /// RAWG credential, if one is configured and non-empty.
    pub fn rawg_credential(&self) -> Option<&RawgConfig> {
        self.rawg.as_ref().filter(|c| !c.api_key.trim().is_empty())
    }
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub providers: SanitizedProvidersConfig,
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProvidersConfig {
    pub books: BooksConfig,
    pub tmdb: SanitizedCredential,
    pub rawg: SanitizedCredential,
}

/// A credentialed provider with its key hidden.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCredential {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let providers = &config.providers;
        Self {
            server: config.server.clone(),
            providers: SanitizedProvidersConfig {
                books: providers.books.clone(),
                tmdb: SanitizedCredential {
                    api_key_configured: providers.tmdb_credential().is_some(),
                    base_url: providers.tmdb.as_ref().and_then(|t| t.base_url.clone()),
                },
                rawg: SanitizedCredential {
                    api_key_configured: providers.rawg_credential().is_some(),
                    base_url: providers.rawg.as_ref().and_then(|r| r.base_url.clone()),
                },
            },
            discovery: config.discovery.clone(),
        }
    }
}
