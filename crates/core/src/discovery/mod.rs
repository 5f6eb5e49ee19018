//! Multi-provider discovery: dropdown search, trending and the home feed.
//!
//! Every run fans out to the available providers concurrently and waits for
//! all of them. Adapters never fail, so a run always settles with a (possibly
//! empty) merged list.

mod config;
mod feed;
mod orchestrator;
mod providers;

pub use config::{DiscoveryConfig, ProviderCaps};
pub use feed::HomeFeed;
pub use orchestrator::{DiscoveryMode, DiscoveryOrchestrator, DiscoveryOutcome, DiscoveryRequest};
pub use providers::{ProviderAvailability, ProviderSet};
