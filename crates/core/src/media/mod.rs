//! Normalized media model shared by every provider, the orchestrator and the
//! presentation layer.

mod normalize;
mod types;

pub use normalize::{
    genre_label, rescale_rating, secure_url, year_of, year_or_placeholder, NOT_AVAILABLE,
};
pub use types::*;
