//! Injectable randomness for trending/feed shuffles and estimated ratings.
//!
//! Production code uses an entropy-seeded source; tests pass a fixed seed so
//! merge order is reproducible.

use std::sync::{Mutex, MutexGuard};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Lower bound of an estimated placeholder rating.
pub const ESTIMATED_RATING_MIN: f32 = 7.0;
/// Upper bound of an estimated placeholder rating.
pub const ESTIMATED_RATING_MAX: f32 = 9.0;

/// Shared, seedable source of randomness.
#[derive(Debug)]
pub struct Randomness {
    rng: Mutex<StdRng>,
}

impl Randomness {
    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Deterministic source for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic while shuffling leaves the generator usable.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        items.shuffle(&mut *self.rng());
    }

    /// Placeholder rating in 7.0-9.0, rounded to one decimal.
    pub fn estimated_rating(&self) -> f32 {
        let value: f32 = self
            .rng()
            .random_range(ESTIMATED_RATING_MIN..=ESTIMATED_RATING_MAX);
        (value * 10.0).round() / 10.0
    }
}

impl Default for Randomness {
    fn default() -> Self {
        Self::from_entropy()
    }
}
