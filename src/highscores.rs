//! Persisted best score
//!
//! A single integer stored as decimal text. Anything unreadable counts as 0.

use crate::persistence::KeyValueStore;
use crate::sim::HighScoreStore;

pub struct HighScore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "endlessHighScore";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Parse a stored value; malformed text falls back to 0
///
/// Strict: `"12abc"` and `"3.5"` are rejected outright rather than read as a
/// numeric prefix, so a corrupted entry never yields a partial score.
pub fn parse_high_score(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(score) => score,
        Err(err) => {
            log::warn!("Ignoring malformed high score {:?}: {}", raw, err);
            0
        }
    }
}

impl<S: KeyValueStore> HighScoreStore for HighScore<S> {
    fn load_high_score(&mut self) -> u64 {
        match self.store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let score = parse_high_score(&raw);
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Could not read high score: {}", err);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u64) {
        match self.store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(err) => log::warn!("Could not save high score: {}", err),
        }
    }
}
