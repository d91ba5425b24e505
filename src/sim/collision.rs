//! Collision detection and scoring for player/platform contact
//!
//! Landing uses a swept test: after integration, the player's lower edge must
//! lie inside the platform's top band extended by this step's fall distance.
//! That catches fast falls that would otherwise skip over a thin platform.

use std::collections::HashSet;

use super::platform::{Platform, PlatformKey};
use super::player::Player;
use crate::tuning::BounceMode;

/// True if the (already integrated) player landed on `platform` this step
pub fn sweeps_onto(player: &Player, platform: &Platform) -> bool {
    let vy = player.vel.y;
    let bottom = player.bottom();

    vy > 0.0
        && player.left() < platform.right()
        && player.right() > platform.x
        && bottom > platform.y
        && bottom < platform.y + platform.height + vy
}

/// Bounce off the first platform the player landed on, if any
///
/// Returns the key of the platform that was hit.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) -> Option<PlatformKey> {
    let platform = platforms.iter().find(|p| sweeps_onto(player, p))?;
    player.bounce_from(platform.y);
    Some(platform.key)
}

/// Result of crediting one bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Award {
    pub scored: bool,
    pub milestone: bool,
}

/// Session score plus the set of platforms that already paid out
#[derive(Debug, Clone, Default)]
pub struct ScoreKeeper {
    score: u64,
    touched: HashSet<PlatformKey>,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Credit a bounce on `key`
    ///
    /// In manual mode each platform scores once per session; auto-jump scores
    /// every bounce. A milestone is flagged whenever the new score is a
    /// multiple of `milestone_every`.
    pub fn award(&mut self, key: PlatformKey, mode: BounceMode, milestone_every: u64) -> Award {
        let fresh = match mode {
            BounceMode::Manual => self.touched.insert(key),
            BounceMode::AutoJump => true,
        };
        if !fresh {
            return Award::default();
        }

        self.score += 1;
        Award {
            scored: true,
            milestone: milestone_every > 0 && self.score % milestone_every == 0,
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.touched.clear();
    }
}
