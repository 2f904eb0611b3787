//! Game settings and preferences
//!
//! Owned by the host; scenes read and mutate them through the scene
//! context. Nothing here persists to disk, but the whole bundle
//! serializes so a host that wants to keep it somewhere can.

use serde::{Deserialize, Serialize};

use crate::consts::WINNING_SCORE;
use crate::sim::cpu::{AimErrorPolicy, Difficulty};

/// Player-facing knobs for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// CPU difficulty level
    pub difficulty: Difficulty,
    /// First score to reach this wins
    pub winning_score: u32,
    /// When the CPU re-rolls its aim error
    pub aim_error_policy: AimErrorPolicy,
    /// Seed for the match RNG; fixed seeds reproduce whole matches
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            winning_score: WINNING_SCORE,
            aim_error_policy: AimErrorPolicy::PerController,
            seed: 0,
        }
    }
}

impl Settings {
    /// Advance to the next difficulty level, wrapping at the end.
    pub fn cycle_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
        log::info!("difficulty: {}", self.difficulty.as_str());
    }
}
