//! Data-driven game balance
//!
//! Every number that shapes how a rally feels lives here, so hosts can
//! override balance from a JSON blob without recompiling. Defaults mirror
//! the constants in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters for the physics and rally rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Vertical speed from a full-edge hit on a stationary paddle
    pub base_deflect_vy: f32,
    /// Fraction of the paddle's velocity carried into the rebound
    pub inertia_factor: f32,
    /// Hard clamp on rebound vertical speed
    pub max_deflect_vy: f32,
    /// Horizontal speed multiplier applied on every paddle hit
    pub rally_speedup: f32,
    /// Optional cap on horizontal speed; `None` lets rallies accelerate
    /// without bound, matching the original behavior
    pub speed_cap: Option<f32>,
    /// Serve velocity magnitudes used on rally reset
    pub serve_vx: f32,
    pub serve_vy: f32,
    /// Time scale applied to slowed entities
    pub slow_mo_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_deflect_vy: BASE_DEFLECT_VY,
            inertia_factor: INERTIA_FACTOR,
            max_deflect_vy: MAX_DEFLECT_VY,
            rally_speedup: RALLY_SPEEDUP,
            speed_cap: None,
            serve_vx: SERVE_VX,
            serve_vy: SERVE_VY,
            slow_mo_factor: SLOW_MO_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
