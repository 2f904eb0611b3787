//! CPU opponent controller
//!
//! A per-tick decision function: look at the ball, set the owned paddle's
//! intent flags, never touch anything else. Imperfection comes from a
//! seeded aim offset so demo runs and tests stay reproducible.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Paddle};
use super::state::Side;

/// Difficulty parameter bundle for a CPU paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuConfig {
    /// Paddle speed while an intent flag is set (units/sec)
    pub max_speed: f32,
    /// Alignment tolerance below which the paddle stops (prevents jitter)
    pub dead_zone: f32,
    /// Horizontal gap at which the CPU starts reacting
    pub reaction_distance: f32,
    /// Aim error sampled from [-error_margin, +error_margin]
    pub error_margin: f32,
}

/// Named difficulty levels, each resolving to a [`CpuConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    /// Look up a difficulty by name; unknown names fall back to `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "normal" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            "insane" => Difficulty::Insane,
            other => {
                log::warn!("unknown difficulty {other:?}, using normal");
                Difficulty::Normal
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }

    /// Next level in the cycle, wrapping after `Insane`
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Insane,
            Difficulty::Insane => Difficulty::Easy,
        }
    }

    /// Preset table. Speed rises and tolerances shrink with difficulty;
    /// insane reacts from anywhere on the field.
    pub fn config(&self) -> CpuConfig {
        match self {
            Difficulty::Easy => CpuConfig {
                max_speed: 180.0,
                dead_zone: 18.0,
                reaction_distance: 140.0,
                error_margin: 40.0,
            },
            Difficulty::Normal => CpuConfig {
                max_speed: 240.0,
                dead_zone: 10.0,
                reaction_distance: 170.0,
                error_margin: 28.0,
            },
            Difficulty::Hard => CpuConfig {
                max_speed: 300.0,
                dead_zone: 6.0,
                reaction_distance: 220.0,
                error_margin: 16.0,
            },
            Difficulty::Insane => CpuConfig {
                max_speed: 380.0,
                dead_zone: 3.0,
                reaction_distance: f32::INFINITY,
                error_margin: 4.0,
            },
        }
    }
}

/// When the CPU re-rolls its aim error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimErrorPolicy {
    /// One offset for the controller's whole lifetime
    #[default]
    PerController,
    /// Fresh offset at every serve
    PerRally,
}

/// Reactive controller for one paddle
#[derive(Debug, Clone)]
pub struct CpuController {
    side: Side,
    config: CpuConfig,
    policy: AimErrorPolicy,
    rng: Pcg32,
    aim_offset: f32,
    last_rally: u64,
}

impl CpuController {
    pub fn new(side: Side, config: CpuConfig, policy: AimErrorPolicy, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let aim_offset = Self::roll_offset(&mut rng, config.error_margin);
        Self {
            side,
            config,
            policy,
            rng,
            aim_offset,
            last_rally: 0,
        }
    }

    fn roll_offset(rng: &mut Pcg32, margin: f32) -> f32 {
        if margin > 0.0 {
            rng.random_range(-margin..=margin)
        } else {
            0.0
        }
    }

    fn stop(paddle: &mut Paddle) {
        paddle.moving_up = false;
        paddle.moving_down = false;
    }

    /// Decide this tick's movement intent for the owned paddle.
    ///
    /// `rally` is the match's serve counter; under `PerRally` a change
    /// re-rolls the aim offset.
    pub fn update(&mut self, paddle: &mut Paddle, ball: &Ball, rally: u64) {
        // Keep paddle speed consistent with the difficulty bundle
        paddle.speed = self.config.max_speed;

        if self.policy == AimErrorPolicy::PerRally && rally != self.last_rally {
            self.last_rally = rally;
            self.aim_offset = Self::roll_offset(&mut self.rng, self.config.error_margin);
        }

        // React only while the ball travels toward our side
        let incoming = match self.side {
            Side::Right => ball.kin.vel.x > 0.0,
            Side::Left => ball.kin.vel.x < 0.0,
        };
        if !incoming {
            Self::stop(paddle);
            return;
        }

        // Engage only once the ball is close enough
        let gap = match self.side {
            Side::Right => paddle.kin.pos.x - (ball.kin.pos.x + ball.kin.size.width),
            Side::Left => ball.kin.pos.x - (paddle.kin.pos.x + paddle.kin.size.width),
        };
        if gap > self.config.reaction_distance {
            Self::stop(paddle);
            return;
        }

        let target = ball.kin.center_y() + self.aim_offset;
        let diff = target - paddle.kin.center_y();

        if diff.abs() < self.config.dead_zone {
            Self::stop(paddle);
            return;
        }

        if diff < 0.0 {
            paddle.moving_up = true;
            paddle.moving_down = false;
        } else {
            paddle.moving_up = false;
            paddle.moving_down = true;
        }
    }
}
