//! Duel Pong - a two-paddle ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, CPU opponent,
//!   match state, priority-scheduled systems)
//! - `scenes`: Scene variants (menu, match, pause) and the action executors
//! - `surface`: Drawing capability the host injects
//! - `input`: Decoded input commands
//! - `tuning`: Data-driven game balance
//! - `cheats`: Key-sequence cheat matchers

pub mod cheats;
pub mod input;
pub mod scenes;
pub mod settings;
pub mod sim;
pub mod surface;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Horizontal gap between a paddle and its playfield edge
    pub const PADDLE_INSET: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Serve speed; the horizontal sign follows the rally direction
    pub const SERVE_VX: f32 = 250.0;
    pub const SERVE_VY: f32 = 200.0;

    /// Top/bottom wall thickness
    pub const WALL_HEIGHT: f32 = 5.0;

    /// First score to reach this wins the match
    pub const WINNING_SCORE: u32 = 10;

    /// Vertical speed imparted by an edge hit on a stationary paddle
    pub const BASE_DEFLECT_VY: f32 = 220.0;
    /// How much of the paddle's own velocity carries into the rebound
    pub const INERTIA_FACTOR: f32 = 0.3;
    /// Clamp on the rebound vertical speed
    pub const MAX_DEFLECT_VY: f32 = 400.0;
    /// Horizontal speed multiplier per paddle hit
    pub const RALLY_SPEEDUP: f32 = 1.03;

    /// Time scale applied to slowed entities
    pub const SLOW_MO_FACTOR: f32 = 0.25;

    /// Ball positions kept for trail rendering
    pub const TRAIL_LENGTH: usize = 15;
}
