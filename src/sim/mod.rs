//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only (the CPU aim error is the sole source of randomness)
//! - Fixed system priority order; re-ordering changes observable gameplay
//! - No rendering or platform dependencies beyond the Surface trait

pub mod collision;
pub mod cpu;
pub mod entity;
pub mod scheduler;
pub mod state;
pub mod systems;

pub use collision::{bounce_vertical, resolve_paddle_hit};
pub use cpu::{AimErrorPolicy, CpuConfig, CpuController, Difficulty};
pub use entity::{Aabb, Ball, GeometryError, Kinematics, Paddle, Size};
pub use scheduler::Scheduler;
pub use state::{MatchState, Player, Score, Side};
pub use systems::{System, World, standard_systems};
