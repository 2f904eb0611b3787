//! Kinematic entities: the ball and the two paddles
//!
//! Both entities share [`Kinematics`]: position, size, velocity and a
//! per-entity time scale used by slow motion. Geometry is validated once at
//! construction; after that the update path is pure arithmetic.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid geometry handed to an entity constructor
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("entity size must be finite and positive, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
    #[error("non-finite {what} component")]
    NonFinite { what: &'static str },
}

/// Rectangle dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Axis-aligned bounding box for overlap tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Position/size/velocity state shared by ball and paddles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub pos: Vec2,
    pub size: Size,
    pub vel: Vec2,
    /// Scales the effective `dt` for this entity only (slow motion)
    pub time_scale: f32,
}

impl Kinematics {
    pub fn new(pos: Vec2, size: Size, vel: Vec2) -> Result<Self, GeometryError> {
        if !pos.is_finite() {
            return Err(GeometryError::NonFinite { what: "position" });
        }
        if !vel.is_finite() {
            return Err(GeometryError::NonFinite { what: "velocity" });
        }
        Ok(Self {
            pos,
            size,
            vel,
            time_scale: 1.0,
        })
    }

    /// Integrate one step: `pos += vel * dt * time_scale`
    pub fn step(&mut self, dt: f32) {
        self.pos += self.vel * dt * self.time_scale;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.pos,
            max: self.pos + Vec2::new(self.size.width, self.size.height),
        }
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.height / 2.0
    }
}

/// A player (or CPU) paddle, clamped to the vertical playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub kin: Kinematics,
    /// Vertical speed applied while an intent flag is set
    pub speed: f32,
    pub moving_up: bool,
    pub moving_down: bool,
    /// Clamp bound for the bottom edge
    pub window_height: f32,
    /// Effective vertical velocity observed last tick, feeds rebound inertia
    pub last_vy: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Size, speed: f32, window_height: f32) -> Result<Self, GeometryError> {
        Ok(Self {
            kin: Kinematics::new(pos, size, Vec2::ZERO)?,
            speed,
            moving_up: false,
            moving_down: false,
            window_height,
            last_vy: 0.0,
        })
    }

    /// Derive velocity from the intent flags, integrate, clamp to the field.
    ///
    /// A paddle pinned against a wall records `last_vy = 0`, so it
    /// contributes no inertia to a rebound on that frame.
    pub fn update(&mut self, dt: f32) {
        let vy = if self.moving_up {
            -self.speed
        } else if self.moving_down {
            self.speed
        } else {
            0.0
        };

        self.kin.vel.y = vy;
        self.kin.step(dt);

        let floor = self.window_height - self.kin.size.height;
        if self.kin.pos.y <= 0.0 || self.kin.pos.y >= floor {
            self.kin.pos.y = self.kin.pos.y.clamp(0.0, floor);
            self.last_vy = 0.0;
        } else {
            self.last_vy = vy * self.kin.time_scale;
        }
    }
}

/// The ball, with free 2D motion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub kin: Kinematics,
    /// Serve velocity remembered at creation, reused on rally reset
    pub base_vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, size: Size, vel: Vec2) -> Result<Self, GeometryError> {
        Ok(Self {
            kin: Kinematics::new(pos, size, vel)?,
            base_vel: vel,
        })
    }

    pub fn update(&mut self, dt: f32) {
        self.kin.step(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle(y: f32) -> Paddle {
        Paddle::new(
            Vec2::new(20.0, y),
            Size::new(10.0, 100.0).unwrap(),
            300.0,
            500.0,
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_size() {
        assert!(matches!(
            Size::new(0.0, 100.0),
            Err(GeometryError::InvalidSize { .. })
        ));
        assert!(matches!(
            Size::new(10.0, -1.0),
            Err(GeometryError::InvalidSize { .. })
        ));
        assert!(matches!(
            Size::new(f32::NAN, 10.0),
            Err(GeometryError::InvalidSize { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_position() {
        let size = Size::new(10.0, 10.0).unwrap();
        let err = Kinematics::new(Vec2::new(f32::INFINITY, 0.0), size, Vec2::ZERO);
        assert_eq!(err, Err(GeometryError::NonFinite { what: "position" }));
    }

    #[test]
    fn intent_flags_drive_velocity() {
        let mut p = paddle(200.0);
        p.moving_up = true;
        p.update(0.1);
        assert_eq!(p.kin.pos.y, 170.0);
        assert_eq!(p.last_vy, -300.0);

        p.moving_up = false;
        p.moving_down = true;
        p.update(0.1);
        assert_eq!(p.kin.pos.y, 200.0);
        assert_eq!(p.last_vy, 300.0);
    }

    #[test]
    fn pinned_paddle_has_no_inertia() {
        let mut p = paddle(2.0);
        p.moving_up = true;
        p.update(0.1);
        assert_eq!(p.kin.pos.y, 0.0);
        assert_eq!(p.last_vy, 0.0);
    }

    #[test]
    fn time_scale_slows_integration() {
        let mut p = paddle(200.0);
        p.kin.time_scale = 0.25;
        p.moving_down = true;
        p.update(0.1);
        assert_eq!(p.kin.pos.y, 207.5);
        assert_eq!(p.last_vy, 75.0);
    }

    #[test]
    fn aabb_overlap() {
        let size = Size::new(10.0, 10.0).unwrap();
        let a = Kinematics::new(Vec2::ZERO, size, Vec2::ZERO).unwrap();
        let b = Kinematics::new(Vec2::new(5.0, 5.0), size, Vec2::ZERO).unwrap();
        let c = Kinematics::new(Vec2::new(20.0, 0.0), size, Vec2::ZERO).unwrap();
        assert!(a.aabb().overlaps(&b.aabb()));
        assert!(!a.aabb().overlaps(&c.aabb()));
    }

    proptest! {
        /// Paddle stays within [0, window_height - height] for any dt/start
        #[test]
        fn paddle_clamped_for_all_dt(
            start in 0.0f32..400.0,
            dt in 0.0f32..5.0,
            up in proptest::bool::ANY,
        ) {
            let mut p = paddle(start);
            p.moving_up = up;
            p.moving_down = !up;
            p.update(dt);
            prop_assert!(p.kin.pos.y >= 0.0);
            prop_assert!(p.kin.pos.y <= p.window_height - p.kin.size.height);
        }
    }
}
