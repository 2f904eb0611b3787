//! Collision detection and influence response
//!
//! The interesting physics of the game: ball/wall bounces and the
//! paddle rebound that couples hit position (angle) with paddle motion
//! (inertia). Checks run in a fixed order each tick because every
//! correction can feed the next: vertical bounds first, then the left
//! paddle, then the right.

use super::entity::{Ball, Paddle};
use super::state::Side;
use crate::tuning::Tuning;

/// Bounce the ball off the top/bottom playfield bounds.
///
/// `top`/`bottom` are the inner faces of the walls. Position is clamped so
/// a deep overlap cannot trigger twice.
pub fn bounce_vertical(ball: &mut Ball, top: f32, bottom: f32) -> bool {
    let mut hit = false;
    let floor = bottom - ball.kin.size.height;

    if ball.kin.pos.y <= top {
        ball.kin.pos.y = top;
        ball.kin.vel.y = ball.kin.vel.y.abs();
        hit = true;
    }
    if ball.kin.pos.y >= floor {
        ball.kin.pos.y = floor;
        ball.kin.vel.y = -ball.kin.vel.y.abs();
        hit = true;
    }
    hit
}

/// Resolve a ball/paddle overlap, if any.
///
/// On overlap the ball is pushed flush against the paddle face it came
/// from, its horizontal velocity is forced away from the paddle, and the
/// influence rebound is applied. Returns whether a hit happened.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, side: Side, tuning: &Tuning) -> bool {
    if !ball.kin.aabb().overlaps(&paddle.kin.aabb()) {
        return false;
    }

    match side {
        Side::Left => {
            ball.kin.pos.x = paddle.kin.pos.x + paddle.kin.size.width;
            ball.kin.vel.x = ball.kin.vel.x.abs();
        }
        Side::Right => {
            ball.kin.pos.x = paddle.kin.pos.x - ball.kin.size.width;
            ball.kin.vel.x = -ball.kin.vel.x.abs();
        }
    }

    apply_influence(ball, paddle, tuning);
    true
}

/// Deflection: vertical velocity from hit offset plus paddle inertia,
/// clamped, then the per-hit horizontal speed-up.
fn apply_influence(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) {
    let half_height = paddle.kin.size.height / 2.0;
    let offset = if half_height > 0.0 {
        ((ball.kin.center_y() - paddle.kin.center_y()) / half_height).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    let new_vy = offset * tuning.base_deflect_vy + paddle.last_vy * tuning.inertia_factor;
    ball.kin.vel.y = new_vy.clamp(-tuning.max_deflect_vy, tuning.max_deflect_vy);

    ball.kin.vel.x *= tuning.rally_speedup;
    if let Some(cap) = tuning.speed_cap {
        ball.kin.vel.x = ball.kin.vel.x.clamp(-cap, cap);
    }
}
