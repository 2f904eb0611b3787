//! Shared match state
//!
//! The one aggregate touched by multiple systems. The scheduler's priority
//! order is what keeps concurrent mutation coherent; nothing here locks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TRAIL_LENGTH;

/// Match participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    P1,
    P2,
}

/// Playfield side; P1 defends the left, P2 the right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Points per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

/// Shared mutable state for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub score: Score,
    pub winning_score: u32,
    pub winner: Option<Player>,

    /// Edge-triggered: set by scoring, consumed once by the reset system
    pub reset_rally: bool,
    /// Horizontal sign of the next serve (-1 or +1)
    pub reset_rally_direction: Option<i8>,
    /// Completed serves, used to re-roll per-rally CPU aim error
    pub rally: u64,

    // god-mode walls
    pub wall_left: bool,
    pub wall_right: bool,
    pub wall_height: f32,
    pub god_mode_p1: bool,
    pub god_mode_p2: bool,

    // toggles / debug
    pub slow_mo: bool,
    pub cpu_vs_cpu: bool,
    pub trail_mode: bool,
    /// Recent ball positions, newest last, bounded to [`TRAIL_LENGTH`]
    pub trail: Vec<Vec2>,
    pub photo_mode: bool,
}

impl MatchState {
    pub fn new(winning_score: u32, wall_height: f32) -> Self {
        Self {
            score: Score::default(),
            winning_score,
            winner: None,
            reset_rally: false,
            reset_rally_direction: None,
            rally: 0,
            wall_left: false,
            wall_right: false,
            wall_height,
            god_mode_p1: false,
            god_mode_p2: false,
            slow_mo: false,
            cpu_vs_cpu: false,
            trail_mode: false,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            photo_mode: false,
        }
    }

    /// Award a point and mark the rally for reset.
    ///
    /// The serve heads back toward the conceding side: +1 after the ball
    /// left on the left edge, -1 after the right edge.
    pub fn award_point(&mut self, scorer: Side) {
        match scorer {
            Side::Right => {
                self.score.right += 1;
                self.reset_rally_direction = Some(1);
            }
            Side::Left => {
                self.score.left += 1;
                self.reset_rally_direction = Some(-1);
            }
        }
        self.reset_rally = true;
        log::info!("score: {} - {}", self.score.left, self.score.right);
    }

    /// Record the winner once; later calls for the same match are ignored.
    pub fn record_winner(&mut self, player: Player) {
        if self.winner.is_none() {
            self.winner = Some(player);
            log::info!("winner: {player:?}");
        }
    }

    pub fn push_trail(&mut self, pos: Vec2) {
        if self.trail.len() == TRAIL_LENGTH {
            self.trail.remove(0);
        }
        self.trail.push(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_sets_reset_flag_and_direction() {
        let mut state = MatchState::new(10, 5.0);
        state.award_point(Side::Right);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert!(state.reset_rally);
        assert_eq!(state.reset_rally_direction, Some(1));

        state.reset_rally = false;
        state.award_point(Side::Left);
        assert_eq!(state.score.left, 1);
        assert!(state.reset_rally);
        assert_eq!(state.reset_rally_direction, Some(-1));
    }

    #[test]
    fn winner_is_sticky() {
        let mut state = MatchState::new(2, 5.0);
        state.record_winner(Player::P1);
        state.record_winner(Player::P2);
        assert_eq!(state.winner, Some(Player::P1));
    }

    #[test]
    fn trail_is_bounded_newest_last() {
        let mut state = MatchState::new(10, 5.0);
        for i in 0..25 {
            state.push_trail(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(state.trail.len(), TRAIL_LENGTH);
        assert_eq!(state.trail.last().unwrap().x, 24.0);
        assert_eq!(state.trail[0].x, 10.0);
    }
}
