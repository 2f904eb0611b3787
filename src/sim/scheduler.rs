//! Priority-ordered system scheduler
//!
//! Owns no game rules. Keeps systems sorted by ascending priority (stable
//! for ties) and runs the update pass then the draw pass over every enabled
//! slot. Disabling a slot removes it from both passes without losing its
//! place in the order.

use super::systems::{System, World, standard_systems};
use crate::surface::Surface;

struct Slot {
    enabled: bool,
    system: Box<dyn System>,
}

/// Ordered collection of systems, run every frame
pub struct Scheduler {
    slots: Vec<Slot>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// The full match pipeline for a world, in contract order.
    pub fn standard(world: &World) -> Self {
        let mut scheduler = Self::new();
        for system in standard_systems(world) {
            scheduler.add(system);
        }
        scheduler
    }

    /// Insert keeping ascending priority; equal priorities keep insertion
    /// order.
    pub fn add(&mut self, system: Box<dyn System>) {
        let priority = system.priority();
        let idx = self
            .slots
            .partition_point(|slot| slot.system.priority() <= priority);
        self.slots.insert(
            idx,
            Slot {
                enabled: true,
                system,
            },
        );
    }

    /// Toggle a system in or out of both passes; returns false if no system
    /// has that name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.system.name() == name)
        {
            Some(slot) => {
                slot.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn on_enter(&mut self, world: &mut World) {
        for slot in &mut self.slots {
            slot.system.on_enter(world);
        }
    }

    pub fn update(&mut self, world: &mut World, dt: f32) {
        for slot in &mut self.slots {
            if slot.enabled {
                slot.system.update(world, dt);
            }
        }
    }

    pub fn draw(&self, world: &World, surface: &mut dyn Surface) {
        for slot in &self.slots {
            if slot.enabled {
                slot.system.draw(world, surface);
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Player;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::new(&Settings::default(), Tuning::default()).unwrap()
    }

    fn match_pipeline(world: &mut World) -> Scheduler {
        let mut scheduler = Scheduler::standard(world);
        scheduler.on_enter(world);
        scheduler
    }

    struct Probe {
        name: &'static str,
        priority: i32,
    }

    impl System for Probe {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn update(&mut self, world: &mut World, _dt: f32) {
            world.pending_keys.push(self.name.chars().next().unwrap());
        }
    }

    #[test]
    fn runs_in_ascending_priority_regardless_of_insertion() {
        let mut w = world();
        let mut scheduler = Scheduler::new();
        scheduler.add(Box::new(Probe {
            name: "c",
            priority: 90,
        }));
        scheduler.add(Box::new(Probe {
            name: "a",
            priority: 10,
        }));
        scheduler.add(Box::new(Probe {
            name: "b",
            priority: 50,
        }));

        scheduler.update(&mut w, DT);
        assert_eq!(w.pending_keys, vec!['a', 'b', 'c']);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut w = world();
        let mut scheduler = Scheduler::new();
        scheduler.add(Box::new(Probe {
            name: "x",
            priority: 50,
        }));
        scheduler.add(Box::new(Probe {
            name: "y",
            priority: 50,
        }));
        scheduler.update(&mut w, DT);
        assert_eq!(w.pending_keys, vec!['x', 'y']);
    }

    #[test]
    fn disabled_system_skips_both_passes() {
        let mut w = world();
        let mut scheduler = Scheduler::new();
        scheduler.add(Box::new(Probe {
            name: "x",
            priority: 50,
        }));
        assert!(scheduler.set_enabled("x", false));
        scheduler.update(&mut w, DT);
        assert!(w.pending_keys.is_empty());

        assert!(scheduler.set_enabled("x", true));
        scheduler.update(&mut w, DT);
        assert_eq!(w.pending_keys, vec!['x']);

        assert!(!scheduler.set_enabled("nope", false));
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let mut w1 = world();
        let mut w2 = world();
        let mut s1 = match_pipeline(&mut w1);
        let mut s2 = match_pipeline(&mut w2);

        // long enough to include paddle hits, scores and resets
        for _ in 0..(60 * 30) {
            s1.update(&mut w1, DT);
            s2.update(&mut w2, DT);
        }

        assert_eq!(w1.ball.kin.pos, w2.ball.kin.pos);
        assert_eq!(w1.ball.kin.vel, w2.ball.kin.vel);
        assert_eq!(w1.right_paddle.kin.pos, w2.right_paddle.kin.pos);
        assert_eq!(w1.state.score, w2.state.score);
    }

    #[test]
    fn scoring_edge_runs_exactly_once_then_resets() {
        let mut w = world();
        let mut scheduler = match_pipeline(&mut w);

        // park the ball fully past the left edge, heading out
        w.ball.kin.pos.x = -1.0;
        w.ball.kin.vel.x = -250.0;
        scheduler.update(&mut w, DT);
        assert_eq!(w.state.score.right, 1);
        assert!(w.state.reset_rally);
        assert_eq!(w.state.reset_rally_direction, Some(1));

        // next frame consumes the reset without a second score
        scheduler.update(&mut w, DT);
        assert_eq!(w.state.score.right, 1);
        assert!(!w.state.reset_rally);
        assert!(w.ball.kin.vel.x > 0.0);
    }

    #[test]
    fn god_mode_wall_keeps_score_unchanged() {
        let mut w = world();
        let mut scheduler = match_pipeline(&mut w);
        w.state.god_mode_p1 = true;
        w.ball.kin.pos.x = -1.0;
        w.ball.kin.vel.x = -250.0;

        scheduler.update(&mut w, DT);
        assert_eq!(w.state.score.right, 0);
        assert!(w.ball.kin.pos.x >= 0.0);
        assert!(w.ball.kin.vel.x > 0.0);
    }

    #[test]
    fn cheat_sequence_flows_through_the_pipeline() {
        let mut w = world();
        let mut scheduler = match_pipeline(&mut w);
        w.pending_keys.extend(['c', 'p', 'u']);
        scheduler.update(&mut w, DT);
        assert!(w.state.cpu_vs_cpu);
    }

    #[test]
    fn match_reaches_a_sticky_winner() {
        let mut w = world();
        w.state.winning_score = 2;
        let mut scheduler = match_pipeline(&mut w);
        w.state.cpu_vs_cpu = true;

        let mut frames = 0;
        while w.state.winner.is_none() && frames < 60 * 600 {
            scheduler.update(&mut w, DT);
            frames += 1;
        }

        let winner = w.state.winner.expect("someone should win eventually");
        let loser_overshoot = match winner {
            Player::P1 => w.state.score.right,
            Player::P2 => w.state.score.left,
        };
        assert!(loser_overshoot <= w.state.winning_score);

        // more frames never reassign the winner
        for _ in 0..120 {
            scheduler.update(&mut w, DT);
        }
        assert_eq!(w.state.winner, Some(winner));
    }
}
