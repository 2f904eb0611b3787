//! Main menu scene
//!
//! Thin by design: widget layout and key navigation belong to the host.
//! The menu only executes game-level actions and mirrors the current
//! difficulty for its draw pass.

use super::{Scene, SceneContext, apply_game_action};
use crate::consts;
use crate::input::{Command, GameAction};
use crate::sim::cpu::Difficulty;
use crate::surface::{Color, Surface};

pub struct MenuScene {
    difficulty: Difficulty,
}

impl MenuScene {
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::default(),
        }
    }
}

impl Default for MenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for MenuScene {
    fn on_enter(&mut self, ctx: &mut SceneContext) {
        log::info!("menu scene entered");
        self.difficulty = ctx.settings.difficulty;
    }

    fn handle(&mut self, cmd: &Command, ctx: &mut SceneContext) {
        match cmd {
            Command::Start => apply_game_action(GameAction::StartGame, ctx),
            Command::Quit => apply_game_action(GameAction::QuitGame, ctx),
            Command::CycleDifficulty => {
                apply_game_action(GameAction::CycleDifficulty, ctx);
                self.difficulty = ctx.settings.difficulty;
            }
            _ => {}
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) {}

    fn draw(&self, surface: &mut dyn Surface) {
        let x = consts::FIELD_WIDTH / 2.0 - 60.0;
        surface.draw_text(x, 120.0, "DUEL PONG", Color::ACCENT);
        surface.draw_text(x, 200.0, "START", Color::WHITE);
        surface.draw_text(
            x,
            240.0,
            &format!("DIFFICULTY: {}", self.difficulty.as_str().to_uppercase()),
            Color::WHITE,
        );
        surface.draw_text(x, 280.0, "QUIT", Color::DIM);
    }
}
