//! Pause overlay scene

use super::{Scene, SceneContext, apply_game_action};
use crate::consts;
use crate::input::{Command, GameAction};
use crate::surface::{Color, Surface};

#[derive(Debug, Default)]
pub struct PauseScene;

impl PauseScene {
    pub fn new() -> Self {
        Self
    }
}

impl Scene for PauseScene {
    fn on_enter(&mut self, _ctx: &mut SceneContext) {
        log::info!("paused");
    }

    fn handle(&mut self, cmd: &Command, ctx: &mut SceneContext) {
        match cmd {
            // Pause while paused resumes, same as an explicit resume
            Command::Resume | Command::Pause => apply_game_action(GameAction::Resume, ctx),
            Command::BackToMenu => apply_game_action(GameAction::BackToMenu, ctx),
            Command::Quit => apply_game_action(GameAction::QuitGame, ctx),
            _ => {}
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) {}

    fn draw(&self, surface: &mut dyn Surface) {
        let x = consts::FIELD_WIDTH / 2.0 - 40.0;
        surface.draw_text(x, 200.0, "PAUSED", Color::WHITE);
        surface.draw_text(x, 240.0, "CONTINUE", Color::WHITE);
        surface.draw_text(x, 280.0, "MAIN MENU", Color::DIM);
    }
}
