//! Scene variants and the game-level action executor
//!
//! A scene is one screen of the game: menu, match, pause overlay. Scenes
//! never own the window or the frame clock; the host calls `update` then
//! `draw` once per frame and hands each call a [`SceneContext`] through
//! which a scene reads settings and files transition requests. The host
//! performs the transitions.

pub mod menu;
pub mod pause;
pub mod pong;

pub use menu::MenuScene;
pub use pause::PauseScene;
pub use pong::PongScene;

use crate::input::{Command, GameAction};
use crate::settings::Settings;
use crate::surface::Surface;

/// Scene identifiers usable in transition requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Menu,
    Pong,
    Pause,
}

/// Intent the core signals to the host; the host owns the scene stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Push(SceneKind),
    Pop,
    Change(SceneKind),
    Quit,
    Screenshot,
}

/// Host-owned state a scene may touch during a frame
pub struct SceneContext<'a> {
    pub settings: &'a mut Settings,
    pub requests: &'a mut Vec<SceneRequest>,
}

/// One screen of the game
pub trait Scene {
    fn on_enter(&mut self, _ctx: &mut SceneContext) {}
    /// React to one decoded input command.
    fn handle(&mut self, cmd: &Command, ctx: &mut SceneContext);
    fn update(&mut self, dt: f32, ctx: &mut SceneContext);
    fn draw(&self, surface: &mut dyn Surface);
}

/// Single executor for game-level actions.
pub fn apply_game_action(action: GameAction, ctx: &mut SceneContext) {
    match action {
        GameAction::StartGame => ctx.requests.push(SceneRequest::Change(SceneKind::Pong)),
        GameAction::QuitGame => ctx.requests.push(SceneRequest::Quit),
        GameAction::CycleDifficulty => ctx.settings.cycle_difficulty(),
        GameAction::Resume => ctx.requests.push(SceneRequest::Pop),
        GameAction::BackToMenu => ctx.requests.push(SceneRequest::Change(SceneKind::Menu)),
        GameAction::Screenshot => ctx.requests.push(SceneRequest::Screenshot),
    }
}
