//! The match scene
//!
//! Assembles the world and the standard system pipeline, routes decoded
//! commands into match actions, and draws the playfield. The frame clock
//! stays with the host; this scene only reacts to `update`/`draw`.

use super::{Scene, SceneContext, SceneKind, SceneRequest, apply_game_action};
use crate::input::{Command, GameAction, MatchAction};
use crate::settings::Settings;
use crate::sim::entity::GeometryError;
use crate::sim::scheduler::Scheduler;
use crate::sim::state::Player;
use crate::sim::systems::World;
use crate::surface::{Color, Surface};
use crate::tuning::Tuning;

pub struct PongScene {
    world: World,
    scheduler: Scheduler,
}

impl PongScene {
    pub fn new(settings: &Settings, tuning: Tuning) -> Result<Self, GeometryError> {
        let world = World::new(settings, tuning)?;
        let scheduler = Scheduler::standard(&world);
        Ok(Self { world, scheduler })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    fn draw_entities(&self, surface: &mut dyn Surface) {
        for paddle in [&self.world.left_paddle, &self.world.right_paddle] {
            surface.draw_rect(
                paddle.kin.pos.x,
                paddle.kin.pos.y,
                paddle.kin.size.width,
                paddle.kin.size.height,
                Color::WHITE,
            );
        }
        let ball = &self.world.ball;
        surface.draw_rect(
            ball.kin.pos.x,
            ball.kin.pos.y,
            ball.kin.size.width,
            ball.kin.size.height,
            Color::WHITE,
        );
    }

    fn draw_photo_overlay(&self, surface: &mut dyn Surface) {
        surface.draw_text(20.0, 60.0, "DUEL PONG", Color::ACCENT);
        surface.draw_text(20.0, 90.0, "rally in progress", Color::ACCENT);
    }
}

impl Scene for PongScene {
    fn on_enter(&mut self, _ctx: &mut SceneContext) {
        log::info!("match started");
        self.scheduler.on_enter(&mut self.world);
    }

    fn handle(&mut self, cmd: &Command, ctx: &mut SceneContext) {
        match *cmd {
            Command::MovePaddle { player, dir } => {
                self.world.apply(MatchAction::MovePaddle { player, dir });
            }
            Command::StopPaddle { player, dir } => {
                self.world.apply(MatchAction::StopPaddle { player, dir });
            }
            Command::ToggleTrail => self.world.apply(MatchAction::ToggleTrail),
            Command::TogglePhoto => self.world.apply(MatchAction::TogglePhoto),
            Command::Pause => ctx.requests.push(SceneRequest::Push(SceneKind::Pause)),
            Command::Screenshot => apply_game_action(GameAction::Screenshot, ctx),
            Command::Quit => apply_game_action(GameAction::QuitGame, ctx),
            Command::Key(key) => self.world.pending_keys.push(key),
            _ => {}
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut SceneContext) {
        self.scheduler.update(&mut self.world, dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let field = self.world.field;

        // center line
        let line_width = 5.0;
        surface.draw_rect(
            (field.width - line_width) / 2.0,
            0.0,
            line_width,
            field.height,
            Color::WHITE,
        );

        // scores near the top
        let score = self.world.state.score;
        surface.draw_text(field.width / 4.0, 20.0, &score.left.to_string(), Color::WHITE);
        surface.draw_text(
            field.width * 3.0 / 4.0,
            20.0,
            &score.right.to_string(),
            Color::WHITE,
        );

        // walls and trail, in system order
        self.scheduler.draw(&self.world, surface);

        self.draw_entities(surface);

        if let Some(winner) = self.world.state.winner {
            let label = match winner {
                Player::P1 => "P1 WINS",
                Player::P2 => "P2 WINS",
            };
            surface.draw_text(field.width / 2.0 - 40.0, field.height / 2.0, label, Color::ACCENT);
        }

        if self.world.state.photo_mode {
            self.draw_photo_overlay(surface);
        }
    }
}
