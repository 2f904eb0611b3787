//! Per-frame systems and the shared world they mutate
//!
//! A system is one unit of per-frame behavior with a fixed priority. The
//! scheduler runs every enabled system in ascending priority order, update
//! pass then draw pass; that total order is the only thing standing between
//! the systems and read-after-write hazards, so treat it as a contract:
//!
//!   45 cpu_vs_cpu   left-paddle intents (cheat-gated)
//!   55 integrate    entity integration
//!   60 wall_bounce  top/bottom bounce, wall drawing
//!   70 paddle_hits  paddle collision + deflection
//!   80 cpu          right-paddle intents for the next frame
//!   85 slow_mo      time-scale application
//!   90 god_mode     wall sync + edge reflection
//!   95 rally_reset  consumes the reset flag from last frame's score
//!   98 trail        trail recording/drawing
//!  100 ball_out     scoring on ball exit
//!  110 win          win detection, after scoring
//!  200 cheats       key-sequence matching

use glam::Vec2;

use super::collision::{bounce_vertical, resolve_paddle_hit};
use super::cpu::{AimErrorPolicy, CpuConfig, CpuController};
use super::entity::{Ball, GeometryError, Paddle, Size};
use super::state::{MatchState, Player, Side};
use crate::cheats::CheatMatcher;
use crate::consts;
use crate::input::{MatchAction, Vertical};
use crate::settings::Settings;
use crate::surface::{Color, Surface};
use crate::tuning::Tuning;

// Seed tweaks so the two CPU controllers never share a stream
const RIGHT_CPU_SEED: u64 = 0x0DD5;
const LEFT_CPU_SEED: u64 = 0xA11E;

/// Everything the systems read and mutate each frame
#[derive(Debug)]
pub struct World {
    pub field: Size,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub state: MatchState,
    pub tuning: Tuning,
    pub cpu_config: CpuConfig,
    pub aim_policy: AimErrorPolicy,
    /// Raw keys buffered for the cheat matchers, drained each frame
    pub pending_keys: Vec<char>,
    pub seed: u64,
}

impl World {
    /// Build the standard playfield: two inset paddles, ball served from
    /// the center toward the right.
    pub fn new(settings: &Settings, tuning: Tuning) -> Result<Self, GeometryError> {
        let field = Size::new(consts::FIELD_WIDTH, consts::FIELD_HEIGHT)?;
        let paddle_size = Size::new(consts::PADDLE_WIDTH, consts::PADDLE_HEIGHT)?;
        let ball_size = Size::new(consts::BALL_SIZE, consts::BALL_SIZE)?;

        let paddle_y = (field.height - paddle_size.height) / 2.0;
        let left_paddle = Paddle::new(
            Vec2::new(consts::PADDLE_INSET, paddle_y),
            paddle_size,
            consts::PADDLE_SPEED,
            field.height,
        )?;
        let right_paddle = Paddle::new(
            Vec2::new(
                field.width - consts::PADDLE_INSET - paddle_size.width,
                paddle_y,
            ),
            paddle_size,
            consts::PADDLE_SPEED,
            field.height,
        )?;

        let ball = Ball::new(
            Vec2::new(
                (field.width - ball_size.width) / 2.0,
                (field.height - ball_size.height) / 2.0,
            ),
            ball_size,
            Vec2::new(tuning.serve_vx, tuning.serve_vy),
        )?;

        Ok(Self {
            field,
            left_paddle,
            right_paddle,
            ball,
            state: MatchState::new(settings.winning_score, consts::WALL_HEIGHT),
            tuning,
            cpu_config: settings.difficulty.config(),
            aim_policy: settings.aim_error_policy,
            pending_keys: Vec::new(),
            seed: settings.seed,
        })
    }

    fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::P1 => &mut self.left_paddle,
            Player::P2 => &mut self.right_paddle,
        }
    }

    /// Single executor for match-level actions.
    pub fn apply(&mut self, action: MatchAction) {
        match action {
            MatchAction::MovePaddle { player, dir } => {
                let paddle = self.paddle_mut(player);
                match dir {
                    Vertical::Up => paddle.moving_up = true,
                    Vertical::Down => paddle.moving_down = true,
                }
            }
            MatchAction::StopPaddle { player, dir } => {
                let paddle = self.paddle_mut(player);
                match dir {
                    Vertical::Up => paddle.moving_up = false,
                    Vertical::Down => paddle.moving_down = false,
                }
            }
            MatchAction::ToggleTrail => {
                self.state.trail_mode = !self.state.trail_mode;
            }
            MatchAction::TogglePhoto => {
                self.state.photo_mode = !self.state.photo_mode;
                // photo mode always shows the trail
                if self.state.photo_mode {
                    self.state.trail_mode = true;
                }
            }
            MatchAction::ToggleGodMode(player) => {
                let flag = match player {
                    Player::P1 => &mut self.state.god_mode_p1,
                    Player::P2 => &mut self.state.god_mode_p2,
                };
                *flag = !*flag;
                log::info!("god mode {player:?}: {flag}");
            }
            MatchAction::ToggleSlowMo => {
                self.state.slow_mo = !self.state.slow_mo;
                log::info!("slow-mo: {}", self.state.slow_mo);
            }
            MatchAction::ToggleCpuVsCpu => {
                self.state.cpu_vs_cpu = !self.state.cpu_vs_cpu;
                log::info!("cpu-vs-cpu: {}", self.state.cpu_vs_cpu);
            }
        }
    }
}

/// One schedulable unit of per-frame behavior
pub trait System {
    fn name(&self) -> &'static str;
    fn priority(&self) -> i32;
    fn on_enter(&mut self, _world: &mut World) {}
    fn update(&mut self, world: &mut World, dt: f32);
    fn draw(&self, _world: &World, _surface: &mut dyn Surface) {}
}

/// Drives the left paddle with a second CPU while the cheat is active
pub struct CpuVsCpuSystem {
    controller: Option<CpuController>,
}

impl CpuVsCpuSystem {
    pub fn new() -> Self {
        Self { controller: None }
    }
}

impl Default for CpuVsCpuSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CpuVsCpuSystem {
    fn name(&self) -> &'static str {
        "cpu_vs_cpu"
    }

    fn priority(&self) -> i32 {
        45
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        if !world.state.cpu_vs_cpu {
            return;
        }
        let controller = self.controller.get_or_insert_with(|| {
            CpuController::new(
                Side::Left,
                world.cpu_config,
                world.aim_policy,
                world.seed ^ LEFT_CPU_SEED,
            )
        });
        controller.update(&mut world.left_paddle, &world.ball, world.state.rally);
    }
}

/// Integrates all entities; paddle intents set before this priority take
/// effect this frame, later ones next frame
pub struct IntegrateSystem;

impl System for IntegrateSystem {
    fn name(&self) -> &'static str {
        "integrate"
    }

    fn priority(&self) -> i32 {
        55
    }

    fn update(&mut self, world: &mut World, dt: f32) {
        world.left_paddle.update(dt);
        world.right_paddle.update(dt);
        world.ball.update(dt);
    }
}

/// Bounces the ball off the top/bottom walls; draws all active walls
pub struct WallBounceSystem;

impl System for WallBounceSystem {
    fn name(&self) -> &'static str {
        "wall_bounce"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let top = world.state.wall_height;
        let bottom = world.field.height - world.state.wall_height;
        bounce_vertical(&mut world.ball, top, bottom);
    }

    fn draw(&self, world: &World, surface: &mut dyn Surface) {
        let h = world.state.wall_height;
        surface.draw_rect(0.0, 0.0, world.field.width, h, Color::DIM);
        surface.draw_rect(0.0, world.field.height - h, world.field.width, h, Color::DIM);
        if world.state.wall_left {
            surface.draw_rect(0.0, 0.0, h, world.field.height, Color::ACCENT);
        }
        if world.state.wall_right {
            surface.draw_rect(world.field.width - h, 0.0, h, world.field.height, Color::ACCENT);
        }
    }
}

/// Resolves ball/paddle overlaps, left paddle then right
pub struct PaddleCollisionSystem;

impl System for PaddleCollisionSystem {
    fn name(&self) -> &'static str {
        "paddle_hits"
    }

    fn priority(&self) -> i32 {
        70
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        resolve_paddle_hit(&mut world.ball, &world.left_paddle, Side::Left, &world.tuning);
        resolve_paddle_hit(
            &mut world.ball,
            &world.right_paddle,
            Side::Right,
            &world.tuning,
        );
    }
}

/// Drives the right paddle's intents from the CPU controller
pub struct CpuSystem {
    controller: CpuController,
}

impl CpuSystem {
    pub fn new(controller: CpuController) -> Self {
        Self { controller }
    }
}

impl System for CpuSystem {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.controller
            .update(&mut world.right_paddle, &world.ball, world.state.rally);
    }
}

/// Applies the slow-motion time scale to the ball and the CPU paddle
pub struct SlowMoSystem;

impl System for SlowMoSystem {
    fn name(&self) -> &'static str {
        "slow_mo"
    }

    fn priority(&self) -> i32 {
        85
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let factor = if world.state.slow_mo {
            world.tuning.slow_mo_factor
        } else {
            1.0
        };
        world.ball.kin.time_scale = factor;
        world.right_paddle.kin.time_scale = factor;
    }
}

/// Turns a side's scoring edge into a solid wall while god mode is on
pub struct GodModeSystem;

impl System for GodModeSystem {
    fn name(&self) -> &'static str {
        "god_mode"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let ball = &mut world.ball;

        world.state.wall_left = world.state.god_mode_p1;
        if world.state.god_mode_p1 && ball.kin.pos.x < 0.0 {
            ball.kin.pos.x = 0.0;
            ball.kin.vel.x = ball.kin.vel.x.abs();
        }

        world.state.wall_right = world.state.god_mode_p2;
        let right_limit = world.field.width - ball.kin.size.width;
        if world.state.god_mode_p2 && ball.kin.pos.x > right_limit {
            ball.kin.pos.x = right_limit;
            ball.kin.vel.x = -ball.kin.vel.x.abs();
        }
    }
}

/// Consumes the reset flag: re-centers the ball and serves it
pub struct RallyResetSystem;

impl System for RallyResetSystem {
    fn name(&self) -> &'static str {
        "rally_reset"
    }

    fn priority(&self) -> i32 {
        95
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        if !world.state.reset_rally {
            return;
        }

        let direction = world.state.reset_rally_direction.unwrap_or(1) as f32;
        let ball = &mut world.ball;
        ball.kin.pos = Vec2::new(
            (world.field.width - ball.kin.size.width) / 2.0,
            (world.field.height - ball.kin.size.height) / 2.0,
        );
        // fixed serve velocity; only the horizontal sign follows the rally
        ball.kin.vel = Vec2::new(ball.base_vel.x.abs() * direction, ball.base_vel.y);

        world.state.reset_rally = false;
        world.state.rally += 1;
    }
}

/// Records and draws the fading ball trail
pub struct TrailSystem;

impl System for TrailSystem {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn priority(&self) -> i32 {
        98
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        if world.state.trail_mode {
            world.state.push_trail(world.ball.kin.pos);
        }
    }

    fn draw(&self, world: &World, surface: &mut dyn Surface) {
        if !world.state.trail_mode || world.state.trail.is_empty() {
            return;
        }
        let count = world.state.trail.len();
        let size = 12.0;
        for (i, pos) in world.state.trail.iter().enumerate() {
            // older points are fainter; newest tops out at 50% alpha
            let t = (i + 1) as f32 / count as f32;
            let alpha = (255.0 * t * 0.5) as u8;
            surface.draw_rect(
                pos.x - size / 2.0,
                pos.y - size / 2.0,
                size,
                size,
                Color::rgba(255, 255, 255, alpha),
            );
        }
    }
}

/// Detects ball exit and awards the point, unless a god-mode wall holds
pub struct BallOutSystem;

impl System for BallOutSystem {
    fn name(&self) -> &'static str {
        "ball_out"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let x = world.ball.kin.pos.x;
        if x < 0.0 && !world.state.god_mode_p1 {
            world.state.award_point(Side::Right);
        } else if x > world.field.width && !world.state.god_mode_p2 {
            world.state.award_point(Side::Left);
        }
    }
}

/// Assigns the winner once a score reaches the winning threshold
pub struct WinConditionSystem;

impl System for WinConditionSystem {
    fn name(&self) -> &'static str {
        "win"
    }

    fn priority(&self) -> i32 {
        110
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let state = &mut world.state;
        if state.score.left >= state.winning_score {
            state.record_winner(Player::P1);
        } else if state.score.right >= state.winning_score {
            state.record_winner(Player::P2);
        }
    }
}

/// Feeds buffered raw keys through the registered cheat matchers
pub struct CheatSystem {
    matchers: Vec<CheatMatcher>,
}

impl CheatSystem {
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }
}

impl Default for CheatSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CheatSystem {
    fn name(&self) -> &'static str {
        "cheats"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn on_enter(&mut self, _world: &mut World) {
        self.matchers = vec![
            CheatMatcher::new("god_mode", "GOD", MatchAction::ToggleGodMode(Player::P1)),
            CheatMatcher::new("slow_mo", "SLOW", MatchAction::ToggleSlowMo),
            CheatMatcher::new("cpu_vs_cpu", "CPU", MatchAction::ToggleCpuVsCpu),
        ];
        log::debug!("registered {} cheats", self.matchers.len());
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        let keys: Vec<char> = world.pending_keys.drain(..).collect();
        for key in keys {
            for matcher in &mut self.matchers {
                if let Some(action) = matcher.feed(key) {
                    world.apply(action);
                }
            }
        }
    }
}

/// The full match pipeline in its contractual priority order
pub fn standard_systems(world: &World) -> Vec<Box<dyn System>> {
    vec![
        Box::new(CpuVsCpuSystem::new()),
        Box::new(IntegrateSystem),
        Box::new(WallBounceSystem),
        Box::new(PaddleCollisionSystem),
        Box::new(CpuSystem::new(CpuController::new(
            Side::Right,
            world.cpu_config,
            world.aim_policy,
            world.seed ^ RIGHT_CPU_SEED,
        ))),
        Box::new(SlowMoSystem),
        Box::new(GodModeSystem),
        Box::new(RallyResetSystem),
        Box::new(TrailSystem),
        Box::new(BallOutSystem),
        Box::new(WinConditionSystem),
        Box::new(CheatSystem::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(&Settings::default(), Tuning::default()).unwrap()
    }

    #[test]
    fn move_and_stop_actions_set_intent_flags() {
        let mut w = world();
        w.apply(MatchAction::MovePaddle {
            player: Player::P1,
            dir: Vertical::Up,
        });
        assert!(w.left_paddle.moving_up);
        w.apply(MatchAction::StopPaddle {
            player: Player::P1,
            dir: Vertical::Up,
        });
        assert!(!w.left_paddle.moving_up);
    }

    #[test]
    fn photo_mode_forces_trail_on() {
        let mut w = world();
        w.apply(MatchAction::TogglePhoto);
        assert!(w.state.photo_mode);
        assert!(w.state.trail_mode);
        // leaving photo mode keeps the trail toggle as-is
        w.apply(MatchAction::TogglePhoto);
        assert!(!w.state.photo_mode);
        assert!(w.state.trail_mode);
    }

    #[test]
    fn slow_mo_scales_ball_and_cpu_paddle_only() {
        let mut w = world();
        w.state.slow_mo = true;
        SlowMoSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.ball.kin.time_scale, 0.25);
        assert_eq!(w.right_paddle.kin.time_scale, 0.25);
        assert_eq!(w.left_paddle.kin.time_scale, 1.0);

        w.state.slow_mo = false;
        SlowMoSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.ball.kin.time_scale, 1.0);
    }

    #[test]
    fn god_mode_reflects_ball_and_raises_wall() {
        let mut w = world();
        w.state.god_mode_p1 = true;
        w.ball.kin.pos.x = -3.0;
        w.ball.kin.vel.x = -250.0;
        GodModeSystem.update(&mut w, 1.0 / 60.0);
        assert!(w.state.wall_left);
        assert_eq!(w.ball.kin.pos.x, 0.0);
        assert_eq!(w.ball.kin.vel.x, 250.0);

        w.state.god_mode_p1 = false;
        GodModeSystem.update(&mut w, 1.0 / 60.0);
        assert!(!w.state.wall_left);
    }

    #[test]
    fn ball_out_awards_opponent() {
        let mut w = world();
        w.ball.kin.pos.x = -1.0;
        BallOutSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.state.score.right, 1);
        assert!(w.state.reset_rally);
        assert_eq!(w.state.reset_rally_direction, Some(1));
    }

    #[test]
    fn god_mode_suppresses_scoring() {
        let mut w = world();
        w.state.god_mode_p1 = true;
        w.ball.kin.pos.x = -1.0;
        BallOutSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.state.score.right, 0);
        assert!(!w.state.reset_rally);
    }

    #[test]
    fn rally_reset_consumes_flag_once() {
        let mut w = world();
        w.ball.kin.pos = Vec2::new(-20.0, 100.0);
        w.state.award_point(Side::Right);

        RallyResetSystem.update(&mut w, 1.0 / 60.0);
        assert!(!w.state.reset_rally);
        assert_eq!(w.state.rally, 1);
        assert_eq!(w.ball.kin.pos.x, (w.field.width - w.ball.kin.size.width) / 2.0);
        assert_eq!(w.ball.kin.vel, Vec2::new(w.ball.base_vel.x.abs(), w.ball.base_vel.y));

        // no second fire without a new score
        let pos = w.ball.kin.pos;
        RallyResetSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.state.rally, 1);
        assert_eq!(w.ball.kin.pos, pos);
    }

    #[test]
    fn trail_records_only_when_enabled() {
        let mut w = world();
        TrailSystem.update(&mut w, 1.0 / 60.0);
        assert!(w.state.trail.is_empty());

        w.state.trail_mode = true;
        TrailSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.state.trail.len(), 1);
    }

    #[test]
    fn cheat_keys_toggle_match_state() {
        let mut w = world();
        let mut cheats = CheatSystem::new();
        cheats.on_enter(&mut w);

        w.pending_keys.extend(['s', 'l', 'o', 'w']);
        cheats.update(&mut w, 1.0 / 60.0);
        assert!(w.state.slow_mo);
        assert!(w.pending_keys.is_empty());

        w.pending_keys.extend(['g', 'o', 'd']);
        cheats.update(&mut w, 1.0 / 60.0);
        assert!(w.state.god_mode_p1);
    }

    #[test]
    fn cpu_vs_cpu_system_idles_until_toggled() {
        let mut w = world();
        let mut sys = CpuVsCpuSystem::new();
        w.ball.kin.vel.x = -250.0;
        w.ball.kin.pos.x = 60.0;
        w.ball.kin.pos.y = 400.0;

        sys.update(&mut w, 1.0 / 60.0);
        assert!(!w.left_paddle.moving_down && !w.left_paddle.moving_up);

        w.state.cpu_vs_cpu = true;
        sys.update(&mut w, 1.0 / 60.0);
        assert!(w.left_paddle.moving_down || w.left_paddle.moving_up);
    }

    #[test]
    fn win_system_marks_first_player_to_threshold() {
        let mut w = world();
        w.state.score.left = w.state.winning_score;
        WinConditionSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.state.winner, Some(Player::P1));

        // the other side overshooting later cannot steal the win
        w.state.score.right = w.state.winning_score + 3;
        WinConditionSystem.update(&mut w, 1.0 / 60.0);
        assert_eq!(w.state.winner, Some(Player::P1));
    }
}
