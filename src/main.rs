//! Headless demo entry point
//!
//! Runs a CPU-vs-CPU match without a window: useful for smoke-testing the
//! whole pipeline and for watching the log stream. A real host would own a
//! window, decode raw events into commands, and honor the scene requests;
//! this one just drains them.

use duel_pong::input::Command;
use duel_pong::scenes::{PongScene, Scene, SceneContext};
use duel_pong::settings::Settings;
use duel_pong::surface::RecordingSurface;
use duel_pong::tuning::Tuning;
use duel_pong::sim::entity::GeometryError;

const DT: f32 = 1.0 / 60.0;
const DEMO_SECONDS: u32 = 60;

fn main() -> Result<(), GeometryError> {
    env_logger::init();

    let mut settings = Settings {
        seed: 0xD0E1,
        ..Settings::default()
    };
    let mut requests = Vec::new();

    let mut scene = PongScene::new(&settings, Tuning::default())?;

    {
        let mut ctx = SceneContext {
            settings: &mut settings,
            requests: &mut requests,
        };
        scene.on_enter(&mut ctx);
        // enable CPU-vs-CPU through the cheat path, same as a player would
        for key in ['c', 'p', 'u'] {
            scene.handle(&Command::Key(key), &mut ctx);
        }
    }

    for _ in 0..(DEMO_SECONDS * 60) {
        let mut ctx = SceneContext {
            settings: &mut settings,
            requests: &mut requests,
        };
        scene.update(DT, &mut ctx);
        if scene.world().state.winner.is_some() {
            break;
        }
    }

    // exercise the draw pass once, headlessly
    let mut surface = RecordingSurface::default();
    scene.draw(&mut surface);
    log::debug!(
        "final frame: {} rects, {} texts",
        surface.rects.len(),
        surface.texts.len()
    );

    let state = &scene.world().state;
    println!(
        "demo finished: {} - {} (winner: {:?})",
        state.score.left, state.score.right, state.winner
    );
    Ok(())
}
