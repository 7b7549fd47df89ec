//! Tri-Front headless entry point
//!
//! Runs a match with scripted pilots at a fixed frame rate and prints the
//! final summary as JSON. Usage: `tri-front [settings.json]`

use serde::Serialize;

use tri_front::effects::ParticleField;
use tri_front::input::{Action, Control, ScriptedInput};
use tri_front::sim::{Faction, GameState, TickStatus};
use tri_front::{Game, RenderSink, Settings};

const FRAME_MS: f64 = 16.0;
/// Give up after three simulated minutes
const MAX_FRAMES: u64 = 3 * 60 * 1000 / 16;
const LOG_EVERY: u64 = 600;

/// Periodic text snapshot of the battlefield
struct LogRenderer {
    frames: u64,
}

impl RenderSink for LogRenderer {
    fn draw(&mut self, state: &GameState, particles: &ParticleField) {
        self.frames += 1;
        if self.frames % LOG_EVERY != 0 {
            return;
        }
        let standing = |f: Faction| {
            state
                .structures
                .iter()
                .filter(|s| s.faction == f && !s.dead)
                .count()
        };
        log::info!(
            "t={:.1}s buildings B/R/G={}/{}/{} infantry={} shells={} particles={}",
            state.elapsed_ms / 1000.0,
            standing(Faction::Blue),
            standing(Faction::Red),
            standing(Faction::Green),
            state.pedestrians.len(),
            state.projectiles.len(),
            particles.len(),
        );
    }
}

/// Each pilot keeps firing and sweeps through the four directions
fn autopilot(frame: u64) -> ScriptedInput {
    const SWEEP: [Control; 4] = [Control::Right, Control::Up, Control::Left, Control::Down];
    let mut input = ScriptedInput::default();
    for slot in 0..Faction::COUNT as u8 {
        let phase = (frame / 90 + u64::from(slot)) as usize % SWEEP.len();
        input.press(Action::pilot(slot, Control::Fire));
        input.press(Action::pilot(slot, SWEEP[phase]));
    }
    input
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    outcome: Option<String>,
    elapsed_ms: f64,
    frames: u64,
    structures_standing: [usize; Faction::COUNT],
    pedestrians: usize,
}

fn main() {
    env_logger::init();
    log::info!("Tri-Front (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut game = Game::new(&settings);
    let mut renderer = LogRenderer { frames: 0 };

    for frame in 0..MAX_FRAMES {
        let status = game.frame(frame as f64 * FRAME_MS, &autopilot(frame));
        game.render(&mut renderer);
        if status == TickStatus::Frozen {
            break;
        }
    }

    let state = &game.state;
    let mut standing = [0; Faction::COUNT];
    for s in state.structures.iter().filter(|s| !s.dead) {
        standing[s.faction.index()] += 1;
    }
    let summary = Summary {
        seed: state.seed,
        outcome: state.outcome.map(|o| o.to_string()),
        elapsed_ms: state.elapsed_ms,
        frames: state.frames,
        structures_standing: standing,
        pedestrians: state.pedestrians.len(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}
