//! Per-frame simulation step
//!
//! Update order: tanks, buildings, projectiles, infantry. Projectiles spawned
//! earlier in the same frame are advanced by the projectile pass of that frame.

use super::projectile::Targets;
use super::state::GameState;
use crate::effects::EffectSink;
use crate::input::{Action, InputSource};

/// What a call to [`tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Restart was held; the arena was laid out again
    Reset,
    /// A result is recorded; nothing moves until a restart
    Frozen,
    /// Entities were advanced
    Advanced,
}

/// Advance the game state by `dt` milliseconds
pub fn tick(
    state: &mut GameState,
    input: &dyn InputSource,
    fx: &mut dyn EffectSink,
    dt: f32,
) -> TickStatus {
    if input.is_held(Action::Restart) {
        state.reset();
        return TickStatus::Reset;
    }

    if state.outcome.is_some() {
        return TickStatus::Frozen;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    for vehicle in &mut state.vehicles {
        let base = state.bases[vehicle.faction.index()];
        vehicle.update(
            dt,
            &state.arena,
            base,
            &state.structures,
            input,
            &mut state.rng,
            &mut state.projectiles,
            fx,
        );
    }

    for structure in &mut state.structures {
        structure.update(dt, &state.vehicles, &state.pedestrians, &mut state.projectiles, fx);
    }

    {
        let mut targets = Targets::new(
            &mut state.structures,
            &mut state.vehicles,
            &mut state.pedestrians,
        );
        for projectile in &mut state.projectiles {
            projectile.update(dt, &state.arena, &mut targets, fx);
        }
    }
    state.projectiles.retain(|p| p.alive);

    for pedestrian in &mut state.pedestrians {
        pedestrian.update(
            dt,
            &state.arena,
            &state.vehicles,
            &state.structures,
            &mut state.rng,
            &mut state.projectiles,
            fx,
        );
    }
    state.pedestrians.retain(|p| p.alive);

    state.elapsed_ms += f64::from(dt);
    state.frames += 1;

    state.outcome = state.evaluate_outcome();
    if let Some(outcome) = state.outcome {
        log::info!("Match over after {:.1}s: {}", state.elapsed_ms / 1000.0, outcome);
    }

    TickStatus::Advanced
}
