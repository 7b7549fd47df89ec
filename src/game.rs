//! Frame driver
//!
//! Turns wall-clock timestamps into clamped simulation steps, runs the
//! simulation and the particle layer, and hands the result to a renderer.

use crate::consts::MAX_FRAME_MS;
use crate::effects::ParticleField;
use crate::input::InputSource;
use crate::settings::Settings;
use crate::sim::{GameState, TickStatus, tick};

/// Read-only consumer of the simulation (canvas, GPU, logs...)
pub trait RenderSink {
    fn draw(&mut self, state: &GameState, particles: &ParticleField);
}

/// Elapsed-time source: timestamp in, bounded step out
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_step_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_MS)
    }
}

impl FrameClock {
    pub fn new(max_step_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_step_ms,
        }
    }

    /// Milliseconds since the previous call, clamped to `[0, max_step_ms]`
    ///
    /// The first call (and any non-finite timestamp) yields zero.
    pub fn step(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, self.max_step_ms)
        } else {
            0.0
        }
    }
}

/// A running match: simulation, cosmetics and clock
pub struct Game {
    pub state: GameState,
    pub particles: ParticleField,
    clock: FrameClock,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(settings.arena(), seed),
            particles: ParticleField::new(settings.max_particles()),
            clock: FrameClock::default(),
        }
    }

    /// Run one display frame at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64, input: &dyn InputSource) -> TickStatus {
        let dt = self.clock.step(now_ms);
        let status = tick(&mut self.state, input, &mut self.particles, dt);
        match status {
            TickStatus::Reset => self.particles.clear(),
            TickStatus::Advanced => self.particles.update(dt),
            TickStatus::Frozen => {}
        }
        status
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.draw(&self.state, &self.particles);
    }
}
