//! Game settings
//!
//! Loaded from a JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::input::KeyBindings;
use crate::sim::Arena;

/// Smallest arena the base layout fits into
pub const MIN_ARENA_WIDTH: f32 = 640.0;
pub const MIN_ARENA_HEIGHT: f32 = 480.0;
/// Upper bound for the particle budget
pub const PARTICLE_LIMIT: usize = 8192;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield size in pixels
    pub arena_width: f32,
    pub arena_height: f32,
    /// Gameplay RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Particle effects (explosions, sparks, trails)
    pub particles: bool,
    pub max_particles: usize,

    // === Input ===
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed: None,
            particles: true,
            max_particles: 2000,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values into a playable range
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.arena_width.is_finite() {
            self.arena_width = defaults.arena_width;
        }
        if !self.arena_height.is_finite() {
            self.arena_height = defaults.arena_height;
        }
        self.arena_width = self.arena_width.max(MIN_ARENA_WIDTH);
        self.arena_height = self.arena_height.max(MIN_ARENA_HEIGHT);
        self.max_particles = self.max_particles.min(PARTICLE_LIMIT);
        self
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles { 0 } else { self.max_particles }
    }
}
