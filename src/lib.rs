//! Tri Front - A three-faction tank arena
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, targeting, win detection)
//! - `effects`: Effect hooks and the cosmetic particle layer
//! - `input`: Abstract actions, key bindings, held-key state
//! - `game`: Frame driver (clock, state, particles, render sink)
//! - `settings`: JSON configuration

pub mod effects;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;

pub use game::{FrameClock, Game, RenderSink};
pub use settings::Settings;

/// Game configuration constants (pixels, milliseconds, pixels per millisecond)
pub mod consts {
    /// Default playfield size
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Largest step a single frame may take (stall protection)
    pub const MAX_FRAME_MS: f32 = 50.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_LIFE_MS: f32 = 1500.0;
    pub const PROJECTILE_DAMAGE: u32 = 1;
    pub const TRAIL_INTERVAL_MS: f32 = 60.0;

    /// Turret defaults
    pub const TURRET_COOLDOWN_MS: f32 = 5000.0;
    pub const TURRET_RANGE: f32 = 340.0;
    pub const TURRET_SHOT_SPEED: f32 = 0.5;
    pub const TURRET_MUZZLE_OFFSET: f32 = 8.0;

    /// Tank defaults
    pub const VEHICLE_RADIUS: f32 = 22.0;
    pub const VEHICLE_SPEED: f32 = 0.23;
    pub const VEHICLE_MAX_HP: u32 = 6;
    pub const VEHICLE_FIRE_INTERVAL_MS: f32 = 300.0;
    pub const VEHICLE_SHOT_SPEED: f32 = 0.6;
    pub const VEHICLE_RESPAWN_MS: f32 = 1500.0;
    pub const VEHICLE_RESPAWN_JITTER: f32 = 60.0;

    /// Infantry defaults
    pub const PEDESTRIAN_MAX_HP: u32 = 1;
    pub const PEDESTRIAN_RANGE: f32 = 260.0;
    pub const PEDESTRIAN_FIRE_INTERVAL_MS: f32 = 5000.0;
    pub const PEDESTRIAN_SHOT_SPEED: f32 = 0.45;
    pub const PEDESTRIAN_MUZZLE_OFFSET: f32 = 10.0;
    /// Horizontal / vertical clamp margins (sprite is taller than wide)
    pub const PEDESTRIAN_MARGIN_X: f32 = 12.0;
    pub const PEDESTRIAN_MARGIN_Y: f32 = 24.0;

    /// Layout
    pub const BASE_MARGIN: f32 = 70.0;
    pub const TERRITORY_RADIUS: f32 = 260.0;
    pub const RING_RADIUS: f32 = 150.0;
    pub const STRUCTURES_PER_FACTION: usize = 6;
    pub const PEDESTRIANS_PER_FACTION: usize = 10;
}

/// Scalar clamp that never panics (a reversed range resolves to `lo`)
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Length of the vector (dx, dy)
#[inline]
pub fn length(dx: f32, dy: f32) -> f32 {
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Reversed bounds pick the lower one instead of panicking
        assert_eq!(clamp(3.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_length() {
        assert!((length(3.0, 4.0) - 5.0).abs() < 1e-6);
        assert_eq!(length(0.0, 0.0), 0.0);
    }
}
