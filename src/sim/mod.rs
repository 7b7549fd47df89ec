//! Simulation module
//!
//! All gameplay logic lives here:
//! - Elapsed-time steps supplied by the caller
//! - Seeded RNG for layout, wandering and respawn jitter
//! - Stable iteration order (collection order decides hit ties)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pedestrian;
pub mod projectile;
pub mod state;
pub mod structure;
pub mod tick;
pub mod vehicle;

pub use collision::{Rect, circle_intersects_rect, resolve_circle_rect};
pub use pedestrian::Pedestrian;
pub use projectile::{Hit, Projectile, Targets};
pub use state::{Arena, Faction, GameState, Outcome};
pub use structure::{Structure, StructureKind};
pub use tick::{TickStatus, tick};
pub use vehicle::Vehicle;
