//! World state and reset layout
//!
//! `GameState` owns every entity collection. It is mutated only by
//! [`super::tick`] and by `reset`.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pedestrian::Pedestrian;
use super::projectile::Projectile;
use super::structure::{Structure, StructureKind};
use super::vehicle::Vehicle;
use crate::clamp;
use crate::consts::*;

/// One of the three mutually hostile sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Blue,
    Green,
    Red,
}

impl Faction {
    pub const COUNT: usize = 3;
    /// Placement order used by reset
    pub const ALL: [Faction; Faction::COUNT] = [Faction::Blue, Faction::Green, Faction::Red];

    pub fn index(self) -> usize {
        match self {
            Faction::Blue => 0,
            Faction::Green => 1,
            Faction::Red => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Faction::Blue => "Blue",
            Faction::Green => "Green",
            Faction::Red => "Red",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Faction),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(faction) => write!(f, "{faction} wins"),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// Playfield dimensions; the origin is the top-left corner, +y points down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp a point so it keeps `margin_x` / `margin_y` from every edge
    pub fn clamp_point(&self, p: Vec2, margin_x: f32, margin_y: f32) -> Vec2 {
        Vec2::new(
            clamp(p.x, margin_x, self.width - margin_x),
            clamp(p.y, margin_y, self.height - margin_y),
        )
    }

    /// True if a circle at `p` lies fully inside the playfield
    pub fn contains_circle(&self, p: Vec2, radius: f32) -> bool {
        p.x >= radius && p.x <= self.width - radius && p.y >= radius && p.y <= self.height - radius
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Gameplay RNG seed
    pub seed: u64,
    pub arena: Arena,
    /// Base position per faction, indexed by [`Faction::index`]
    pub bases: [Vec2; Faction::COUNT],
    /// Radius used to scatter infantry around their base
    pub territory_radius: f32,
    /// One tank per control slot (never removed)
    pub vehicles: Vec<Vehicle>,
    /// Buildings, destroyed ones stay as ruins
    pub structures: Vec<Structure>,
    pub projectiles: Vec<Projectile>,
    pub pedestrians: Vec<Pedestrian>,
    /// `None` while the match is contested
    pub outcome: Option<Outcome>,
    /// Simulated time since reset (ms)
    pub elapsed_ms: f64,
    /// Advanced frames since reset
    pub frames: u64,
    /// Gameplay RNG (spawn layout, wander, respawn jitter)
    #[serde(skip)]
    pub rng: Pcg32,
}

impl GameState {
    /// Create a freshly laid-out match
    pub fn new(arena: Arena, seed: u64) -> Self {
        let mut state = Self {
            seed,
            arena,
            bases: [Vec2::ZERO; Faction::COUNT],
            territory_radius: TERRITORY_RADIUS,
            vehicles: Vec::new(),
            structures: Vec::new(),
            projectiles: Vec::new(),
            pedestrians: Vec::new(),
            outcome: None,
            elapsed_ms: 0.0,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    pub fn base(&self, faction: Faction) -> Vec2 {
        self.bases[faction.index()]
    }

    /// Triangle of bases: Blue bottom-left, Red bottom-right, Green top-center
    pub fn base_layout(arena: &Arena) -> [Vec2; Faction::COUNT] {
        let mut bases = [Vec2::ZERO; Faction::COUNT];
        bases[Faction::Blue.index()] =
            Vec2::new(BASE_MARGIN + 140.0, arena.height - (BASE_MARGIN + 120.0));
        bases[Faction::Red.index()] = Vec2::new(
            arena.width - (BASE_MARGIN + 140.0),
            arena.height - (BASE_MARGIN + 120.0),
        );
        bases[Faction::Green.index()] = Vec2::new(arena.width / 2.0, BASE_MARGIN + 120.0);
        bases
    }

    /// Clear everything and lay out a new match
    ///
    /// The gameplay RNG keeps running across resets, so only infantry
    /// placement differs between two consecutive resets.
    pub fn reset(&mut self) {
        self.projectiles.clear();
        self.structures.clear();
        self.pedestrians.clear();
        self.vehicles.clear();
        self.outcome = None;
        self.elapsed_ms = 0.0;
        self.frames = 0;

        self.bases = Self::base_layout(&self.arena);
        self.territory_radius = TERRITORY_RADIUS;

        // Ring of buildings around each base
        for faction in Faction::ALL {
            let base = self.base(faction);
            let offset = if faction == Faction::Green {
                std::f32::consts::PI
            } else {
                0.0
            };
            for i in 0..STRUCTURES_PER_FACTION {
                let kind = StructureKind::ALL[i % StructureKind::ALL.len()];
                let (w, h) = kind.size();
                let angle =
                    (i as f32 / STRUCTURES_PER_FACTION as f32) * std::f32::consts::TAU + offset;
                let x = clamp(
                    base.x + angle.cos() * RING_RADIUS - w / 2.0,
                    20.0,
                    self.arena.width - w - 20.0,
                );
                let y = clamp(
                    base.y + angle.sin() * RING_RADIUS - h / 2.0,
                    80.0,
                    self.arena.height - h - 20.0,
                );
                self.structures.push(Structure::new(x, y, faction, kind));
            }
        }

        // Tanks at their bases, one per control slot
        let blue = self.base(Faction::Blue);
        let red = self.base(Faction::Red);
        let green = self.base(Faction::Green);
        self.vehicles.push(Vehicle::new(blue + Vec2::new(0.0, 40.0), Faction::Blue, 0));
        self.vehicles.push(Vehicle::new(red, Faction::Red, 1));
        self.vehicles.push(Vehicle::new(green - Vec2::new(0.0, 40.0), Faction::Green, 2));

        // Infantry scattered inside each territory
        for faction in Faction::ALL {
            let base = self.base(faction);
            for _ in 0..PEDESTRIANS_PER_FACTION {
                let r = self.rng.random::<f32>() * (self.territory_radius - 40.0);
                let a = self.rng.random::<f32>() * std::f32::consts::TAU;
                let pos = self.arena.clamp_point(
                    base + Vec2::new(a.cos(), a.sin()) * r,
                    PEDESTRIAN_MARGIN_X,
                    PEDESTRIAN_MARGIN_Y,
                );
                let pedestrian = Pedestrian::new(pos, faction, &mut self.rng);
                self.pedestrians.push(pedestrian);
            }
        }

        log::info!(
            "Arena reset (seed {}): {} tanks, {} buildings, {} infantry",
            self.seed,
            self.vehicles.len(),
            self.structures.len(),
            self.pedestrians.len()
        );
    }

    /// Factions that still own at least one standing building
    pub fn surviving_factions(&self) -> Vec<Faction> {
        let mut alive = [false; Faction::COUNT];
        for s in self.structures.iter().filter(|s| !s.dead) {
            alive[s.faction.index()] = true;
        }
        Faction::ALL
            .into_iter()
            .filter(|f| alive[f.index()])
            .collect()
    }

    /// Win rule: one faction standing wins, none standing is a draw
    pub fn evaluate_outcome(&self) -> Option<Outcome> {
        let alive = self.surviving_factions();
        match alive.as_slice() {
            [] => Some(Outcome::Draw),
            [only] => Some(Outcome::Winner(*only)),
            _ => None,
        }
    }
}
