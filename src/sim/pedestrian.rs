//! Infantry: random wandering with opportunistic fire
//!
//! Infantry never moves toward a target. Wandering and shooting are
//! independent; they simply take shots at whatever comes within range.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::projectile::Projectile;
use super::state::{Arena, Faction};
use super::structure::Structure;
use super::vehicle::Vehicle;
use crate::consts::*;
use crate::effects::EffectSink;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pedestrian {
    /// Feet position
    pub pos: Vec2,
    pub faction: Faction,
    /// Pixels per ms, rolled once at spawn
    pub speed: f32,
    /// Wander heading (radians)
    pub heading: f32,
    /// Time until a new heading is picked (ms)
    pub retarget_timer: f32,
    pub fire_cooldown: f32,
    pub hp: u32,
    pub alive: bool,
}

impl Pedestrian {
    pub fn new(pos: Vec2, faction: Faction, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            faction,
            speed: 0.08 + rng.random::<f32>() * 0.05,
            heading: rng.random::<f32>() * std::f32::consts::TAU,
            retarget_timer: 0.0,
            fire_cooldown: 0.0,
            hp: PEDESTRIAN_MAX_HP,
            alive: true,
        }
    }

    /// Body box above the feet (the sprite is a standing figure)
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x - 6.0, self.pos.y - 20.0, 12.0, 22.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        arena: &Arena,
        vehicles: &[Vehicle],
        structures: &[Structure],
        rng: &mut Pcg32,
        projectiles: &mut Vec<Projectile>,
        fx: &mut dyn EffectSink,
    ) {
        if !self.alive {
            return;
        }

        self.retarget_timer -= dt;
        if self.retarget_timer <= 0.0 {
            self.heading = rng.random::<f32>() * std::f32::consts::TAU;
            self.retarget_timer = rng.random_range(800.0..2000.0);
        }

        let previous = self.pos;
        let step = Vec2::new(self.heading.cos(), self.heading.sin()) * self.speed * dt;
        self.pos = arena.clamp_point(self.pos + step, PEDESTRIAN_MARGIN_X, PEDESTRIAN_MARGIN_Y);
        if !self.pos.is_finite() {
            self.pos = previous;
        }

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        let Some(target) = self.acquire_target(vehicles, structures) else {
            return;
        };

        let delta = target - self.pos;
        let dist = delta.length();
        if dist > 0.0 && dist < PEDESTRIAN_RANGE && self.fire_cooldown == 0.0 {
            let dir = delta / dist;
            let spawn = self.pos + dir * PEDESTRIAN_MUZZLE_OFFSET;
            projectiles.push(Projectile::new(spawn, dir * PEDESTRIAN_SHOT_SPEED, self.faction));
            fx.spawn_muzzle(spawn, self.faction);
            self.fire_cooldown = PEDESTRIAN_FIRE_INTERVAL_MS;
        }
    }

    /// Nearest enemy tank at any distance; buildings only when no enemy tank is alive
    fn acquire_target(&self, vehicles: &[Vehicle], structures: &[Structure]) -> Option<Vec2> {
        let by_distance = |a: &Vec2, b: &Vec2| {
            self.pos
                .distance_squared(*a)
                .total_cmp(&self.pos.distance_squared(*b))
        };

        vehicles
            .iter()
            .filter(|v| !v.dead && v.faction != self.faction)
            .map(|v| v.pos)
            .min_by(by_distance)
            .or_else(|| {
                structures
                    .iter()
                    .filter(|s| !s.dead && s.faction != self.faction)
                    .map(|s| s.center())
                    .min_by(by_distance)
            })
    }
}
