//! Buildings and their turret AI

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::pedestrian::Pedestrian;
use super::projectile::Projectile;
use super::state::Faction;
use super::vehicle::Vehicle;
use crate::consts::*;
use crate::effects::EffectSink;

/// Building types (size and toughness variants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StructureKind {
    #[default]
    Block,
    Factory,
    Barracks,
    Tower,
    Bunker,
    Silo,
    House,
    Power,
}

impl StructureKind {
    /// Order used when laying out a base ring
    pub const ALL: [StructureKind; 8] = [
        StructureKind::Block,
        StructureKind::Factory,
        StructureKind::Barracks,
        StructureKind::Tower,
        StructureKind::Bunker,
        StructureKind::Silo,
        StructureKind::House,
        StructureKind::Power,
    ];

    /// Footprint (width, height)
    pub fn size(self) -> (f32, f32) {
        match self {
            StructureKind::Block => (44.0, 60.0),
            StructureKind::Factory => (64.0, 64.0),
            StructureKind::Barracks => (54.0, 56.0),
            StructureKind::Tower => (40.0, 80.0),
            StructureKind::Bunker => (70.0, 44.0),
            StructureKind::Silo => (36.0, 72.0),
            StructureKind::House => (50.0, 50.0),
            StructureKind::Power => (44.0, 54.0),
        }
    }

    pub fn max_hp(self) -> u32 {
        match self {
            StructureKind::Block => 4,
            StructureKind::Factory => 7,
            StructureKind::Barracks => 5,
            StructureKind::Tower => 3,
            StructureKind::Bunker => 8,
            StructureKind::Silo => 4,
            StructureKind::House => 4,
            StructureKind::Power => 5,
        }
    }
}

/// A destructible building with a turret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub rect: Rect,
    pub faction: Faction,
    pub kind: StructureKind,
    pub hp: u32,
    pub max_hp: u32,
    /// Destroyed buildings stay in place as ruins
    pub dead: bool,
    /// Time until the turret may fire again (ms)
    pub fire_cooldown: f32,
    /// Time between shots (ms)
    pub fire_rate: f32,
    pub range: f32,
}

impl Structure {
    pub fn new(x: f32, y: f32, faction: Faction, kind: StructureKind) -> Self {
        let (w, h) = kind.size();
        let max_hp = kind.max_hp();
        Self {
            rect: Rect::new(x, y, w, h),
            faction,
            kind,
            hp: max_hp,
            max_hp,
            dead: false,
            fire_cooldown: TURRET_COOLDOWN_MS,
            fire_rate: TURRET_COOLDOWN_MS,
            range: TURRET_RANGE,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Apply damage; returns true only on the hit that destroys the building
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.dead {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Turret: fire at the nearest enemy tank in range, else the nearest infantry
    pub fn update(
        &mut self,
        dt: f32,
        vehicles: &[Vehicle],
        pedestrians: &[Pedestrian],
        projectiles: &mut Vec<Projectile>,
        fx: &mut dyn EffectSink,
    ) {
        if self.dead {
            return;
        }
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if self.fire_cooldown > 0.0 {
            return;
        }

        let Some(target) = self.acquire_target(vehicles, pedestrians) else {
            // Re-scan next frame
            return;
        };

        let center = self.center();
        let delta = target - center;
        let dist = delta.length();
        if dist > 1.0 {
            let dir = delta / dist;
            let spawn = center + dir * TURRET_MUZZLE_OFFSET;
            projectiles.push(Projectile::new(spawn, dir * TURRET_SHOT_SPEED, self.faction));
            fx.spawn_muzzle(spawn, self.faction);
            self.fire_cooldown = self.fire_rate;
        }
    }

    /// Tanks take strict priority; infantry is only considered when no tank is in range
    fn acquire_target(&self, vehicles: &[Vehicle], pedestrians: &[Pedestrian]) -> Option<Vec2> {
        let center = self.center();
        let range_sq = self.range * self.range;

        let nearest = |candidates: &mut dyn Iterator<Item = Vec2>| {
            let mut best: Option<(f32, Vec2)> = None;
            for pos in candidates {
                let d2 = (pos - center).length_squared();
                let bound = best.map_or(range_sq, |(d, _)| d);
                if d2 < bound {
                    best = Some((d2, pos));
                }
            }
            best.map(|(_, pos)| pos)
        };

        let mut tanks = vehicles
            .iter()
            .filter(|v| !v.dead && v.faction != self.faction)
            .map(|v| v.pos);
        if let Some(pos) = nearest(&mut tanks) {
            return Some(pos);
        }

        let mut infantry = pedestrians
            .iter()
            .filter(|p| p.alive && p.faction != self.faction)
            .map(|p| p.pos);
        nearest(&mut infantry)
    }
}
