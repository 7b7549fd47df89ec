//! Projectiles: movement, lifetime and first-hit damage

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circle_intersects_rect;
use super::pedestrian::Pedestrian;
use super::state::{Arena, Faction};
use super::structure::Structure;
use super::vehicle::Vehicle;
use crate::consts::*;
use crate::effects::EffectSink;

/// Everything a projectile may hit this tick
pub struct Targets<'a> {
    pub structures: &'a mut [Structure],
    pub vehicles: &'a mut [Vehicle],
    pub pedestrians: &'a mut [Pedestrian],
}

impl<'a> Targets<'a> {
    pub fn new(
        structures: &'a mut [Structure],
        vehicles: &'a mut [Vehicle],
        pedestrians: &'a mut [Pedestrian],
    ) -> Self {
        Self {
            structures,
            vehicles,
            pedestrians,
        }
    }
}

/// What a projectile struck during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Structure(usize),
    Vehicle(usize),
    Pedestrian(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Pixels per ms
    pub vel: Vec2,
    pub radius: f32,
    /// Remaining life in ms
    pub life: f32,
    pub faction: Faction,
    pub damage: u32,
    pub alive: bool,
    /// Countdown to the next trail puff
    trail_timer: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, faction: Faction) -> Self {
        Self {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            life: PROJECTILE_LIFE_MS,
            faction,
            damage: PROJECTILE_DAMAGE,
            alive: true,
            trail_timer: 0.0,
        }
    }

    /// Advance by `dt` ms; returns the target struck, if any
    ///
    /// Only the first eligible target (buildings, then tanks, then infantry,
    /// each in collection order) is affected. A dead projectile does nothing.
    pub fn update(
        &mut self,
        dt: f32,
        arena: &Arena,
        targets: &mut Targets<'_>,
        fx: &mut dyn EffectSink,
    ) -> Option<Hit> {
        if !self.alive {
            return None;
        }

        self.life -= dt;
        if self.life <= 0.0 {
            self.alive = false;
            return None;
        }

        self.pos += self.vel * dt;
        if !self.pos.is_finite() {
            self.alive = false;
            return None;
        }

        self.trail_timer -= dt;
        if self.trail_timer <= 0.0 {
            self.trail_timer = TRAIL_INTERVAL_MS;
            fx.spawn_trail(self.pos, self.faction);
        }

        if !arena.contains_circle(self.pos, self.radius) {
            self.alive = false;
            return None;
        }

        if let Some(i) = self.strike_structure(targets.structures, fx) {
            return Some(Hit::Structure(i));
        }
        if let Some(i) = self.strike_vehicle(targets.vehicles, fx) {
            return Some(Hit::Vehicle(i));
        }
        self.strike_pedestrian(targets.pedestrians, fx)
            .map(Hit::Pedestrian)
    }

    fn strike_structure(
        &mut self,
        structures: &mut [Structure],
        fx: &mut dyn EffectSink,
    ) -> Option<usize> {
        let index = structures.iter().position(|s| {
            s.faction != self.faction
                && !s.dead
                && circle_intersects_rect(self.pos, self.radius, &s.rect)
        })?;

        self.alive = false;
        let structure = &mut structures[index];
        if structure.take_damage(self.damage) {
            let center = structure.rect.center();
            log::debug!(
                "{} {:?} destroyed by {}",
                structure.faction,
                structure.kind,
                self.faction
            );
            fx.spawn_explosion(center, self.faction);
            fx.spawn_rubble(center, None);
        }
        fx.spawn_impact(self.pos, self.faction);
        Some(index)
    }

    fn strike_vehicle(
        &mut self,
        vehicles: &mut [Vehicle],
        fx: &mut dyn EffectSink,
    ) -> Option<usize> {
        let index = vehicles.iter().position(|v| {
            v.faction != self.faction
                && !v.dead
                && circle_intersects_rect(self.pos, self.radius, &v.hitbox())
        })?;

        self.alive = false;
        let vehicle = &mut vehicles[index];
        vehicle.hp = vehicle.hp.saturating_sub(self.damage);
        if vehicle.hp == 0 {
            vehicle.destroy();
            fx.spawn_explosion(self.pos, self.faction);
        } else {
            fx.spawn_impact(self.pos, self.faction);
        }
        Some(index)
    }

    fn strike_pedestrian(
        &mut self,
        pedestrians: &mut [Pedestrian],
        fx: &mut dyn EffectSink,
    ) -> Option<usize> {
        let index = pedestrians.iter().position(|p| {
            p.alive
                && p.faction != self.faction
                && circle_intersects_rect(self.pos, self.radius, &p.hitbox())
        })?;

        self.alive = false;
        let pedestrian = &mut pedestrians[index];
        pedestrian.hp = pedestrian.hp.saturating_sub(self.damage);
        if pedestrian.hp == 0 {
            pedestrian.alive = false;
            fx.spawn_mini_explosion(pedestrian.pos, self.faction);
        } else {
            fx.spawn_impact(self.pos, self.faction);
        }
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectEvent, EffectKind};
    use crate::sim::structure::StructureKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 16.0;

    fn count(events: &[EffectEvent], kind: EffectKind) -> usize {
        events.iter().filter(|e| e.kind == kind).count()
    }

    #[test]
    fn test_lifetime_expiry() {
        let arena = Arena::default();
        let mut p = Projectile::new(Vec2::new(600.0, 400.0), Vec2::ZERO, Faction::Blue);
        let mut events = Vec::new();
        let mut targets = Targets::new(&mut [], &mut [], &mut []);

        p.update(PROJECTILE_LIFE_MS - 1.0, &arena, &mut targets, &mut events);
        assert!(p.alive);
        p.update(1.0, &arena, &mut targets, &mut events);
        assert!(!p.alive);

        // Dead projectiles never act again
        let before = events.len();
        p.update(DT, &arena, &mut targets, &mut events);
        assert_eq!(events.len(), before);
    }

    #[test]
    fn test_leaves_arena() {
        let arena = Arena::default();
        let mut p = Projectile::new(Vec2::new(10.0, 400.0), Vec2::new(-0.6, 0.0), Faction::Red);
        let mut events = Vec::new();
        let mut targets = Targets::new(&mut [], &mut [], &mut []);
        p.update(DT, &arena, &mut targets, &mut events);
        assert!(!p.alive);
    }

    #[test]
    fn test_trail_cadence() {
        let arena = Arena::default();
        let mut p = Projectile::new(Vec2::new(100.0, 400.0), Vec2::new(0.1, 0.0), Faction::Green);
        let mut events = Vec::new();
        let mut targets = Targets::new(&mut [], &mut [], &mut []);
        for _ in 0..10 {
            p.update(20.0, &arena, &mut targets, &mut events);
        }
        // Emitted on the first update, then every 60 ms
        assert_eq!(count(&events, EffectKind::Trail), 4);
    }

    #[test]
    fn test_hits_only_first_target_and_skips_own_faction() {
        let arena = Arena::default();
        let mut structures = vec![
            Structure::new(90.0, 380.0, Faction::Blue, StructureKind::Block),
            Structure::new(90.0, 380.0, Faction::Red, StructureKind::Factory),
            Structure::new(90.0, 380.0, Faction::Green, StructureKind::Factory),
        ];
        let mut vehicles = vec![Vehicle::new(Vec2::new(100.0, 400.0), Faction::Red, 1)];
        let mut p = Projectile::new(Vec2::new(100.0, 400.0), Vec2::ZERO, Faction::Blue);
        let mut events = Vec::new();

        let hit = {
            let mut targets = Targets {
                structures: &mut structures,
                vehicles: &mut vehicles,
                pedestrians: &mut [],
            };
            p.update(DT, &arena, &mut targets, &mut events)
        };

        assert_eq!(hit, Some(Hit::Structure(1)));
        assert!(!p.alive);
        assert_eq!(structures[0].hp, structures[0].max_hp);
        assert_eq!(structures[1].hp, structures[1].max_hp - 1);
        assert_eq!(structures[2].hp, structures[2].max_hp);
        assert_eq!(vehicles[0].hp, VEHICLE_MAX_HP);
        assert_eq!(count(&events, EffectKind::Impact), 1);
    }

    #[test]
    fn test_passes_through_own_tank_and_infantry() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut vehicles = vec![Vehicle::new(Vec2::new(300.0, 300.0), Faction::Blue, 0)];
        let mut pedestrians = vec![Pedestrian::new(
            Vec2::new(300.0, 310.0),
            Faction::Blue,
            &mut rng,
        )];
        let mut p = Projectile::new(Vec2::new(300.0, 300.0), Vec2::ZERO, Faction::Blue);
        let mut events = Vec::new();

        let hit = {
            let mut targets = Targets::new(&mut [], &mut vehicles, &mut pedestrians);
            p.update(DT, &arena, &mut targets, &mut events)
        };

        assert_eq!(hit, None);
        assert!(p.alive);
        assert_eq!(vehicles[0].hp, VEHICLE_MAX_HP);
        assert!(!vehicles[0].dead);
        assert_eq!(pedestrians[0].hp, PEDESTRIAN_MAX_HP);
        assert!(pedestrians[0].alive);
        assert_eq!(count(&events, EffectKind::Impact), 0);

        // An enemy soldier behind the friendly ones is still struck
        pedestrians.push(Pedestrian::new(Vec2::new(300.0, 310.0), Faction::Red, &mut rng));
        let mut targets = Targets::new(&mut [], &mut vehicles, &mut pedestrians);
        assert_eq!(
            p.update(DT, &arena, &mut targets, &mut events),
            Some(Hit::Pedestrian(1))
        );
        assert!(pedestrians[0].alive);
        assert!(!pedestrians[1].alive);
    }

    #[test]
    fn test_destroys_structure_once() {
        let arena = Arena::default();
        let mut structures = vec![Structure::new(90.0, 380.0, Faction::Red, StructureKind::Tower)];
        let mut events = Vec::new();

        for _ in 0..5 {
            let mut p = Projectile::new(Vec2::new(100.0, 400.0), Vec2::ZERO, Faction::Blue);
            let mut targets = Targets::new(&mut structures, &mut [], &mut []);
            p.update(DT, &arena, &mut targets, &mut events);
        }

        let s = &structures[0];
        assert!(s.dead);
        assert_eq!(s.hp, 0);
        assert_eq!(count(&events, EffectKind::Explosion), 1);
        assert_eq!(count(&events, EffectKind::Rubble), 1);
        // Tower has 3 hp; the remaining shots pass through the ruin
        assert_eq!(count(&events, EffectKind::Impact), 3);
        let explosion = events.iter().find(|e| e.kind == EffectKind::Explosion).unwrap();
        assert_eq!(explosion.pos, s.rect.center());
    }

    #[test]
    fn test_kills_vehicle() {
        let arena = Arena::default();
        let mut vehicles = vec![Vehicle::new(Vec2::new(300.0, 300.0), Faction::Green, 2)];
        vehicles[0].hp = 1;
        let mut p = Projectile::new(Vec2::new(300.0, 320.0), Vec2::ZERO, Faction::Red);
        let mut events = Vec::new();
        let mut targets = Targets::new(&mut [], &mut vehicles, &mut []);

        assert_eq!(p.update(DT, &arena, &mut targets, &mut events), Some(Hit::Vehicle(0)));
        assert!(vehicles[0].dead);
        assert_eq!(vehicles[0].hp, 0);
        assert_eq!(count(&events, EffectKind::Explosion), 1);
    }

    #[test]
    fn test_pedestrian_hitbox_is_above_feet() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pedestrians = vec![Pedestrian::new(
            Vec2::new(400.0, 400.0),
            Faction::Green,
            &mut rng,
        )];
        let mut events = Vec::new();

        // Just below the feet: outside the body box
        let mut low = Projectile::new(Vec2::new(400.0, 410.0), Vec2::ZERO, Faction::Blue);
        let mut targets = Targets::new(&mut [], &mut [], &mut pedestrians);
        assert_eq!(low.update(DT, &arena, &mut targets, &mut events), None);
        assert!(low.alive);

        // Chest height
        let mut chest = Projectile::new(Vec2::new(400.0, 390.0), Vec2::ZERO, Faction::Blue);
        assert_eq!(chest.update(DT, &arena, &mut targets, &mut events), Some(Hit::Pedestrian(0)));
        assert!(!pedestrians[0].alive);
        assert_eq!(count(&events, EffectKind::MiniExplosion), 1);
    }

    #[test]
    fn test_dead_targets_are_ignored() {
        let arena = Arena::default();
        let mut vehicles = vec![Vehicle::new(Vec2::new(300.0, 300.0), Faction::Green, 2)];
        vehicles[0].destroy();
        let mut p = Projectile::new(Vec2::new(300.0, 300.0), Vec2::ZERO, Faction::Red);
        let mut events = Vec::new();
        let mut targets = Targets::new(&mut [], &mut vehicles, &mut []);
        assert_eq!(p.update(DT, &arena, &mut targets, &mut events), None);
        assert!(p.alive);
    }
}
