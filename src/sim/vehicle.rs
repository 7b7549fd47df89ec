//! Player tanks: movement, solid collision with buildings, firing, respawn

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_intersects_rect, resolve_circle_rect};
use super::projectile::Projectile;
use super::state::{Arena, Faction};
use super::structure::Structure;
use crate::consts::*;
use crate::effects::EffectSink;
use crate::input::{Action, Control, InputSource};

/// A player-controlled tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    pub radius: f32,
    pub faction: Faction,
    /// Control slot queried on the input source
    pub slot: u8,
    /// Pixels per ms
    pub speed: f32,
    /// Unit vector; the tank aims where it last moved
    pub aim: Vec2,
    pub fire_cooldown: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub dead: bool,
    pub respawn_timer: f32,
}

impl Vehicle {
    pub fn new(pos: Vec2, faction: Faction, slot: u8) -> Self {
        Self {
            pos,
            radius: VEHICLE_RADIUS,
            faction,
            slot,
            speed: VEHICLE_SPEED,
            aim: Vec2::X,
            fire_cooldown: 0.0,
            hp: VEHICLE_MAX_HP,
            max_hp: VEHICLE_MAX_HP,
            dead: false,
            respawn_timer: 0.0,
        }
    }

    /// Bounding square used for projectile hits
    pub fn hitbox(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }

    /// Enter the dead state and start the respawn countdown
    pub fn destroy(&mut self) {
        self.hp = 0;
        self.dead = true;
        self.respawn_timer = VEHICLE_RESPAWN_MS;
        log::debug!("{} tank destroyed", self.faction);
    }

    fn held(&self, input: &dyn InputSource, control: Control) -> bool {
        input.is_held(Action::pilot(self.slot, control))
    }

    /// Normalized movement direction from the held direction controls
    pub fn steering(&self, input: &dyn InputSource) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.held(input, Control::Left) {
            dir.x -= 1.0;
        }
        if self.held(input, Control::Right) {
            dir.x += 1.0;
        }
        if self.held(input, Control::Up) {
            dir.y -= 1.0;
        }
        if self.held(input, Control::Down) {
            dir.y += 1.0;
        }
        dir.normalize_or_zero()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        arena: &Arena,
        base: Vec2,
        structures: &[Structure],
        input: &dyn InputSource,
        rng: &mut Pcg32,
        projectiles: &mut Vec<Projectile>,
        fx: &mut dyn EffectSink,
    ) {
        if self.dead {
            self.respawn_timer -= dt;
            if self.respawn_timer <= 0.0 {
                let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5)
                    * VEHICLE_RESPAWN_JITTER;
                self.pos = arena.clamp_point(base + jitter, self.radius, self.radius);
                self.hp = self.max_hp;
                self.dead = false;
                self.respawn_timer = 0.0;
                log::debug!("{} tank respawned", self.faction);
            }
            return;
        }

        let dir = self.steering(input);
        if dir != Vec2::ZERO {
            self.aim = dir;
        }

        let previous = self.pos;
        self.pos += dir * self.speed * dt;
        self.pos = arena.clamp_point(self.pos, self.radius, self.radius);

        // Buildings are solid for every faction; resolve one at a time
        for s in structures.iter().filter(|s| !s.dead) {
            if circle_intersects_rect(self.pos, self.radius, &s.rect) {
                self.pos = resolve_circle_rect(self.pos, self.radius, &s.rect);
            }
        }
        self.pos = arena.clamp_point(self.pos, self.radius, self.radius);
        if !self.pos.is_finite() {
            self.pos = previous;
        }

        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if self.held(input, Control::Fire) && self.fire_cooldown == 0.0 {
            let spawn = self.pos + self.aim * (self.radius + 6.0);
            projectiles.push(Projectile::new(spawn, self.aim * VEHICLE_SHOT_SPEED, self.faction));
            fx.spawn_muzzle(spawn, self.faction);
            self.fire_cooldown = VEHICLE_FIRE_INTERVAL_MS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectEvent, NullEffects};
    use crate::input::ScriptedInput;
    use crate::sim::structure::StructureKind;
    use rand::SeedableRng;

    const DT: f32 = 16.0;

    fn drive(
        v: &mut Vehicle,
        input: &ScriptedInput,
        structures: &[Structure],
        projectiles: &mut Vec<Projectile>,
        dt: f32,
    ) {
        let mut rng = Pcg32::seed_from_u64(9);
        v.update(
            dt,
            &Arena::default(),
            Vec2::new(200.0, 600.0),
            structures,
            input,
            &mut rng,
            projectiles,
            &mut NullEffects,
        );
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut v = Vehicle::new(Vec2::new(400.0, 400.0), Faction::Blue, 0);
        let input = ScriptedInput::holding([
            Action::pilot(0, Control::Right),
            Action::pilot(0, Control::Down),
        ]);
        drive(&mut v, &input, &[], &mut Vec::new(), 100.0);

        let moved = v.pos - Vec2::new(400.0, 400.0);
        assert!((moved.length() - VEHICLE_SPEED * 100.0).abs() < 1e-3);
        assert!((v.aim - Vec2::new(1.0, 1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_aim_kept_when_stationary() {
        let mut v = Vehicle::new(Vec2::new(400.0, 400.0), Faction::Blue, 0);
        drive(
            &mut v,
            &ScriptedInput::holding([Action::pilot(0, Control::Up)]),
            &[],
            &mut Vec::new(),
            DT,
        );
        assert_eq!(v.aim, Vec2::new(0.0, -1.0));
        drive(&mut v, &ScriptedInput::default(), &[], &mut Vec::new(), DT);
        assert_eq!(v.aim, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_other_slot_controls_are_ignored() {
        let mut v = Vehicle::new(Vec2::new(400.0, 400.0), Faction::Red, 1);
        let input = ScriptedInput::holding([Action::pilot(0, Control::Left)]);
        drive(&mut v, &input, &[], &mut Vec::new(), DT);
        assert_eq!(v.pos, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_clamped_to_arena() {
        let mut v = Vehicle::new(Vec2::new(30.0, 30.0), Faction::Blue, 0);
        let input = ScriptedInput::holding([
            Action::pilot(0, Control::Left),
            Action::pilot(0, Control::Up),
        ]);
        drive(&mut v, &input, &[], &mut Vec::new(), 200.0);
        assert_eq!(v.pos, Vec2::new(VEHICLE_RADIUS, VEHICLE_RADIUS));
    }

    #[test]
    fn test_pushed_out_of_buildings_of_any_faction() {
        let own = Structure::new(420.0, 370.0, Faction::Blue, StructureKind::Block);
        let mut v = Vehicle::new(Vec2::new(400.0, 400.0), Faction::Blue, 0);
        let input = ScriptedInput::holding([Action::pilot(0, Control::Right)]);
        for _ in 0..20 {
            drive(&mut v, &input, std::slice::from_ref(&own), &mut Vec::new(), DT);
            assert!(!circle_intersects_rect(v.pos, v.radius - 1e-3, &own.rect));
        }
        assert!((v.pos.x - (420.0 - VEHICLE_RADIUS)).abs() < 1e-3);
    }

    #[test]
    fn test_ruins_are_not_solid() {
        let mut ruin = Structure::new(420.0, 370.0, Faction::Red, StructureKind::Block);
        ruin.take_damage(ruin.max_hp);
        let mut v = Vehicle::new(Vec2::new(400.0, 400.0), Faction::Blue, 0);
        let input = ScriptedInput::holding([Action::pilot(0, Control::Right)]);
        drive(&mut v, &input, std::slice::from_ref(&ruin), &mut Vec::new(), 100.0);
        assert!(v.pos.x > 420.0);
    }

    #[test]
    fn test_fire_cadence() {
        let mut v = Vehicle::new(Vec2::new(400.0, 400.0), Faction::Green, 2);
        let fire = ScriptedInput::holding([Action::pilot(2, Control::Fire)]);
        let mut projectiles = Vec::new();

        drive(&mut v, &fire, &[], &mut projectiles, DT);
        assert_eq!(projectiles.len(), 1);
        let shot = &projectiles[0];
        assert_eq!(shot.pos, Vec2::new(400.0 + VEHICLE_RADIUS + 6.0, 400.0));
        assert_eq!(shot.vel, Vec2::new(VEHICLE_SHOT_SPEED, 0.0));

        // 300 ms between shots
        for _ in 0..18 {
            drive(&mut v, &fire, &[], &mut projectiles, DT);
        }
        assert_eq!(projectiles.len(), 1);
        drive(&mut v, &fire, &[], &mut projectiles, 12.0);
        assert_eq!(projectiles.len(), 2);
    }

    #[test]
    fn test_respawn_after_countdown() {
        let mut v = Vehicle::new(Vec2::new(900.0, 100.0), Faction::Blue, 0);
        let mut rng = Pcg32::seed_from_u64(3);
        let base = Vec2::new(210.0, 610.0);
        let arena = Arena::default();
        let mut events: Vec<EffectEvent> = Vec::new();
        let fire = ScriptedInput::holding([Action::pilot(0, Control::Fire)]);
        let mut projectiles = Vec::new();

        v.destroy();
        assert!(v.dead);
        assert_eq!(v.hp, 0);

        v.update(
            VEHICLE_RESPAWN_MS - 1.0,
            &arena,
            base,
            &[],
            &fire,
            &mut rng,
            &mut projectiles,
            &mut events,
        );
        assert!(v.dead);
        assert!(projectiles.is_empty());

        v.update(1.0, &arena, base, &[], &fire, &mut rng, &mut projectiles, &mut events);
        assert!(!v.dead);
        assert_eq!(v.hp, VEHICLE_MAX_HP);
        assert!((v.pos - base).abs().max_element() <= VEHICLE_RESPAWN_JITTER / 2.0);
        // Respawn consumes the tick
        assert!(projectiles.is_empty());
    }
}
