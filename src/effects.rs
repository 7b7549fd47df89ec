//! Effect hooks and cosmetic particles
//!
//! The simulation reports visual feedback through [`EffectSink`]. Nothing
//! emitted here ever flows back into gameplay: the particle layer owns its own
//! unseeded RNG so cosmetic scatter never disturbs the seeded gameplay stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::Faction;

/// Kinds of cosmetic effect the simulation can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Projectile struck something without destroying it
    Impact,
    /// A shot was fired
    Muzzle,
    /// Building or tank destroyed
    Explosion,
    /// Infantry killed
    MiniExplosion,
    /// Debris left by a destroyed building
    Rubble,
    /// Projectile trail puff
    Trail,
}

/// A single effect request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectEvent {
    pub kind: EffectKind,
    pub pos: Vec2,
    pub faction: Option<Faction>,
}

impl EffectEvent {
    pub fn new(kind: EffectKind, pos: Vec2, faction: Option<Faction>) -> Self {
        Self { kind, pos, faction }
    }
}

/// Outward boundary for visual feedback
pub trait EffectSink {
    fn emit(&mut self, event: EffectEvent);

    fn spawn_impact(&mut self, pos: Vec2, faction: Faction) {
        self.emit(EffectEvent::new(EffectKind::Impact, pos, Some(faction)));
    }

    fn spawn_muzzle(&mut self, pos: Vec2, faction: Faction) {
        self.emit(EffectEvent::new(EffectKind::Muzzle, pos, Some(faction)));
    }

    fn spawn_explosion(&mut self, pos: Vec2, faction: Faction) {
        self.emit(EffectEvent::new(EffectKind::Explosion, pos, Some(faction)));
    }

    fn spawn_mini_explosion(&mut self, pos: Vec2, faction: Faction) {
        self.emit(EffectEvent::new(EffectKind::MiniExplosion, pos, Some(faction)));
    }

    fn spawn_rubble(&mut self, pos: Vec2, faction: Option<Faction>) {
        self.emit(EffectEvent::new(EffectKind::Rubble, pos, faction));
    }

    fn spawn_trail(&mut self, pos: Vec2, faction: Faction) {
        self.emit(EffectEvent::new(EffectKind::Trail, pos, Some(faction)));
    }
}

/// Recording sink (tests, replays)
impl EffectSink for Vec<EffectEvent> {
    fn emit(&mut self, event: EffectEvent) {
        self.push(event);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn emit(&mut self, _event: EffectEvent) {}
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Effect that produced it (for color lookup)
    pub kind: EffectKind,
    pub faction: Option<Faction>,
    /// Remaining life in ms
    pub life: f32,
    /// Initial life in ms (for fading)
    pub total: f32,
    pub size: f32,
}

impl Particle {
    /// Opacity in 0..=1 for renderers
    pub fn alpha(&self) -> f32 {
        if self.total <= 0.0 {
            0.0
        } else {
            (self.life / self.total).clamp(0.0, 1.0)
        }
    }
}

/// Burst shape per effect kind: (count, min speed, speed spread, min life, life spread, size)
fn burst_profile(kind: EffectKind) -> (usize, f32, f32, f32, f32, f32) {
    match kind {
        EffectKind::Impact => (6, 0.2, 0.25, 300.0, 200.0, 2.0),
        EffectKind::Muzzle => (4, 0.25, 0.3, 180.0, 120.0, 2.0),
        EffectKind::Explosion => (24, 0.25, 0.5, 600.0, 300.0, 3.0),
        EffectKind::MiniExplosion => (10, 0.2, 0.35, 350.0, 200.0, 2.0),
        EffectKind::Rubble => (14, 0.15, 0.25, 700.0, 400.0, 2.0),
        EffectKind::Trail => (1, 0.0, 0.0, 220.0, 0.0, 1.5),
    }
}

/// Cosmetic particle layer fed by the effect hooks
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    max_particles: usize,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(4096)),
            max_particles,
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance all particles and drop expired ones
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.life -= dt;
            p.pos += p.vel * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn push(&mut self, particle: Particle) {
        if self.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.max_particles {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }
}

impl EffectSink for ParticleField {
    fn emit(&mut self, event: EffectEvent) {
        let (count, speed, speed_spread, life, life_spread, size) = burst_profile(event.kind);
        for _ in 0..count {
            let vel = if speed_spread > 0.0 || speed > 0.0 {
                let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
                let s = speed + self.rng.random::<f32>() * speed_spread;
                Vec2::new(angle.cos(), angle.sin()) * s
            } else {
                Vec2::ZERO
            };
            let life = life + self.rng.random::<f32>() * life_spread;
            self.push(Particle {
                pos: event.pos,
                vel,
                kind: event.kind,
                faction: event.faction,
                life,
                total: life,
                size,
            });
        }
    }
}
