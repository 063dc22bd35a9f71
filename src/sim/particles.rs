//! Particle/explosion engine
//!
//! Explosions are built from concentric "rings" of free-flying particles. Each
//! particle has a fixed velocity, an accumulating gravity term, and a life
//! budget in ticks.

use glam::Vec2;
use rand::Rng;

use crate::consts::{PARTICLE_FADE, PARTICLES_PER_RING};
use crate::renderer::{Sprite, Surface};

/// Parameters for one explosion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionSpec {
    /// Centre of the blast
    pub origin: Vec2,
    /// Particle width and height; also scales ring speed
    pub size: f32,
    /// Rings are numbered `1..rings`
    pub rings: u32,
    /// Ticks each particle lives
    pub life: u32,
    /// Ring speed is `ring * size * speed_factor * 0.01`
    pub speed_factor: f32,
    /// Added `gravity * age` to vertical motion every tick
    pub gravity: f32,
}

impl ExplosionSpec {
    /// Large blast used at the four screen corners by the bomb
    pub fn corner_blast(origin: Vec2) -> Self {
        Self {
            origin,
            size: 130.0,
            rings: 15,
            life: 70,
            speed_factor: 3.0,
            gravity: 0.0,
        }
    }

    /// Smaller blast at the centre of the screen; its completion arms the bomb cooldown
    pub fn centre_blast(origin: Vec2) -> Self {
        Self {
            origin,
            size: 100.0,
            rings: 10,
            life: 70,
            speed_factor: 3.0,
            gravity: 0.0,
        }
    }

    /// Number of particles this explosion produces
    pub fn particle_count(&self) -> usize {
        (1..self.rings).map(|ring| (PARTICLES_PER_RING * ring) as usize).sum()
    }
}

/// A single fire particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-tick displacement, fixed at creation
    pub vel: Vec2,
    pub gravity: f32,
    /// Tick budget; the particle dies when `moves` reaches it
    pub life: u32,
    /// Ticks advanced so far
    pub moves: u32,
}

impl Particle {
    fn new(pos: Vec2, size: f32, speed: f32, gravity: f32, life: u32, degrees: u32) -> Self {
        let angle = (degrees as f32).to_radians();
        Self {
            pos,
            size: Vec2::splat(size),
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            gravity,
            life,
            moves: 0,
        }
    }

    /// Advance one tick. Returns whether the particle is still alive.
    pub fn step(&mut self) -> bool {
        self.moves += 1;
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y + self.gravity * self.moves as f32;
        self.moves < self.life
    }

    /// Draw opacity; unclamped, so young particles exceed 1.0
    pub fn alpha(&self) -> f32 {
        PARTICLE_FADE / self.moves as f32
    }
}

/// Owns every live particle
#[derive(Debug, Clone, Default)]
pub struct ParticleEngine {
    particles: Vec<Particle>,
}

impl ParticleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Enqueue an explosion. Returns the number of particles created.
    pub fn spawn_explosion(&mut self, spec: ExplosionSpec, rng: &mut impl Rng) -> usize {
        let start = spec.origin - Vec2::splat(spec.size * 0.5);
        let base_speed = spec.size * spec.speed_factor * 0.01;

        self.particles.reserve(spec.particle_count());
        let mut created = 0;
        for ring in 1..spec.rings {
            let speed = ring as f32 * base_speed;
            for _ in 0..PARTICLES_PER_RING * ring {
                let degrees: u32 = rng.random_range(0..360);
                self.particles
                    .push(Particle::new(start, spec.size, speed, spec.gravity, spec.life, degrees));
                created += 1;
            }
        }
        created
    }

    /// Enqueue an explosion, then call `on_complete` with the particle count.
    ///
    /// The callback runs right after enqueuing, not when the particles expire.
    pub fn spawn_explosion_then(
        &mut self,
        spec: ExplosionSpec,
        rng: &mut impl Rng,
        on_complete: impl FnOnce(usize),
    ) -> usize {
        let created = self.spawn_explosion(spec, rng);
        on_complete(created);
        created
    }

    /// Advance every particle and drop the expired ones
    pub fn advance(&mut self) {
        self.particles.retain_mut(Particle::step);
    }

    /// Advance, prune, and draw survivors with the fire sprite
    pub fn advance_and_draw(&mut self, surface: &mut impl Surface) {
        self.advance();
        for particle in &self.particles {
            surface.set_global_alpha(particle.alpha());
            surface.draw_image_scaled(
                Sprite::Fire,
                particle.pos.x.floor(),
                particle.pos.y.floor(),
                particle.size.x,
                particle.size.y,
            );
            surface.set_global_alpha(1.0);
        }
    }
}
