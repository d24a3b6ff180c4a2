//! Particle arena
//!
//! One particle per gallery button, stored contiguously and addressed by
//! index. The arena is sized once at mount and never grows or shrinks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Kinematic state of one button
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Top-left anchor in container pixels
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Uniform (1.0) for every button
    pub mass: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            mass: 1.0,
        }
    }
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            ..Default::default()
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Fixed-size arena of particles, indexed by button position in the gallery
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Create `count` particles at the origin, at rest
    pub fn new(count: usize) -> Self {
        Self {
            particles: vec![Particle::default(); count],
        }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    /// Positions in index order
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.pos)
    }

    /// Mutable access to two distinct particles at once (`i < j`)
    pub fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Particle, &mut Particle) {
        debug_assert!(i < j, "pair_mut expects i < j (got {i}, {j})");
        let (head, tail) = self.particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    }

    /// Highest speed in the arena (0 when empty)
    pub fn max_speed(&self) -> f32 {
        self.particles
            .iter()
            .map(Particle::speed)
            .fold(0.0, f32::max)
    }
}
