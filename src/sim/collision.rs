//! Pairwise collision detection and response between buttons
//!
//! Every unordered pair `(i, j)` with `i < j` is checked in ascending order.
//! Resolution is sequential: a button corrected against `j` carries its new
//! position and velocity into its check against `k` in the same tick. There is
//! no broad phase; N is the number of gallery buttons (tens), and reordering the
//! pair walk would change which contacts win within a frame.

use glam::Vec2;

use super::config::SimulationConfig;
use super::state::{Particle, ParticleStore};

/// Collision normal used when two anchors coincide exactly
const DEGENERATE_NORMAL: Vec2 = Vec2::X;

/// Resolve every overlapping pair once. Returns the number of pairs resolved.
pub fn resolve_collisions(store: &mut ParticleStore, collision_radius: f32) -> usize {
    let count = store.len();
    let mut resolved = 0;

    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = store.pair_mut(i, j);
            if resolve_pair(a, b, collision_radius) {
                resolved += 1;
            }
        }
    }

    resolved
}

/// Separate and bounce two equal-mass buttons if they overlap
///
/// Each button moves half the overlap along the contact normal, then the
/// normal velocity components are exchanged while each tangential component
/// stays with its own button.
pub fn resolve_pair(a: &mut Particle, b: &mut Particle, collision_radius: f32) -> bool {
    let contact_distance = collision_radius * 2.0;
    let delta = b.pos - a.pos;
    let distance = delta.length();

    if distance >= contact_distance {
        return false;
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        DEGENERATE_NORMAL
    };

    // Positional correction, split evenly (masses are uniform)
    let push = normal * ((contact_distance - distance) * 0.5);
    a.pos -= push;
    b.pos += push;

    // Normal/tangential decomposition
    let tangent = normal.perp();
    let a_normal = a.vel.dot(normal);
    let b_normal = b.vel.dot(normal);
    let a_tangent = a.vel.dot(tangent);
    let b_tangent = b.vel.dot(tangent);

    // Equal masses: elastic collision swaps the normal components
    a.vel = normal * b_normal + tangent * a_tangent;
    b.vel = normal * a_normal + tangent * b_tangent;

    true
}

/// Pull every button back inside the container and under the speed cap
///
/// Collision pushes can cross a wall, and an oblique swap can hand a button
/// more speed than the cap. Direction is left alone; the next tick's wall step
/// turns anything pinned against a wall.
pub fn confine(store: &mut ParticleStore, config: &SimulationConfig) {
    let bounds = config.bounds();
    for p in store.iter_mut() {
        p.pos = p.pos.clamp(Vec2::ZERO, bounds);
        p.vel = p.vel.clamp_length_max(config.max_velocity);
    }
}
