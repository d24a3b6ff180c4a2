//! Per-tick integration
//!
//! Steps, per particle and in this order:
//! 1. Euler position update (one fixed step per frame callback)
//! 2. Wall reflection with hard clamp
//! 3. Anti-stall nudge on slow axes
//! 4. Speed clamp
//!
//! The step is not scaled by elapsed time, so motion speed follows the display
//! refresh rate.

use rand::Rng;

use super::config::SimulationConfig;
use super::state::ParticleStore;
use crate::consts::{ANTI_STALL_IMPULSE, ANTI_STALL_THRESHOLD};

/// Advance every particle by one tick. Returns the number of wall contacts.
pub fn integrate<R: Rng>(
    store: &mut ParticleStore,
    config: &SimulationConfig,
    rng: &mut R,
) -> usize {
    let bounds = config.bounds();
    let max_velocity = config.max_velocity;
    let min_velocity = max_velocity * ANTI_STALL_THRESHOLD;
    let impulse = max_velocity * ANTI_STALL_IMPULSE;
    let mut wall_hits = 0;

    for p in store.iter_mut() {
        p.pos += p.vel;

        if reflect_axis(&mut p.pos.x, &mut p.vel.x, bounds.x, config.wall_restitution) {
            wall_hits += 1;
        }
        if reflect_axis(&mut p.pos.y, &mut p.vel.y, bounds.y, config.wall_restitution) {
            wall_hits += 1;
        }

        // Keep the gallery alive: nudge axes that have nearly stopped
        if p.vel.x.abs() < min_velocity {
            p.vel.x += rng.random_range(-impulse..=impulse);
        }
        if p.vel.y.abs() < min_velocity {
            p.vel.y += rng.random_range(-impulse..=impulse);
        }

        p.vel = p.vel.clamp_length_max(max_velocity);
    }

    wall_hits
}

/// Clamp one axis into `[0, max]` and point its velocity back inside.
///
/// The inward component keeps `restitution` of its magnitude. Setting the sign
/// differs from a plain negation only when the velocity already points inward.
#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32, max: f32, restitution: f32) -> bool {
    if *pos <= 0.0 {
        *pos = 0.0;
        *vel = vel.abs() * restitution;
        true
    } else if *pos >= max {
        *pos = max;
        *vel = -vel.abs() * restitution;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Particle;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn desktop_config(width: f32, height: f32) -> SimulationConfig {
        let mut config = SimulationConfig::for_width(1024.0);
        config.container = Vec2::new(width, height);
        config
    }

    fn single(pos: Vec2, vel: Vec2) -> ParticleStore {
        ParticleStore::from_particles(vec![Particle::new(pos, vel)])
    }

    #[test]
    fn test_position_advances_by_velocity() {
        let config = desktop_config(1000.0, 1000.0);
        let mut store = single(Vec2::new(100.0, 200.0), Vec2::new(0.5, -0.5));
        let mut rng = Pcg32::seed_from_u64(1);

        integrate(&mut store, &config, &mut rng);

        let p = store.as_slice()[0];
        assert!((p.pos.x - 100.5).abs() < 1e-5);
        assert!((p.pos.y - 199.5).abs() < 1e-5);
        assert_eq!(p.vel, Vec2::new(0.5, -0.5));
    }

    #[test]
    fn test_far_wall_clamps_and_flips() {
        // 400x400 container with 112px buttons: far wall at 288
        let config = desktop_config(400.0, 400.0);
        let mut store = single(Vec2::new(350.0, 200.0), Vec2::new(10.0, 0.0));
        let mut rng = Pcg32::seed_from_u64(2);

        let hits = integrate(&mut store, &config, &mut rng);

        let p = store.as_slice()[0];
        assert_eq!(hits, 1);
        assert_eq!(p.pos.x, 288.0);
        assert!(p.vel.x < 0.0, "vx should point back inside, got {}", p.vel.x);
        assert!(p.speed() <= config.max_velocity + 1e-6);
    }

    #[test]
    fn test_reflect_axis_keeps_inward_velocity_inward() {
        // Pushed past the low wall while already heading back in
        let (mut pos, mut vel) = (-3.0, 0.4);
        assert!(reflect_axis(&mut pos, &mut vel, 288.0, 1.0));
        assert_eq!((pos, vel), (0.0, 0.4));

        let (mut pos, mut vel) = (300.0, -0.4);
        assert!(reflect_axis(&mut pos, &mut vel, 288.0, 0.5));
        assert_eq!((pos, vel), (288.0, -0.2));

        // Outward motion is negated as usual
        let (mut pos, mut vel) = (290.0, 0.4);
        assert!(reflect_axis(&mut pos, &mut vel, 288.0, 1.0));
        assert_eq!(vel, -0.4);

        let (mut pos, mut vel) = (100.0, 0.4);
        assert!(!reflect_axis(&mut pos, &mut vel, 288.0, 1.0));
        assert_eq!((pos, vel), (100.0, 0.4));
    }

    #[test]
    fn test_low_wall_reflection_law() {
        let config = desktop_config(1000.0, 1000.0);
        let k = 0.5;
        let mut store = single(Vec2::new(0.2, 300.0), Vec2::new(-k, 0.3));
        let mut rng = Pcg32::seed_from_u64(3);

        integrate(&mut store, &config, &mut rng);

        let p = store.as_slice()[0];
        assert_eq!(p.pos.x, 0.0);
        assert!((p.vel.x - k).abs() < 1e-6);
    }

    #[test]
    fn test_damped_wall_keeps_restitution_fraction() {
        let mut config = desktop_config(1000.0, 1000.0);
        config.wall_restitution = 0.95;
        let mut store = single(Vec2::new(0.1, 300.0), Vec2::new(-0.6, 0.3));
        let mut rng = Pcg32::seed_from_u64(4);

        integrate(&mut store, &config, &mut rng);

        let p = store.as_slice()[0];
        assert_eq!(p.pos.x, 0.0);
        assert!((p.vel.x - 0.57).abs() < 1e-6);
    }

    #[test]
    fn test_speed_clamped_preserving_direction() {
        let config = desktop_config(1000.0, 1000.0);
        let mut store = single(Vec2::new(500.0, 500.0), Vec2::new(3.0, 4.0));
        let mut rng = Pcg32::seed_from_u64(5);

        integrate(&mut store, &config, &mut rng);

        let p = store.as_slice()[0];
        assert!((p.speed() - 0.8).abs() < 1e-5);
        assert!((p.vel.x - 0.48).abs() < 1e-5);
        assert!((p.vel.y - 0.64).abs() < 1e-5);
    }

    #[test]
    fn test_anti_stall_nudges_slow_particles() {
        let config = desktop_config(1000.0, 1000.0);
        let start = Vec2::new(0.001, 0.001);
        let mut grew = 0;

        for seed in 0..64 {
            let mut store = single(Vec2::new(500.0, 500.0), start);
            let mut rng = Pcg32::seed_from_u64(seed);
            integrate(&mut store, &config, &mut rng);

            let vel = store.as_slice()[0].vel;
            assert_ne!(vel, start, "seed {seed}: no perturbation applied");
            assert!(vel.x.abs() <= 0.001 + 0.04 + 1e-6);
            assert!(vel.y.abs() <= 0.001 + 0.04 + 1e-6);
            if vel.x.abs() > start.x || vel.y.abs() > start.y {
                grew += 1;
            }
        }

        // Each axis only shrinks for a nudge in (-0.002, 0); both shrinking is rare
        assert!(grew >= 60, "only {grew}/64 runs gained speed");
    }

    #[test]
    fn test_fast_axes_not_nudged() {
        let config = desktop_config(1000.0, 1000.0);
        let vel = Vec2::new(0.4, -0.3);
        let mut store = single(Vec2::new(500.0, 500.0), vel);
        let mut rng = Pcg32::seed_from_u64(6);

        integrate(&mut store, &config, &mut rng);

        assert_eq!(store.as_slice()[0].vel, vel);
    }

    #[test]
    fn test_container_smaller_than_button_pins_to_origin() {
        let config = desktop_config(100.0, 100.0);
        let mut store = single(Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5));
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..10 {
            integrate(&mut store, &config, &mut rng);
            let p = store.as_slice()[0];
            assert_eq!(p.pos, Vec2::ZERO);
            assert!(p.vel.is_finite());
        }
    }
}
