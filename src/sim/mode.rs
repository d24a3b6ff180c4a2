//! Static grid vs. full simulation
//!
//! The mode is re-selected on every container measurement. Narrow (touch)
//! containers get a fixed grid and no physics at all; wider containers get the
//! full per-frame pipeline.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{SimulationConfig, is_mobile};
use super::state::ParticleStore;
use crate::consts::{GRID_GUTTER, GRID_INSET, SCATTER_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Container not measured yet; nothing runs
    #[default]
    Uninitialized,
    /// Buttons sit on a grid at rest
    StaticGrid,
    /// Buttons move and collide every frame
    FullSimulation,
}

impl Mode {
    /// Pick the mode for a measured container
    pub fn select(width: f32, height: f32, reduced_motion: bool) -> Self {
        if width <= 0.0 || height <= 0.0 {
            Mode::Uninitialized
        } else if is_mobile(width) || reduced_motion {
            Mode::StaticGrid
        } else {
            Mode::FullSimulation
        }
    }

    pub fn runs_physics(&self) -> bool {
        *self == Mode::FullSimulation
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Uninitialized => "uninitialized",
            Mode::StaticGrid => "static-grid",
            Mode::FullSimulation => "full-simulation",
        }
    }
}

/// Place buttons row-major on a fixed grid, at rest
pub fn layout_grid(store: &mut ParticleStore, config: &SimulationConfig) {
    let step = config.body_size + GRID_GUTTER;
    let cols = ((config.container.x / step).floor() as usize).max(1);

    for (i, p) in store.iter_mut().enumerate() {
        let col = (i % cols) as f32;
        let row = (i / cols) as f32;
        p.pos = Vec2::new(col * step + GRID_INSET, row * step + GRID_INSET);
        p.vel = Vec2::ZERO;
    }
}

/// Drop buttons at random spots with random drift
///
/// Positions are uniform over the container minus one button and a margin;
/// each velocity component is uniform in `±max_velocity / 2`.
pub fn scatter<R: Rng>(store: &mut ParticleStore, config: &SimulationConfig, rng: &mut R) {
    let span = (config.container - Vec2::splat(config.body_size + SCATTER_MARGIN)).max(Vec2::ZERO);
    let max_velocity = config.max_velocity;

    for p in store.iter_mut() {
        p.pos = Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);
        p.vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * max_velocity,
            (rng.random::<f32>() - 0.5) * max_velocity,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn measured(width: f32, height: f32) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.update(width, height);
        config
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(Mode::select(0.0, 0.0, false), Mode::Uninitialized);
        assert_eq!(Mode::select(1024.0, 0.0, false), Mode::Uninitialized);
        assert_eq!(Mode::select(500.0, 800.0, false), Mode::StaticGrid);
        assert_eq!(Mode::select(639.0, 800.0, false), Mode::StaticGrid);
        assert_eq!(Mode::select(640.0, 800.0, false), Mode::FullSimulation);
        assert_eq!(Mode::select(1280.0, 800.0, false), Mode::FullSimulation);
    }

    #[test]
    fn test_reduced_motion_forces_grid() {
        assert_eq!(Mode::select(1280.0, 800.0, true), Mode::StaticGrid);
        assert_eq!(Mode::select(0.0, 800.0, true), Mode::Uninitialized);
    }

    #[test]
    fn test_grid_layout() {
        // 56px buttons + 20 gutter = 76px step; 500 / 76 -> 6 columns
        let config = measured(500.0, 900.0);
        let mut store = ParticleStore::new(8);
        store.as_mut_slice()[3].vel = Vec2::new(0.3, 0.3);

        layout_grid(&mut store, &config);

        let p = store.as_slice();
        assert_eq!(p[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(p[1].pos, Vec2::new(86.0, 10.0));
        assert_eq!(p[5].pos, Vec2::new(390.0, 10.0));
        assert_eq!(p[6].pos, Vec2::new(10.0, 86.0));
        assert_eq!(p[7].pos, Vec2::new(86.0, 86.0));
        assert!(store.iter().all(|p| p.vel == Vec2::ZERO));
    }

    #[test]
    fn test_grid_has_at_least_one_column() {
        let config = measured(40.0, 900.0);
        let mut store = ParticleStore::new(3);

        layout_grid(&mut store, &config);

        let p = store.as_slice();
        assert_eq!(p[0].pos, Vec2::new(10.0, 10.0));
        assert_eq!(p[1].pos, Vec2::new(10.0, 86.0));
        assert_eq!(p[2].pos, Vec2::new(10.0, 162.0));
    }

    #[test]
    fn test_scatter_stays_in_span() {
        let config = measured(1024.0, 700.0);
        let mut store = ParticleStore::new(50);
        let mut rng = Pcg32::seed_from_u64(42);

        scatter(&mut store, &config, &mut rng);

        for p in store.iter() {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 1024.0 - 112.0 - 20.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 700.0 - 112.0 - 20.0);
            assert!(p.vel.x.abs() <= 0.4 && p.vel.y.abs() <= 0.4);
        }
    }

    #[test]
    fn test_scatter_in_tiny_container() {
        let config = measured(700.0, 60.0);
        let mut store = ParticleStore::new(5);
        let mut rng = Pcg32::seed_from_u64(9);

        scatter(&mut store, &config, &mut rng);

        assert!(store.iter().all(|p| p.pos.y == 0.0 && p.pos.is_finite()));
    }
}
