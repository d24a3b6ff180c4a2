//! Button simulation module
//!
//! Everything that moves the buttons lives here. This module stays free of
//! browser dependencies:
//! - One fixed step per frame callback
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - No DOM or audio calls

pub mod collision;
pub mod config;
pub mod integrate;
pub mod mode;
pub mod state;
pub mod tick;

pub use collision::{confine, resolve_collisions, resolve_pair};
pub use config::{SimulationConfig, is_mobile};
pub use integrate::integrate;
pub use mode::{Mode, layout_grid, scatter};
pub use state::{Particle, ParticleStore};
pub use tick::{Gallery, GalleryEvent, TickStats, tick_simulated, tick_static};
