//! Per-frame gallery driver
//!
//! [`Gallery`] owns the particle arena, the live config, the mode and the render
//! bridge. The host calls [`Gallery::resize`] on every measurement and
//! [`Gallery::tick`] once per animation frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{confine, resolve_collisions};
use super::config::SimulationConfig;
use super::integrate::integrate;
use super::mode::{Mode, layout_grid, scatter};
use super::state::ParticleStore;
use crate::bridge::RenderBridge;
use crate::catalog::{GalleryEntity, renderable};
use crate::settings::Settings;

/// Side effects for the host, drained after each interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// Play the tone for this button
    Tone { index: usize },
    /// Follow this button's link
    Navigate { target: String },
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub wall_hits: usize,
    pub collisions: usize,
}

/// Tick strategy, picked once per measurement. `None` means nothing ran.
type TickFn = fn(&mut ParticleStore, &SimulationConfig, &mut Pcg32) -> Option<TickStats>;

/// Static grid: nothing moves
pub fn tick_static(
    _store: &mut ParticleStore,
    _config: &SimulationConfig,
    _rng: &mut Pcg32,
) -> Option<TickStats> {
    None
}

/// Full simulation: integrate every button, then resolve every pair
pub fn tick_simulated(
    store: &mut ParticleStore,
    config: &SimulationConfig,
    rng: &mut Pcg32,
) -> Option<TickStats> {
    let wall_hits = integrate(store, config, rng);
    let collisions = resolve_collisions(store, config.collision_radius);
    confine(store, config);
    Some(TickStats {
        wall_hits,
        collisions,
    })
}

fn strategy_for(mode: Mode) -> TickFn {
    match mode {
        Mode::FullSimulation => tick_simulated,
        Mode::StaticGrid | Mode::Uninitialized => tick_static,
    }
}

/// A mounted button gallery
pub struct Gallery {
    entities: Vec<GalleryEntity>,
    store: ParticleStore,
    config: SimulationConfig,
    mode: Mode,
    strategy: TickFn,
    reduced_motion: bool,
    rng: Pcg32,
    bridge: RenderBridge,
    events: Vec<GalleryEvent>,
    ticks: u64,
    last_stats: TickStats,
}

impl Gallery {
    /// Mount a gallery; one particle per entity with imagery
    pub fn new(entities: Vec<GalleryEntity>, seed: u64) -> Self {
        let entities = renderable(entities);
        let count = entities.len();
        log::info!("Gallery mounted with {} buttons (seed {})", count, seed);

        Self {
            entities,
            store: ParticleStore::new(count),
            config: SimulationConfig::default(),
            mode: Mode::Uninitialized,
            strategy: tick_static,
            reduced_motion: false,
            rng: Pcg32::seed_from_u64(seed),
            bridge: RenderBridge::new(count),
            events: Vec::new(),
            ticks: 0,
            last_stats: TickStats::default(),
        }
    }

    /// Apply user preferences; re-evaluates the mode if already measured
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.config.wall_restitution = settings.wall_restitution();
        if self.reduced_motion != settings.reduced_motion {
            self.reduced_motion = settings.reduced_motion;
            if self.config.is_measured() {
                let size = self.config.container;
                self.resize(size.x, size.y);
            }
        }
    }

    /// Record a container measurement
    ///
    /// Updates the config in place and re-selects the mode. Entering a mode
    /// seeds its layout: a grid for `StaticGrid`, a random scatter for
    /// `FullSimulation`. A static grid is re-laid on every resize since its
    /// column count follows the width.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.update(width, height);
        let mode = Mode::select(width, height, self.reduced_motion);
        log::debug!("Container {}x{} -> {}", width, height, mode.as_str());

        if mode != self.mode {
            log::info!("Gallery mode: {} -> {}", self.mode.as_str(), mode.as_str());
        }

        match mode {
            Mode::StaticGrid => layout_grid(&mut self.store, &self.config),
            Mode::FullSimulation if self.mode != Mode::FullSimulation => {
                scatter(&mut self.store, &self.config, &mut self.rng)
            }
            _ => {}
        }

        self.mode = mode;
        self.strategy = strategy_for(mode);

        if mode != Mode::Uninitialized {
            self.bridge.publish(&self.store);
        }
    }

    /// Advance one animation frame. Returns whether physics ran.
    pub fn tick(&mut self) -> bool {
        if !self.config.is_measured() {
            return false;
        }

        let Some(stats) = (self.strategy)(&mut self.store, &self.config, &mut self.rng) else {
            return false;
        };
        self.last_stats = stats;
        self.bridge.publish(&self.store);
        self.ticks += 1;
        true
    }

    /// Pointer entered button `index` (tones only play while simulating)
    pub fn hover(&mut self, index: usize) {
        if index >= self.entities.len() {
            log::debug!("Hover on unknown button {}", index);
            return;
        }
        if self.mode.runs_physics() {
            self.events.push(GalleryEvent::Tone { index });
        }
    }

    /// Button `index` was clicked or tapped
    pub fn activate(&mut self, index: usize) {
        let Some(entity) = self.entities.get(index) else {
            log::debug!("Activation of unknown button {}", index);
            return;
        };
        let target = entity.target();
        self.events.push(GalleryEvent::Tone { index });
        self.events.push(GalleryEvent::Navigate { target });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GalleryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn entities(&self) -> &[GalleryEntity] {
        &self.entities
    }

    pub fn bridge(&self) -> &RenderBridge {
        &self.bridge
    }

    /// Physics ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }
}
