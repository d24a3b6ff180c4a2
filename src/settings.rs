//! Gallery settings and preferences
//!
//! Persisted in LocalStorage. Missing fields fall back to defaults so older
//! saved blobs keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::WALL_BOUNCE_DAMPING;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Tone volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence hover/tap tones
    pub muted: bool,

    // === Motion ===
    /// Lose a little energy on every wall bounce
    pub damped_walls: bool,
    /// Keep buttons on the static grid at every width
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            damped_walls: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Fraction of wall-normal speed kept on a bounce
    pub fn wall_restitution(&self) -> f32 {
        if self.damped_walls {
            WALL_BOUNCE_DAMPING
        } else {
            1.0
        }
    }

    /// Volume after mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    /// Adopt the browser's reduced-motion preference
    ///
    /// Only ever turns reduced motion on; an explicit opt-in is never undone by
    /// the system default. Returns whether anything changed (and needs saving).
    pub fn follow_system_motion(&mut self, prefers_reduced: bool) -> bool {
        if prefers_reduced && !self.reduced_motion {
            self.reduced_motion = true;
            true
        } else {
            false
        }
    }

    /// Parse a saved blob; unreadable blobs fall back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(target_arch = "wasm32")]
impl Settings {
    const STORAGE_KEY: &'static str = "button_gallery_settings";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load settings from LocalStorage
    pub fn load() -> Self {
        match Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten()) {
            Some(json) => {
                log::info!("Loaded settings from LocalStorage");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to LocalStorage
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable - settings not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage rejected settings");
                } else {
                    log::debug!("Settings saved");
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Settings {
    /// Native runs have nowhere to persist to
    pub fn load() -> Self {
        Self::default()
    }

    pub fn save(&self) {}
}
