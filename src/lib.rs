//! Button Gallery - colliding portfolio buttons
//!
//! Core modules:
//! - `sim`: Per-frame physics (integration, collisions, mode switching)
//! - `bridge`: Publishes particle positions to bound elements without re-rendering the view
//! - `catalog`: Gallery entities (the buttons) and their navigation targets
//! - `audio`: Hover/tap tones
//! - `settings`: Persisted user preferences

pub mod audio;
pub mod bridge;
pub mod catalog;
pub mod settings;
pub mod sim;

pub use bridge::{CellReader, RenderBridge};
pub use catalog::GalleryEntity;
pub use settings::Settings;
pub use sim::{Gallery, GalleryEvent, Mode, SimulationConfig};

/// Gallery configuration constants
pub mod consts {
    /// Containers narrower than this get the static grid (physics disabled)
    pub const MOBILE_BREAKPOINT: f32 = 640.0;
    /// Containers at least this wide get full-size buttons
    pub const DESKTOP_BREAKPOINT: f32 = 768.0;

    /// Mobile row: 56px buttons
    pub const MOBILE_BODY_SIZE: f32 = 56.0;
    pub const MOBILE_COLLISION_RADIUS: f32 = 35.0;
    /// Never used for motion (physics is off on mobile)
    pub const MOBILE_MAX_VELOCITY: f32 = 0.4;

    /// Small tablet row: 80px buttons
    pub const TABLET_BODY_SIZE: f32 = 80.0;
    pub const TABLET_COLLISION_RADIUS: f32 = 45.0;
    pub const TABLET_MAX_VELOCITY: f32 = 0.6;

    /// Desktop row: 112px buttons
    pub const DESKTOP_BODY_SIZE: f32 = 112.0;
    pub const DESKTOP_COLLISION_RADIUS: f32 = 60.0;
    pub const DESKTOP_MAX_VELOCITY: f32 = 0.8;

    /// Below this fraction of max velocity an axis gets a random nudge
    pub const ANTI_STALL_THRESHOLD: f32 = 0.15;
    /// Nudge is uniform in ±(this fraction of max velocity)
    pub const ANTI_STALL_IMPULSE: f32 = 0.05;

    /// Energy kept on a wall bounce when damped walls are enabled
    pub const WALL_BOUNCE_DAMPING: f32 = 0.95;

    /// Static grid spacing between buttons
    pub const GRID_GUTTER: f32 = 20.0;
    /// Static grid offset from the container's top-left corner
    pub const GRID_INSET: f32 = 10.0;
    /// Random scatter keeps this much slack from the far walls
    pub const SCATTER_MARGIN: f32 = 20.0;

    /// Route prefix for entities without an explicit href
    pub const PORTFOLIO_ROUTE: &str = "/portfolio";
}
