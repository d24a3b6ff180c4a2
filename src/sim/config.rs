//! Responsive simulation tunables
//!
//! Button size, collision radius and speed cap follow the container width at
//! two breakpoints. The gallery holds one config and rewrites it in place on
//! every resize, so the next tick always sees the latest row.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// True when the container is too narrow for the physics gallery
#[inline]
pub fn is_mobile(width: f32) -> bool {
    width < MOBILE_BREAKPOINT
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Rendered button edge length (px)
    pub body_size: f32,
    /// Two buttons collide when their anchors are closer than twice this
    pub collision_radius: f32,
    /// Speed cap (px per tick)
    pub max_velocity: f32,
    /// Fraction of the wall-normal speed kept on a bounce (1.0 = elastic)
    pub wall_restitution: f32,
    /// Measured container size (zero until the first layout pass)
    pub container: Vec2,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::for_width(DESKTOP_BREAKPOINT)
    }
}

impl SimulationConfig {
    /// Breakpoint row for a container width
    pub fn for_width(width: f32) -> Self {
        let (body_size, collision_radius, max_velocity) = if width < MOBILE_BREAKPOINT {
            (MOBILE_BODY_SIZE, MOBILE_COLLISION_RADIUS, MOBILE_MAX_VELOCITY)
        } else if width < DESKTOP_BREAKPOINT {
            (TABLET_BODY_SIZE, TABLET_COLLISION_RADIUS, TABLET_MAX_VELOCITY)
        } else {
            (DESKTOP_BODY_SIZE, DESKTOP_COLLISION_RADIUS, DESKTOP_MAX_VELOCITY)
        };

        Self {
            body_size,
            collision_radius,
            max_velocity,
            wall_restitution: 1.0,
            container: Vec2::ZERO,
        }
    }

    /// Re-resolve the breakpoint row for a new measurement, keeping restitution
    pub fn update(&mut self, width: f32, height: f32) {
        let restitution = self.wall_restitution;
        *self = Self::for_width(width);
        self.wall_restitution = restitution;
        self.container = Vec2::new(width, height);
    }

    /// Whether a real layout size has been recorded
    pub fn is_measured(&self) -> bool {
        self.container.x > 0.0 && self.container.y > 0.0
    }

    /// Largest legal top-left anchor on each axis
    ///
    /// Never negative: a container smaller than one button pins it at 0.
    pub fn bounds(&self) -> Vec2 {
        (self.container - Vec2::splat(self.body_size)).max(Vec2::ZERO)
    }
}
