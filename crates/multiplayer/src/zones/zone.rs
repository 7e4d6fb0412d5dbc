use bevy::math::DVec3;

use crate::host::Location;

/// A validated teleport destination.
///
/// Only [`ZoneRegistry`](super::ZoneRegistry) builds zones, after the world
/// name, coordinates and height repair have been checked against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    id: String,
    world: String,
    position: DVec3,
    yaw: f32,
    pitch: f32,
}

impl Zone {
    pub(crate) fn new(id: String, world: String, position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            id,
            world,
            position,
            yaw,
            pitch,
        }
    }

    /// Identifier as written in the store (case preserved).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the world the zone lives in; resolved against the host on use.
    pub fn world(&self) -> &str {
        &self.world
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn location(&self) -> Location {
        Location {
            world: self.world.clone(),
            position: self.position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

/// Repairs a zone height that falls outside `[0, max_height]`.
///
/// Below the floor the zone is lifted to 1.0; above the ceiling it is lowered
/// to two blocks under the ceiling, but never below 1.0. In-range values are
/// returned unchanged.
pub fn clamp_height(y: f64, max_height: i32) -> f64 {
    let ceiling = f64::from(max_height);
    if y < 0.0 {
        1.0
    } else if y > ceiling {
        (ceiling - 2.0).max(1.0)
    } else {
        y
    }
}
