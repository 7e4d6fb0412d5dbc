//! The slice of the host server the registries depend on: world lookup by
//! name, player entities, and the teleport primitive.
//!
//! The registries only see the [`WorldLookup`] and [`Teleport`] traits, so
//! unit tests can substitute plain structs for the ECS-backed types below.

use std::collections::HashMap;
use std::fmt;

use bevy::math::DVec3;
use bevy::prelude::*;
use uuid::Uuid;

// =============================================================================
// Worlds
// =============================================================================

/// What the registries need to know about a loaded world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldInfo {
    /// Highest valid block height; zone `y` values are clamped against it.
    pub max_height: i32,
}

/// Resolves a world name to a currently loaded world.
pub trait WorldLookup {
    fn world(&self, name: &str) -> Option<WorldInfo>;
}

/// Worlds the host currently has loaded. World names are matched
/// case-insensitively.
#[derive(Resource, Debug, Clone, Default)]
pub struct LoadedWorlds {
    worlds: HashMap<String, WorldInfo>,
}

impl LoadedWorlds {
    /// Builder form of [`LoadedWorlds::load`].
    pub fn with(mut self, name: &str, max_height: i32) -> Self {
        self.load(name, max_height);
        self
    }

    /// Mark `name` as loaded (or update its height limit).
    pub fn load(&mut self, name: &str, max_height: i32) {
        self.worlds
            .insert(name.to_lowercase(), WorldInfo { max_height });
    }

    /// Returns `true` if the world was loaded.
    pub fn unload(&mut self, name: &str) -> bool {
        self.worlds.remove(&name.to_lowercase()).is_some()
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}

impl WorldLookup for LoadedWorlds {
    fn world(&self, name: &str) -> Option<WorldInfo> {
        self.worlds.get(&name.to_lowercase()).copied()
    }
}

// =============================================================================
// Locations and teleporting
// =============================================================================

/// A resolved teleport target.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub world: String,
    pub position: DVec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Failure reported by the host's teleport primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleportError(String);

impl TeleportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeleportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TeleportError {}

/// Something that can be moved to a [`Location`].
pub trait Teleport {
    /// Name used in log lines.
    fn name(&self) -> &str;

    fn teleport(&mut self, target: &Location) -> Result<(), TeleportError>;
}

// =============================================================================
// Player entities
// =============================================================================

/// A connected player.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
}

/// Where a player currently stands. Players that have not been placed in a
/// world yet (still logging in) have no `PlayerLocation`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerLocation(pub Location);

/// [`Teleport`] adapter over a player entity's components.
pub struct PlayerTeleport<'a> {
    name: &'a str,
    location: Option<Mut<'a, PlayerLocation>>,
}

impl<'a> PlayerTeleport<'a> {
    pub fn new(player: &'a Player, location: Option<Mut<'a, PlayerLocation>>) -> Self {
        Self {
            name: &player.name,
            location,
        }
    }
}

impl Teleport for PlayerTeleport<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn teleport(&mut self, target: &Location) -> Result<(), TeleportError> {
        match self.location.as_mut() {
            Some(location) => {
                location.0 = target.clone();
                Ok(())
            }
            None => Err(TeleportError::new(format!(
                "{} is not placed in any world",
                self.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_worlds_lookup_ignores_case() {
        let worlds = LoadedWorlds::default().with("World_Nether", 128);
        assert_eq!(
            worlds.world("world_nether"),
            Some(WorldInfo { max_height: 128 })
        );
        assert_eq!(
            worlds.world("WORLD_NETHER"),
            Some(WorldInfo { max_height: 128 })
        );
        assert!(worlds.world("world").is_none());
    }

    #[test]
    fn test_loaded_worlds_unload() {
        let mut worlds = LoadedWorlds::default().with("world", 320);
        assert_eq!(worlds.len(), 1);
        assert!(worlds.unload("WORLD"));
        assert!(!worlds.unload("world"));
        assert!(worlds.is_empty());
    }

    #[test]
    fn test_teleport_error_display() {
        let err = TeleportError::new("chunk not ready");
        assert_eq!(err.to_string(), "chunk not ready");
        assert_eq!(err.message(), "chunk not ready");
    }
}
