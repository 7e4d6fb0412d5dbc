//! The zone registry: named teleport destinations loaded from the `zones`
//! section of the config store.
//!
//! Loading never fails as a whole. Each entry is validated on its own and
//! either loaded, repaired (out-of-range height) or skipped with a reason.
//! If nothing survives, a `hub` entry is seeded into the store and the section
//! is read once more, so a user-edited store cannot leave the server without
//! a destination.

use std::collections::HashMap;

use bevy::math::DVec3;
use bevy::prelude::*;
use config_store::{ConfigStore, StoreError};

use super::load_report::{EntryOutcome, SkipReason, ZoneEntryReport, ZoneLoadReport};
use super::teleport_result::TeleportResult;
use super::zone::{clamp_height, Zone};
use crate::host::{Location, Teleport, WorldLookup};

/// Store section holding one child section per zone.
pub const ZONES_SECTION: &str = "zones";

/// Zone seeded when the store has no usable zones.
pub const DEFAULT_HUB_ID: &str = "hub";
pub const DEFAULT_HUB_WORLD: &str = "world";
pub const DEFAULT_HUB_POSITION: DVec3 = DVec3::new(0.0, 64.0, 0.0);

#[derive(Resource, Debug, Default)]
pub struct ZoneRegistry {
    /// Zones in load order.
    zones: Vec<Zone>,
    /// Lower-cased id -> index into `zones`.
    index: HashMap<String, usize>,
}

impl ZoneRegistry {
    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Rebuild the registry from the store's `zones` section.
    ///
    /// The previous contents are always discarded. Defaults written to the
    /// store along the way are persisted immediately.
    pub fn load_from_config(
        &mut self,
        store: &mut ConfigStore,
        worlds: &impl WorldLookup,
    ) -> ZoneLoadReport {
        self.zones.clear();
        self.index.clear();
        let mut report = ZoneLoadReport::default();

        if !store.is_section(ZONES_SECTION) {
            info!("No zones defined; creating default hub zone");
            report.created_default_section = true;
            if let Err(e) = ensure_hub_defaults(store) {
                warn!("Failed to persist default hub zone: {}", e);
                report.persist_failed = true;
            }
        }

        report.entries = self.load_entries(store, worlds);

        if self.zones.is_empty() {
            info!("No valid zones loaded; ensuring default hub exists");
            report.reseeded_hub = true;
            if let Err(e) = ensure_hub_defaults(store) {
                warn!("Failed to persist default hub zone: {}", e);
                report.persist_failed = true;
            }
            report.entries = self.load_entries(store, worlds);

            if self.zones.is_empty() {
                error!(
                    "Zone registry is empty: the default hub in world '{}' could not be loaded",
                    store.get_string_or(&hub_path("world"), DEFAULT_HUB_WORLD)
                );
            }
        }

        report
    }

    /// One pass over the `zones` section.
    fn load_entries(
        &mut self,
        store: &ConfigStore,
        worlds: &impl WorldLookup,
    ) -> Vec<ZoneEntryReport> {
        let mut entries = Vec::new();

        for key in store.section_keys(ZONES_SECTION) {
            let outcome = match read_zone(store, worlds, &key) {
                Ok((zone, outcome)) => {
                    let p = zone.position();
                    info!(
                        "Loaded zone: {} -> world={} @ ({},{},{})",
                        key,
                        zone.world(),
                        p.x,
                        p.y,
                        p.z
                    );
                    self.insert(zone);
                    outcome
                }
                Err(reason) => {
                    warn!("Zone '{}' {}; skipping.", key, reason);
                    EntryOutcome::Skipped(reason)
                }
            };
            entries.push(ZoneEntryReport { key, outcome });
        }

        entries
    }

    fn insert(&mut self, zone: Zone) {
        let key = zone.id().to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => {
                warn!(
                    "Zone '{}' replaces earlier zone '{}' (zone ids ignore case)",
                    zone.id(),
                    self.zones[slot].id()
                );
                self.zones[slot] = zone;
            }
            None => {
                self.index.insert(key, self.zones.len());
                self.zones.push(zone);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Case-insensitive lookup.
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.index
            .get(&id.to_lowercase())
            .map(|&slot| &self.zones[slot])
    }

    /// Display ids in load order, as written in the store.
    pub fn zone_ids(&self) -> Vec<String> {
        self.zones.iter().map(|z| z.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    // -------------------------------------------------------------------------
    // Teleporting
    // -------------------------------------------------------------------------

    /// Move `player` to the zone named `id`.
    ///
    /// The zone's world is looked up again here because worlds can be unloaded
    /// after the registry was built. Failures of the teleport itself come back
    /// as an unsuccessful [`TeleportResult`].
    pub fn teleport_to_zone(
        &self,
        worlds: &impl WorldLookup,
        player: &mut impl Teleport,
        id: &str,
    ) -> TeleportResult {
        let Some(zone) = self.zone(id) else {
            return TeleportResult::failure(format!("Unknown zone: {id}"));
        };
        if worlds.world(zone.world()).is_none() {
            return TeleportResult::failure(format!("Zone world not loaded: {}", zone.world()));
        }

        match player.teleport(&zone.location()) {
            Ok(()) => TeleportResult::success(format!("Teleported to zone: {id}")),
            Err(e) => {
                warn!("Teleport failed for {} to zone {}: {}", player.name(), id, e);
                TeleportResult::failure(format!("Teleport failed: {e}"))
            }
        }
    }
}

// =============================================================================
// Store helpers
// =============================================================================

fn zone_path(key: &str, field: &str) -> String {
    format!("{ZONES_SECTION}.{key}.{field}")
}

fn hub_path(field: &str) -> String {
    zone_path(DEFAULT_HUB_ID, field)
}

/// Validate one child of the `zones` section.
fn read_zone(
    store: &ConfigStore,
    worlds: &impl WorldLookup,
    key: &str,
) -> Result<(Zone, EntryOutcome), SkipReason> {
    if !store.is_section(&format!("{ZONES_SECTION}.{key}")) {
        return Err(SkipReason::NotASection);
    }

    let world_name = store
        .get_string(&zone_path(key, "world"))
        .filter(|w| !w.trim().is_empty())
        .ok_or(SkipReason::MissingWorld)?;
    let world = worlds
        .world(&world_name)
        .ok_or_else(|| SkipReason::UnknownWorld(world_name.clone()))?;

    let x = store.get_f64(&zone_path(key, "x"), f64::NAN);
    let y = store.get_f64(&zone_path(key, "y"), f64::NAN);
    let z = store.get_f64(&zone_path(key, "z"), f64::NAN);
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(SkipReason::InvalidCoordinates);
    }

    let clamped_y = clamp_height(y, world.max_height);
    let outcome = if clamped_y == y {
        EntryOutcome::Loaded
    } else {
        warn!(
            "Zone '{}' Y coordinate {} out of world bounds (0-{}); clamping to {}",
            key, y, world.max_height, clamped_y
        );
        EntryOutcome::Repaired {
            original_y: y,
            clamped_y,
        }
    };

    let yaw = store.get_f64(&zone_path(key, "yaw"), 0.0) as f32;
    let pitch = store.get_f64(&zone_path(key, "pitch"), 0.0) as f32;

    let zone = Zone::new(
        key.to_string(),
        world_name,
        DVec3::new(x, clamped_y, z),
        yaw,
        pitch,
    );
    Ok((zone, outcome))
}

/// Fill in any missing `zones.hub.*` field with the fallback hub and persist.
/// Fields that already hold a value of the right type are kept.
fn ensure_hub_defaults(store: &mut ConfigStore) -> Result<(), StoreError> {
    let world = store.get_string_or(&hub_path("world"), DEFAULT_HUB_WORLD);
    store.set(&hub_path("world"), world);

    let fields = [
        ("x", DEFAULT_HUB_POSITION.x),
        ("y", DEFAULT_HUB_POSITION.y),
        ("z", DEFAULT_HUB_POSITION.z),
        ("yaw", 0.0),
        ("pitch", 0.0),
    ];
    for (field, default) in fields {
        let path = hub_path(field);
        let value = store.get_f64(&path, default);
        store.set(&path, value);
    }

    store.save()
}

/// Where `/zone leave` sends players: the hub as currently written in the
/// store, with the fallback hub filling any gaps.
pub fn hub_location(store: &ConfigStore) -> Location {
    Location {
        world: store.get_string_or(&hub_path("world"), DEFAULT_HUB_WORLD),
        position: DVec3::new(
            store.get_f64(&hub_path("x"), DEFAULT_HUB_POSITION.x),
            store.get_f64(&hub_path("y"), DEFAULT_HUB_POSITION.y),
            store.get_f64(&hub_path("z"), DEFAULT_HUB_POSITION.z),
        ),
        yaw: store.get_f64(&hub_path("yaw"), 0.0) as f32,
        pitch: store.get_f64(&hub_path("pitch"), 0.0) as f32,
    }
}
