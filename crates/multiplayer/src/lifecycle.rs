//! Startup loading, on-demand zone reloads, and the final whitelist write at
//! shutdown.

use bevy::prelude::*;
use config_store::ConfigStore;

use crate::access::AccessRegistry;
use crate::host::LoadedWorlds;
use crate::zones::ZoneRegistry;

/// Rebuild the zone registry from the store, e.g. after the host loaded or
/// unloaded a world.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReloadZonesEvent;

pub fn load_registries(
    mut store: ResMut<ConfigStore>,
    mut zones: ResMut<ZoneRegistry>,
    mut access: ResMut<AccessRegistry>,
    worlds: Res<LoadedWorlds>,
) {
    let report = zones.load_from_config(&mut store, &*worlds);
    info!(
        "Zone registry ready: {} loaded, {} skipped",
        report.loaded_count(),
        report.skipped_count()
    );
    access.load(&store);
}

pub fn reload_zones(
    mut events: EventReader<ReloadZonesEvent>,
    mut store: ResMut<ConfigStore>,
    mut zones: ResMut<ZoneRegistry>,
    worlds: Res<LoadedWorlds>,
) {
    // Several requests in one frame collapse into one reload.
    if events.read().count() == 0 {
        return;
    }
    let report = zones.load_from_config(&mut store, &*worlds);
    info!(
        "Zones reloaded: {} loaded, {} skipped",
        report.loaded_count(),
        report.skipped_count()
    );
}

pub fn persist_access_on_exit(
    mut exits: EventReader<AppExit>,
    access: Res<AccessRegistry>,
    mut store: ResMut<ConfigStore>,
) {
    if exits.read().count() == 0 {
        return;
    }
    if access.persist_on_shutdown(&mut store) {
        info!("Whitelist saved ({} entries)", access.len());
    }
}
