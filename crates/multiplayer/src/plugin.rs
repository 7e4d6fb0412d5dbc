use bevy::prelude::*;
use config_store::ConfigStore;

use crate::access::AccessRegistry;
use crate::commands::{
    handle_access_commands, handle_zone_commands, AccessCommandEvent, CommandReplyEvent,
    ZoneCommandEvent,
};
use crate::host::LoadedWorlds;
use crate::join_gate::{gate_joining_players, KickPlayerEvent, PlayerJoinedEvent};
use crate::lifecycle::{load_registries, persist_access_on_exit, reload_zones, ReloadZonesEvent};
use crate::zones::ZoneRegistry;

/// Zone teleports, the whitelist, and their commands.
///
/// Insert the [`ConfigStore`] and [`LoadedWorlds`] resources before adding the
/// plugin; both registries are loaded from them at startup.
pub struct MultiplayerPlugin;

impl Plugin for MultiplayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ConfigStore>() {
            warn!("No ConfigStore inserted; zones and whitelist will not be persisted");
            app.insert_resource(ConfigStore::in_memory());
        }

        app.init_resource::<LoadedWorlds>()
            .init_resource::<ZoneRegistry>()
            .init_resource::<AccessRegistry>()
            .add_event::<ReloadZonesEvent>()
            .add_event::<ZoneCommandEvent>()
            .add_event::<AccessCommandEvent>()
            .add_event::<CommandReplyEvent>()
            .add_event::<PlayerJoinedEvent>()
            .add_event::<KickPlayerEvent>()
            .add_systems(Startup, load_registries)
            .add_systems(
                Update,
                (
                    reload_zones,
                    handle_zone_commands,
                    handle_access_commands,
                    gate_joining_players,
                )
                    .chain(),
            )
            .add_systems(Last, persist_access_on_exit);
    }
}
