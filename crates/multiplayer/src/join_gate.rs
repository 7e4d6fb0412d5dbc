//! Refuses players who are not on the whitelist while it is enabled.

use bevy::prelude::*;
use config_store::ConfigStore;

use crate::access::AccessRegistry;
use crate::host::Player;

pub const PRIVATE_SERVER_KICK: &str = "Server is private. Contact an admin for access.";

/// Sent by the host once a connecting player's entity exists.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerJoinedEvent {
    pub player: Entity,
}

/// Asks the host to disconnect `player` with `reason`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct KickPlayerEvent {
    pub player: Entity,
    pub reason: String,
}

pub fn gate_joining_players(
    mut joins: EventReader<PlayerJoinedEvent>,
    mut kicks: EventWriter<KickPlayerEvent>,
    players: Query<&Player>,
    registry: Res<AccessRegistry>,
    store: Res<ConfigStore>,
) {
    for join in joins.read() {
        let Ok(player) = players.get(join.player) else {
            warn!("Join event for {:?} without a Player component", join.player);
            continue;
        };
        if registry.is_allowed(&store, &player.id) {
            continue;
        }
        info!("Kicking {} ({}): not whitelisted", player.name, player.id);
        kicks.send(KickPlayerEvent {
            player: join.player,
            reason: PRIVATE_SERVER_KICK.to_string(),
        });
    }
}
