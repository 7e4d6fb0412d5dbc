//! `/zone join <name> | leave | list`.

use bevy::prelude::*;
use config_store::ConfigStore;

use super::events::{CommandReplyEvent, CommandSender, ZoneCommandEvent};
use crate::host::{LoadedWorlds, Player, PlayerLocation, PlayerTeleport, Teleport, WorldLookup};
use crate::zones::{hub_location, ZoneRegistry};

pub const ZONE_USAGE: &str = "Usage: /zone join <name> | /zone leave | /zone list";
pub const ZONE_JOIN_USAGE: &str = "Usage: /zone join <name>";
pub const PLAYERS_ONLY: &str = "Only players can use this command.";
pub const LEFT_ZONE: &str = "Left zone.";
pub const NO_ZONES: &str = "No zones are configured.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCommand {
    Join(String),
    Leave,
    List,
}

impl ZoneCommand {
    /// Parse the words after `/zone`. The error is the reply for the sender.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let Some(sub) = args.first() else {
            return Err(ZONE_USAGE.to_string());
        };
        match sub.to_lowercase().as_str() {
            "join" => args
                .get(1)
                .map(|name| ZoneCommand::Join(name.clone()))
                .ok_or_else(|| ZONE_JOIN_USAGE.to_string()),
            "leave" => Ok(ZoneCommand::Leave),
            "list" => Ok(ZoneCommand::List),
            other => Err(format!("Unknown subcommand: {other}")),
        }
    }
}

/// Text for `/zone list`.
pub fn zone_list_message(registry: &ZoneRegistry) -> String {
    let ids = registry.zone_ids();
    if ids.is_empty() {
        NO_ZONES.to_string()
    } else {
        format!("Available zones: {}", ids.join(", "))
    }
}

/// Send `player` to the hub written in the store. Nothing happens if the hub's
/// world is not loaded; the sender is told they left either way.
pub fn leave_zone(store: &ConfigStore, worlds: &impl WorldLookup, player: &mut impl Teleport) {
    let hub = hub_location(store);
    if worlds.world(&hub.world).is_none() {
        warn!(
            "{} left their zone but hub world '{}' is not loaded",
            player.name(),
            hub.world
        );
        return;
    }
    if let Err(e) = player.teleport(&hub) {
        warn!("Teleport to hub failed for {}: {}", player.name(), e);
    }
}

pub fn handle_zone_commands(
    mut events: EventReader<ZoneCommandEvent>,
    mut replies: EventWriter<CommandReplyEvent>,
    mut players: Query<(&Player, Option<&mut PlayerLocation>)>,
    registry: Res<ZoneRegistry>,
    worlds: Res<LoadedWorlds>,
    store: Res<ConfigStore>,
) {
    for event in events.read() {
        let player = match event.sender {
            CommandSender::Player(entity) => players.get_mut(entity).ok(),
            CommandSender::Console => None,
        };
        let Some((player, location)) = player else {
            replies.send(CommandReplyEvent {
                recipient: event.sender,
                message: PLAYERS_ONLY.to_string(),
            });
            continue;
        };

        let message = match ZoneCommand::parse(&event.args) {
            Err(usage) => usage,
            Ok(ZoneCommand::Join(name)) => {
                let mut target = PlayerTeleport::new(player, location);
                let result = registry.teleport_to_zone(&*worlds, &mut target, &name);
                if result.success {
                    info!("{} joined zone {}", player.name, name);
                }
                result.message
            }
            Ok(ZoneCommand::Leave) => {
                let mut target = PlayerTeleport::new(player, location);
                leave_zone(&store, &*worlds, &mut target);
                LEFT_ZONE.to_string()
            }
            Ok(ZoneCommand::List) => zone_list_message(&registry),
        };

        replies.send(CommandReplyEvent {
            recipient: event.sender,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_subcommands() {
        assert_eq!(
            ZoneCommand::parse(&args(&["join", "Arena"])),
            Ok(ZoneCommand::Join("Arena".into()))
        );
        assert_eq!(ZoneCommand::parse(&args(&["LEAVE"])), Ok(ZoneCommand::Leave));
        assert_eq!(ZoneCommand::parse(&args(&["list", "extra"])), Ok(ZoneCommand::List));
    }

    #[test]
    fn test_parse_usage_errors() {
        assert_eq!(ZoneCommand::parse(&[]), Err(ZONE_USAGE.to_string()));
        assert_eq!(
            ZoneCommand::parse(&args(&["join"])),
            Err(ZONE_JOIN_USAGE.to_string())
        );
        assert_eq!(
            ZoneCommand::parse(&args(&["Warp"])),
            Err("Unknown subcommand: warp".to_string())
        );
    }

    #[test]
    fn test_list_message_for_empty_registry() {
        assert_eq!(zone_list_message(&ZoneRegistry::default()), NO_ZONES);
    }
}
