//! `/access add|remove <uuid> | list | reload` for server admins.

use bevy::prelude::*;
use config_store::ConfigStore;
use uuid::Uuid;

use super::events::{AccessCommandEvent, CommandReplyEvent};
use crate::access::AccessRegistry;

pub const ACCESS_USAGE: &str = "Usage: /access add|remove|list <uuid>";
pub const NO_PERMISSION: &str = "You don't have permission to manage access.";
pub const WHITELIST_RELOADED: &str = "Whitelist reloaded.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCommand {
    Add(Uuid),
    Remove(Uuid),
    List,
    Reload,
}

impl AccessCommand {
    /// Parse the words after `/access`. The error is the reply for the sender.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let Some(action) = args.first() else {
            return Err(ACCESS_USAGE.to_string());
        };
        let action = action.to_lowercase();
        match action.as_str() {
            "add" | "remove" => {
                let Some(raw) = args.get(1) else {
                    return Err(format!("Usage: /access {action} <uuid>"));
                };
                let id = Uuid::parse_str(raw).map_err(|_| format!("Invalid UUID format: {raw}"))?;
                Ok(if action == "add" {
                    AccessCommand::Add(id)
                } else {
                    AccessCommand::Remove(id)
                })
            }
            "list" => Ok(AccessCommand::List),
            "reload" => Ok(AccessCommand::Reload),
            _ => Err(format!("Unknown action: {action}")),
        }
    }
}

/// Apply `command` and return the reply lines.
pub fn run_access_command(
    command: AccessCommand,
    registry: &mut AccessRegistry,
    store: &mut ConfigStore,
) -> Vec<String> {
    match command {
        AccessCommand::Add(id) => {
            if registry.add(store, id) {
                info!("Added {} to whitelist", id);
                vec![format!("Added to whitelist: {id}")]
            } else {
                vec![format!("UUID already present: {id}")]
            }
        }
        AccessCommand::Remove(id) => {
            if registry.remove(store, &id) {
                info!("Removed {} from whitelist", id);
                vec![format!("Removed from whitelist: {id}")]
            } else {
                vec![format!("UUID not found: {id}")]
            }
        }
        AccessCommand::List => {
            let list = registry.list();
            let mut lines = Vec::with_capacity(list.len() + 1);
            lines.push(format!("Whitelist entries: {}", list.len()));
            lines.extend(list.iter().map(|id| format!(" - {id}")));
            lines
        }
        AccessCommand::Reload => {
            // Pick up edits made to the backing file while the server runs.
            if let Err(e) = store.reload() {
                warn!("Failed to re-read {}: {}", store.describe(), e);
                return vec![format!("Failed to reload whitelist: {e}")];
            }
            registry.load(store);
            vec![WHITELIST_RELOADED.to_string()]
        }
    }
}

pub fn handle_access_commands(
    mut events: EventReader<AccessCommandEvent>,
    mut replies: EventWriter<CommandReplyEvent>,
    mut registry: ResMut<AccessRegistry>,
    mut store: ResMut<ConfigStore>,
) {
    for event in events.read() {
        let lines = if !event.is_admin {
            vec![NO_PERMISSION.to_string()]
        } else {
            match AccessCommand::parse(&event.args) {
                Ok(command) => run_access_command(command, &mut registry, &mut store),
                Err(reply) => vec![reply],
            }
        };

        for message in lines {
            replies.send(CommandReplyEvent {
                recipient: event.sender,
                message,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_store::{json, MemoryBackend, StoreBackend};

    const A: &str = "6f1c1d2e-1b7a-4c8e-9d43-0a5f3b2c1d00";

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_actions() {
        let id = Uuid::parse_str(A).unwrap();
        assert_eq!(AccessCommand::parse(&args(&["add", A])), Ok(AccessCommand::Add(id)));
        assert_eq!(
            AccessCommand::parse(&args(&["REMOVE", A])),
            Ok(AccessCommand::Remove(id))
        );
        assert_eq!(AccessCommand::parse(&args(&["list"])), Ok(AccessCommand::List));
        assert_eq!(AccessCommand::parse(&args(&["reload"])), Ok(AccessCommand::Reload));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(AccessCommand::parse(&[]), Err(ACCESS_USAGE.to_string()));
        assert_eq!(
            AccessCommand::parse(&args(&["add"])),
            Err("Usage: /access add <uuid>".to_string())
        );
        assert_eq!(
            AccessCommand::parse(&args(&["remove"])),
            Err("Usage: /access remove <uuid>".to_string())
        );
        assert_eq!(
            AccessCommand::parse(&args(&["add", "bob"])),
            Err("Invalid UUID format: bob".to_string())
        );
        assert_eq!(
            AccessCommand::parse(&args(&["ban", A])),
            Err("Unknown action: ban".to_string())
        );
    }

    #[test]
    fn test_add_then_list_replies() {
        let mut store = ConfigStore::in_memory();
        let mut registry = AccessRegistry::default();
        let id = Uuid::parse_str(A).unwrap();

        assert_eq!(
            run_access_command(AccessCommand::Add(id), &mut registry, &mut store),
            vec![format!("Added to whitelist: {A}")]
        );
        assert_eq!(
            run_access_command(AccessCommand::Add(id), &mut registry, &mut store),
            vec![format!("UUID already present: {A}")]
        );
        assert_eq!(
            run_access_command(AccessCommand::List, &mut registry, &mut store),
            vec!["Whitelist entries: 1".to_string(), format!(" - {A}")]
        );
    }

    #[test]
    fn test_remove_unknown_reply() {
        let mut store = ConfigStore::in_memory();
        let mut registry = AccessRegistry::default();
        let id = Uuid::parse_str(A).unwrap();
        assert_eq!(
            run_access_command(AccessCommand::Remove(id), &mut registry, &mut store),
            vec![format!("UUID not found: {A}")]
        );
    }

    #[test]
    fn test_reload_reads_backend_edits() {
        let backend = MemoryBackend::with_document(
            json!({"whitelist": {"enabled": true, "players": []}}).to_string(),
        );
        let mut store = ConfigStore::open(backend.clone()).unwrap();
        let mut registry = AccessRegistry::default();
        registry.load(&store);
        assert!(registry.is_empty());

        // Edited behind the server's back.
        backend
            .write(&json!({"whitelist": {"enabled": true, "players": [A]}}).to_string())
            .unwrap();

        assert_eq!(
            run_access_command(AccessCommand::Reload, &mut registry, &mut store),
            vec![WHITELIST_RELOADED.to_string()]
        );
        assert_eq!(registry.len(), 1);
    }
}
