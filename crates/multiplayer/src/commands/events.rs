use bevy::prelude::*;

/// Who issued a command and where the reply goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSender {
    Console,
    Player(Entity),
}

/// `/zone <args..>` as typed by a player.
#[derive(Event, Debug, Clone)]
pub struct ZoneCommandEvent {
    pub sender: CommandSender,
    pub args: Vec<String>,
}

impl ZoneCommandEvent {
    pub fn new(sender: CommandSender, args: &[&str]) -> Self {
        Self {
            sender,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// `/access <args..>`. The host decides `is_admin` from its own permission
/// model; non-admins only get a refusal.
#[derive(Event, Debug, Clone)]
pub struct AccessCommandEvent {
    pub sender: CommandSender,
    pub is_admin: bool,
    pub args: Vec<String>,
}

impl AccessCommandEvent {
    pub fn new(sender: CommandSender, is_admin: bool, args: &[&str]) -> Self {
        Self {
            sender,
            is_admin,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One line of feedback for a command sender.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CommandReplyEvent {
    pub recipient: CommandSender,
    pub message: String,
}
