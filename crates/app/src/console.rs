//! Operator console: a blocking loop that reads commands from stdin and runs
//! one app update per line.
//!
//! ## Commands
//!
//! - `access <add|remove|list|reload> [uuid]`: whitelist management, run with
//!   admin rights
//! - `zones reload`: rebuild the zone registry from the store
//! - `stop`: persist and exit (end of input does the same)

use std::io::BufRead;

use bevy::prelude::*;
use multiplayer::commands::{AccessCommandEvent, CommandReplyEvent, CommandSender};
use multiplayer::join_gate::KickPlayerEvent;
use multiplayer::lifecycle::ReloadZonesEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Access(Vec<String>),
    ReloadZones,
    Stop,
    Blank,
    Unknown(String),
}

impl ConsoleLine {
    pub fn parse(line: &str) -> Self {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => ConsoleLine::Blank,
            ["stop"] => ConsoleLine::Stop,
            ["zones", "reload"] => ConsoleLine::ReloadZones,
            ["access", args @ ..] => {
                ConsoleLine::Access(args.iter().map(|a| a.to_string()).collect())
            }
            _ => ConsoleLine::Unknown(line.trim().to_string()),
        }
    }
}

/// Logs replies addressed to the console and every kick the server issues.
pub fn log_console_output(
    mut replies: EventReader<CommandReplyEvent>,
    mut kicks: EventReader<KickPlayerEvent>,
) {
    for reply in replies.read() {
        if reply.recipient == CommandSender::Console {
            info!("{}", reply.message);
        }
    }
    for kick in kicks.read() {
        info!("Kicked {:?}: {}", kick.player, kick.reason);
    }
}

pub fn run_console(app: &mut App) {
    info!("zonegate console ready: access <add|remove|list|reload>, zones reload, stop");

    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };

        match ConsoleLine::parse(&line) {
            ConsoleLine::Blank => continue,
            ConsoleLine::Stop => break,
            ConsoleLine::ReloadZones => {
                app.world_mut().send_event(ReloadZonesEvent);
            }
            ConsoleLine::Access(args) => {
                app.world_mut().send_event(AccessCommandEvent {
                    sender: CommandSender::Console,
                    is_admin: true,
                    args,
                });
            }
            ConsoleLine::Unknown(text) => {
                warn!("Unknown console command: {text}");
                continue;
            }
        }
        app.update();
    }

    info!("Stopping server");
    app.world_mut().send_event(AppExit::Success);
    app.update();
}
