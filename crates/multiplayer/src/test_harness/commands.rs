//! Command and join helpers for `TestServer`.

use bevy::prelude::*;

use crate::commands::{AccessCommandEvent, CommandSender, ZoneCommandEvent};
use crate::join_gate::PlayerJoinedEvent;
use crate::lifecycle::ReloadZonesEvent;

use super::TestServer;

impl TestServer {
    /// Run `/zone <args>` as `sender` and return the replies it produced.
    pub fn zone_command(&mut self, sender: CommandSender, args: &[&str]) -> Vec<String> {
        let start = self.outbound().replies.len();
        self.send(ZoneCommandEvent::new(sender, args));
        self.replies_since(start, sender)
    }

    /// Run `/access <args>` as `sender` and return the replies it produced.
    pub fn access_command(
        &mut self,
        sender: CommandSender,
        is_admin: bool,
        args: &[&str],
    ) -> Vec<String> {
        let start = self.outbound().replies.len();
        self.send(AccessCommandEvent::new(sender, is_admin, args));
        self.replies_since(start, sender)
    }

    /// Announce `player` as joined; returns the kick reason if it was refused.
    pub fn join(&mut self, player: Entity) -> Option<String> {
        let start = self.outbound().kicks.len();
        self.send(PlayerJoinedEvent { player });
        self.outbound().kicks[start..]
            .iter()
            .find(|k| k.player == player)
            .map(|k| k.reason.clone())
    }

    pub fn reload_zones(&mut self) {
        self.send(ReloadZonesEvent);
    }

    fn replies_since(&self, start: usize, recipient: CommandSender) -> Vec<String> {
        self.outbound().replies[start..]
            .iter()
            .filter(|r| r.recipient == recipient)
            .map(|r| r.message.clone())
            .collect()
    }
}
