//! Named teleport zones and a UUID whitelist for a multiplayer server, both
//! backed by a [`config_store::ConfigStore`].
//!
//! The registries are plain types usable without Bevy systems; the
//! [`MultiplayerPlugin`] wires them to startup, chat-command events and join
//! handling.

pub mod access;
pub mod commands;
pub mod host;
pub mod join_gate;
pub mod lifecycle;
mod plugin;
pub mod zones;


#[cfg(test)]
pub mod test_harness;

pub use plugin::MultiplayerPlugin;
