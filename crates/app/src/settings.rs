//! Server settings read from the environment.
//!
//! - `ZONEGATE_CONFIG`: path of the JSON store (default `config/zonegate.json`)
//! - `ZONEGATE_WORLDS`: loaded worlds as `name:maxHeight[,name:maxHeight..]`
//!   (default `world:320`)

use std::path::PathBuf;

use bevy::prelude::*;
use multiplayer::host::LoadedWorlds;

pub const CONFIG_ENV: &str = "ZONEGATE_CONFIG";
pub const WORLDS_ENV: &str = "ZONEGATE_WORLDS";

const DEFAULT_CONFIG_PATH: &str = "config/zonegate.json";
const DEFAULT_WORLDS: &str = "world:320";

/// Written to the store path on first run.
pub const DEFAULT_DOCUMENT: &str = include_str!("../config/zonegate.default.json");

pub struct ServerSettings {
    pub config_path: PathBuf,
    pub worlds: LoadedWorlds,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let config_path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let worlds = std::env::var(WORLDS_ENV).unwrap_or_else(|_| DEFAULT_WORLDS.to_string());
        Self {
            config_path,
            worlds: parse_worlds(&worlds),
        }
    }
}

/// Parse `name:maxHeight` pairs. Malformed entries are skipped with a warning.
pub fn parse_worlds(list: &str) -> LoadedWorlds {
    let mut worlds = LoadedWorlds::default();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let parsed = entry
            .split_once(':')
            .and_then(|(name, height)| Some((name.trim(), height.trim().parse::<i32>().ok()?)))
            .filter(|(name, height)| !name.is_empty() && *height > 0);
        match parsed {
            Some((name, height)) => worlds.load(name, height),
            None => warn!("Ignoring malformed world entry '{}' (expected name:maxHeight)", entry),
        }
    }
    worlds
}
