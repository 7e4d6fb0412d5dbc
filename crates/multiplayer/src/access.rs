//! Player whitelist backed by the `whitelist` section of the config store.
//!
//! `whitelist.enabled` is read from the store on every check, never cached:
//! turning it off opens the server immediately. The identity set itself is
//! cached and written back in full after every change.

use std::collections::{BTreeSet, HashSet};

use bevy::prelude::*;
use config_store::{ConfigStore, StoreError};
use uuid::Uuid;

pub const WHITELIST_ENABLED: &str = "whitelist.enabled";
pub const WHITELIST_PLAYERS: &str = "whitelist.players";

/// Whether the store currently enables the whitelist (default: off).
pub fn whitelist_enabled(store: &ConfigStore) -> bool {
    store.get_bool(WHITELIST_ENABLED, false)
}

/// Summary of one [`AccessRegistry::load`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessLoadReport {
    /// `false` when the whitelist was disabled and nothing was read.
    pub enabled: bool,
    pub loaded: usize,
    /// Raw entries that did not parse as a UUID.
    pub rejected: Vec<String>,
}

#[derive(Resource, Debug, Default)]
pub struct AccessRegistry {
    players: HashSet<Uuid>,
    /// Set once the in-memory set has been read from or written to the store.
    /// Until then it says nothing about the persisted list.
    synced: bool,
}

impl AccessRegistry {
    /// Replace the cached set with the store's `whitelist.players`.
    ///
    /// Does nothing while the whitelist is disabled; a set loaded earlier is
    /// kept as-is until the next load with the whitelist enabled.
    pub fn load(&mut self, store: &ConfigStore) -> AccessLoadReport {
        if !whitelist_enabled(store) {
            debug!("Whitelist disabled; keeping {} cached entries", self.players.len());
            return AccessLoadReport::default();
        }

        let rejected = self.read_players(store);
        info!("Loaded whitelist: {} entries", self.players.len());
        AccessLoadReport {
            enabled: true,
            loaded: self.players.len(),
            rejected,
        }
    }

    /// Write the full set to `whitelist.players` and persist the store.
    /// Entries are written sorted so the file diffs cleanly.
    pub fn save(&self, store: &mut ConfigStore) -> Result<(), StoreError> {
        let entries: Vec<String> = self.list().iter().map(Uuid::to_string).collect();
        store.set(WHITELIST_PLAYERS, entries);
        store.save()
    }

    /// Open access while the whitelist is disabled, membership otherwise.
    pub fn is_allowed(&self, store: &ConfigStore, id: &Uuid) -> bool {
        !whitelist_enabled(store) || self.players.contains(id)
    }

    /// Returns `false` (and writes nothing) if `id` was already listed.
    pub fn add(&mut self, store: &mut ConfigStore, id: Uuid) -> bool {
        self.sync_before_change(store);
        if !self.players.insert(id) {
            return false;
        }
        self.persist(store);
        true
    }

    /// Returns `false` (and writes nothing) if `id` was not listed.
    pub fn remove(&mut self, store: &mut ConfigStore, id: &Uuid) -> bool {
        self.sync_before_change(store);
        if !self.players.remove(id) {
            return false;
        }
        self.persist(store);
        true
    }

    /// Snapshot of the current set, in UUID order.
    pub fn list(&self) -> BTreeSet<Uuid> {
        self.players.iter().copied().collect()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.players.contains(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Final write at shutdown. Skipped when the set was never synchronized
    /// with the store, so a disabled whitelist cannot blank the persisted list.
    /// Returns whether a write was attempted.
    pub fn persist_on_shutdown(&self, store: &mut ConfigStore) -> bool {
        if !self.synced {
            debug!("Whitelist never loaded; leaving persisted list untouched");
            return false;
        }
        if let Err(e) = self.save(store) {
            warn!("Failed to persist whitelist at shutdown: {}", e);
        }
        true
    }

    /// Replace the cached set with the parsed `whitelist.players` entries and
    /// mark it synced. Returns the entries that did not parse.
    fn read_players(&mut self, store: &ConfigStore) -> Vec<String> {
        self.players.clear();
        let mut rejected = Vec::new();
        for raw in store.get_string_list(WHITELIST_PLAYERS) {
            match Uuid::parse_str(raw.trim()) {
                Ok(id) => {
                    self.players.insert(id);
                }
                Err(e) => {
                    warn!("Invalid UUID in whitelist: {} ({})", raw, e);
                    rejected.push(raw);
                }
            }
        }
        self.synced = true;
        rejected
    }

    /// Pull in the persisted list before the first change to a set that was
    /// never read, whatever the enabled flag says.
    fn sync_before_change(&mut self, store: &ConfigStore) {
        if !self.synced {
            debug!("Reading persisted whitelist before first change");
            self.read_players(store);
        }
    }

    fn persist(&mut self, store: &mut ConfigStore) {
        self.synced = true;
        if let Err(e) = self.save(store) {
            warn!("Failed to persist whitelist to {}: {}", store.describe(), e);
        }
    }
}
