//! Flat key-value configuration store shared by the multiplayer registries.
//!
//! The document lives in a JSON file; callers address values with dotted
//! keys (`zones.hub.world`) and persist the whole document explicitly.

mod atomic_write;
mod backend;
mod store;
mod store_error;

pub use backend::{FileBackend, MemoryBackend, StoreBackend};
pub use store::ConfigStore;
pub use store_error::StoreError;

/// Re-exported so callers can build values for [`ConfigStore::set`] without a
/// direct `serde_json` dependency.
pub use serde_json::{json, Value};
