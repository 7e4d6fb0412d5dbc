//! Per-entry results of a zone load.
//!
//! Every child of the `zones` section yields exactly one [`EntryOutcome`];
//! a bad entry is recorded and skipped rather than aborting the load.

use std::fmt;

/// Why a zone entry was left out of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is a plain value instead of a section.
    NotASection,
    /// `world` is absent or blank.
    MissingWorld,
    /// `world` names a world the host has not loaded.
    UnknownWorld(String),
    /// One of `x`, `y`, `z` is missing, non-numeric or non-finite.
    InvalidCoordinates,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotASection => write!(f, "is not a section"),
            SkipReason::MissingWorld => write!(f, "missing 'world' value"),
            SkipReason::UnknownWorld(world) => write!(f, "references unknown world '{world}'"),
            SkipReason::InvalidCoordinates => write!(f, "has invalid coordinates"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Loaded,
    /// Loaded after moving `y` back inside the world's height range.
    Repaired { original_y: f64, clamped_y: f64 },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneEntryReport {
    /// Key as written under `zones`.
    pub key: String,
    pub outcome: EntryOutcome,
}

/// Summary of one `load_from_config` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneLoadReport {
    /// Outcomes of the final pass over the `zones` section.
    pub entries: Vec<ZoneEntryReport>,
    /// The store had no `zones` section and the default hub was written.
    pub created_default_section: bool,
    /// The first pass loaded nothing, so the hub was re-seeded and the section
    /// was read a second time.
    pub reseeded_hub: bool,
    /// Writing the seeded defaults back to the store failed.
    pub persist_failed: bool,
}

impl ZoneLoadReport {
    pub fn loaded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !matches!(e.outcome, EntryOutcome::Skipped(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.entries.len() - self.loaded_count()
    }

    /// Outcome recorded for `key` (exact key as written in the store).
    pub fn outcome(&self, key: &str) -> Option<&EntryOutcome> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.outcome)
    }
}
