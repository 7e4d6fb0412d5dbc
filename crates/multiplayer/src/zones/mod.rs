//! Named teleport destinations.

mod load_report;
mod registry;
mod teleport_result;
mod zone;

pub use load_report::{EntryOutcome, SkipReason, ZoneEntryReport, ZoneLoadReport};
pub use registry::{
    hub_location, ZoneRegistry, DEFAULT_HUB_ID, DEFAULT_HUB_POSITION, DEFAULT_HUB_WORLD,
    ZONES_SECTION,
};
pub use teleport_result::TeleportResult;
pub use zone::{clamp_height, Zone};
