//! Chat commands, delivered as events by the host and answered with
//! [`CommandReplyEvent`]s.

mod access_command;
mod events;
mod zone_command;

pub use access_command::{
    handle_access_commands, run_access_command, AccessCommand, ACCESS_USAGE, NO_PERMISSION,
    WHITELIST_RELOADED,
};
pub use events::{AccessCommandEvent, CommandReplyEvent, CommandSender, ZoneCommandEvent};
pub use zone_command::{
    handle_zone_commands, leave_zone, zone_list_message, ZoneCommand, LEFT_ZONE, NO_ZONES,
    PLAYERS_ONLY, ZONE_JOIN_USAGE, ZONE_USAGE,
};
