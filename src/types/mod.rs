// ABOUTME: Validated domain types for zone management.
// ABOUTME: Zone names, observed zone states and desired states.

mod zone_name;
mod zone_state;

pub use zone_name::{MAX_ZONE_NAME_LEN, ZoneName, ZoneNameError};
pub use zone_state::{DesiredState, ZoneListEntry, ZoneState, ZoneStateError};
