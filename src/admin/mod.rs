// ABOUTME: Thin wrappers over the zoneadm, zonecfg and ps administrative tools.
// ABOUTME: Each ZoneAdm method maps to exactly one external command.

mod error;
mod tools;
mod zoneadm;
mod zonecfg;

pub use error::{AdmError, AdmErrorKind, Operation};
pub use tools::ToolPaths;
pub use zoneadm::{ZoneAdm, split_options};
pub use zonecfg::ZonecfgScript;
