// ABOUTME: Observed zone states reported by zoneadm and desired states requested by users.
// ABOUTME: Also parses the machine-readable `zoneadm list -p` line format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A zone state as printed by `zoneadm list -p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneState {
    Configured,
    Incomplete,
    Installed,
    Ready,
    Running,
    ShuttingDown,
    Down,
    Mounted,
    Unavailable,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneStateError {
    #[error("unknown zone state: {0}")]
    Unknown(String),

    #[error("malformed zoneadm list line: {0}")]
    Malformed(String),

    #[error("invalid zone id in zoneadm list line: {0}")]
    InvalidId(String),
}

impl ZoneState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneState::Configured => "configured",
            ZoneState::Incomplete => "incomplete",
            ZoneState::Installed => "installed",
            ZoneState::Ready => "ready",
            ZoneState::Running => "running",
            ZoneState::ShuttingDown => "shutting_down",
            ZoneState::Down => "down",
            ZoneState::Mounted => "mounted",
            ZoneState::Unavailable => "unavailable",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ZoneState::Running)
    }

    /// States from which `zoneadm halt` is meaningful.
    pub fn needs_halt(&self) -> bool {
        matches!(
            self,
            ZoneState::Running | ZoneState::Ready | ZoneState::ShuttingDown | ZoneState::Down
        )
    }

    /// Whether an installed image exists that `zoneadm uninstall` must remove.
    pub fn has_install(&self) -> bool {
        !matches!(self, ZoneState::Configured)
    }
}

impl FromStr for ZoneState {
    type Err = ZoneStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "configured" => Ok(ZoneState::Configured),
            "incomplete" => Ok(ZoneState::Incomplete),
            "installed" => Ok(ZoneState::Installed),
            "ready" => Ok(ZoneState::Ready),
            "running" => Ok(ZoneState::Running),
            "shutting_down" => Ok(ZoneState::ShuttingDown),
            "down" => Ok(ZoneState::Down),
            "mounted" => Ok(ZoneState::Mounted),
            "unavailable" => Ok(ZoneState::Unavailable),
            other => Err(ZoneStateError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for ZoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The state a user asks a zone to converge to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Configured and installed, whether or not it is booted.
    #[default]
    #[serde(alias = "installed")]
    #[value(alias = "installed")]
    Present,
    /// Installed and booted.
    #[serde(alias = "started")]
    #[value(alias = "started")]
    Running,
    /// Installed but halted.
    Stopped,
    /// Halted, uninstalled and deleted.
    Absent,
    /// Configured only; never installs.
    Configured,
    /// Detached from this host.
    Detached,
    /// Re-attached after a detach.
    Attached,
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DesiredState::Present => "present",
            DesiredState::Running => "running",
            DesiredState::Stopped => "stopped",
            DesiredState::Absent => "absent",
            DesiredState::Configured => "configured",
            DesiredState::Detached => "detached",
            DesiredState::Attached => "attached",
        };
        f.write_str(s)
    }
}

/// One line of `zoneadm list -p` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneListEntry {
    /// Numeric zone id; `None` when the zone is not running (`-`).
    pub id: Option<u32>,
    pub name: String,
    pub state: ZoneState,
    pub path: String,
    pub uuid: Option<String>,
    pub brand: Option<String>,
    pub ip_type: Option<String>,
}

impl ZoneListEntry {
    /// Parse `id:name:state:path:uuid:brand:ip-type[:...]`.
    ///
    /// zoneadm escapes literal colons inside fields as `\:`.
    pub fn parse(line: &str) -> Result<Self, ZoneStateError> {
        let fields = split_escaped(line.trim_end_matches(['\n', '\r']));
        if fields.len() < 4 {
            return Err(ZoneStateError::Malformed(line.to_string()));
        }

        let id = match fields[0].as_str() {
            "-" => None,
            raw => Some(
                raw.parse::<u32>()
                    .map_err(|_| ZoneStateError::InvalidId(raw.to_string()))?,
            ),
        };

        let optional = |idx: usize| {
            fields
                .get(idx)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        Ok(ZoneListEntry {
            id,
            name: fields[1].clone(),
            state: fields[2].parse()?,
            path: fields[3].clone(),
            uuid: optional(4),
            brand: optional(5),
            ip_type: optional(6),
        })
    }
}

fn split_escaped(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => current.push(next),
                None => current.push('\\'),
            },
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
