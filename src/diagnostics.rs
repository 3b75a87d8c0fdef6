// ABOUTME: Non-fatal problems found while provisioning a freshly installed zone.
// ABOUTME: Collected per zone run and attached to its report.

use serde::Serialize;
use std::fmt;

/// Collects warnings for one zone run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = %warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn host_key(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::HostKey,
            message: message.into(),
        }
    }

    pub fn root_password(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::RootPassword,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// An optional SSH host key could not be generated.
    HostKey,
    /// The shadow file had no root entry to update.
    RootPassword,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningKind::HostKey => "host key",
            WarningKind::RootPassword => "root password",
        })
    }
}
