// ABOUTME: Zone administration error types with SNAFU pattern.
// ABOUTME: Carries the failing operation and zone name for every zoneadm/zonecfg failure.

use crate::runner::CommandError;
use crate::types::ZoneStateError;
use snafu::Snafu;
use std::fmt;

/// The administrative operation that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Configure,
    Install,
    Uninstall,
    Boot,
    Halt,
    Delete,
    Detach,
    Attach,
    ConsoleCheck,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::List => "list",
            Operation::Configure => "configure",
            Operation::Install => "install",
            Operation::Uninstall => "uninstall",
            Operation::Boot => "boot",
            Operation::Halt => "halt",
            Operation::Delete => "delete",
            Operation::Detach => "detach",
            Operation::Attach => "attach",
            Operation::ConsoleCheck => "check console of",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AdmError {
    #[snafu(display("could not run {op} for zone '{zone}': {source}"))]
    Exec {
        op: Operation,
        zone: String,
        source: CommandError,
    },

    #[snafu(display("failed to {op} zone '{zone}': {output}"))]
    Failed {
        op: Operation,
        zone: String,
        output: String,
    },

    #[snafu(display("failed to write zonecfg script for zone '{zone}': {source}"))]
    Script {
        zone: String,
        source: std::io::Error,
    },

    #[snafu(display("unexpected zoneadm output for zone '{zone}': {source}"))]
    Parse {
        zone: String,
        source: ZoneStateError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmErrorKind {
    /// The tool could not be started or timed out.
    Execution,
    /// The tool ran and reported failure.
    CommandFailed,
    /// The zonecfg command file could not be written.
    Script,
    /// The tool's output could not be understood.
    Parse,
}

impl AdmError {
    pub fn kind(&self) -> AdmErrorKind {
        match self {
            AdmError::Exec { .. } => AdmErrorKind::Execution,
            AdmError::Failed { .. } => AdmErrorKind::CommandFailed,
            AdmError::Script { .. } => AdmErrorKind::Script,
            AdmError::Parse { .. } => AdmErrorKind::Parse,
        }
    }

    /// The operation that failed, when one was attempted.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            AdmError::Exec { op, .. } | AdmError::Failed { op, .. } => Some(*op),
            AdmError::Script { .. } => Some(Operation::Configure),
            AdmError::Parse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_includes_tool_output() {
        let err = AdmError::Failed {
            op: Operation::Install,
            zone: "web".to_string(),
            output: "zoneadm: zone web: must be configured".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to install zone 'web': zoneadm: zone web: must be configured"
        );
        assert_eq!(err.kind(), AdmErrorKind::CommandFailed);
        assert_eq!(err.operation(), Some(Operation::Install));
    }
}
