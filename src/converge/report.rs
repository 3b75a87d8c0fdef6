// ABOUTME: Outcome of converging one zone.
// ABOUTME: Records whether anything changed and the human-readable steps taken.

use crate::diagnostics::Warning;
use crate::types::{DesiredState, ZoneName};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub zone: ZoneName,
    pub desired: DesiredState,
    pub changed: bool,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn new(zone: ZoneName, desired: DesiredState) -> Self {
        Report {
            zone,
            desired,
            changed: false,
            messages: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn note(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(crate) fn changed(&mut self, message: impl Into<String>) {
        self.changed = true;
        self.messages.push(message.into());
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_messages() {
        let mut report = Report::new(ZoneName::new("web").unwrap(), DesiredState::Running);
        report.note("creating whole-root zone");
        report.changed("zone configured");
        report.changed("zone installed");
        assert!(report.changed);
        assert_eq!(
            report.to_string(),
            "creating whole-root zone, zone configured, zone installed"
        );
    }

    #[test]
    fn notes_alone_do_not_mark_changed() {
        let mut report = Report::new(ZoneName::new("web").unwrap(), DesiredState::Present);
        report.note("zone already exists");
        assert!(!report.changed);
    }
}
