// ABOUTME: Fixed transition table from (current state, desired state) to actions.
// ABOUTME: Pure function; nothing here touches the system.

use super::ConvergeError;
use crate::types::{DesiredState, ZoneName, ZoneState};
use serde::Serialize;
use std::fmt;

/// One administrative step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Configure,
    Install,
    Boot,
    Halt,
    Uninstall,
    Delete,
    Detach,
    Attach,
}

impl Action {
    /// Message recorded once the action has completed.
    pub fn done_message(&self) -> &'static str {
        match self {
            Action::Configure => "zone configured",
            Action::Install => "zone installed",
            Action::Boot => "zone booted",
            Action::Halt => "zone stopped",
            Action::Uninstall => "zone uninstalled",
            Action::Delete => "zone deleted",
            Action::Detach => "zone detached",
            Action::Attach => "zone attached",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Configure => "configure",
            Action::Install => "install",
            Action::Boot => "boot",
            Action::Halt => "halt",
            Action::Uninstall => "uninstall",
            Action::Delete => "delete",
            Action::Detach => "detach",
            Action::Attach => "attach",
        };
        f.write_str(s)
    }
}

/// Ordered actions to run, or a note explaining why nothing is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub actions: Vec<Action>,
    pub note: Option<&'static str>,
}

impl Plan {
    fn run(actions: Vec<Action>) -> Self {
        Plan {
            actions,
            note: None,
        }
    }

    fn noop(note: &'static str) -> Self {
        Plan {
            actions: Vec::new(),
            note: Some(note),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Decide what to do to move `zone` from `current` to `desired`.
///
/// `current` is `None` when zoneadm does not know the zone.
pub fn plan(
    zone: &ZoneName,
    current: Option<ZoneState>,
    desired: DesiredState,
) -> Result<Plan, ConvergeError> {
    use Action::*;

    let unexpected = |state: ZoneState| ConvergeError::UnexpectedState {
        zone: zone.clone(),
        state,
        desired,
    };
    let not_found = || ConvergeError::ZoneNotFound(zone.clone());

    let plan = match (desired, current) {
        (DesiredState::Present, None) => Plan::run(vec![Configure, Install]),
        (DesiredState::Present, Some(ZoneState::Configured)) => Plan::run(vec![Install]),
        (DesiredState::Present, Some(s @ (ZoneState::Incomplete | ZoneState::Unavailable))) => {
            return Err(unexpected(s));
        }
        (DesiredState::Present, Some(_)) => Plan::noop("zone already exists"),

        (DesiredState::Running, None) => Plan::run(vec![Configure, Install, Boot]),
        (DesiredState::Running, Some(ZoneState::Configured)) => Plan::run(vec![Install, Boot]),
        (DesiredState::Running, Some(ZoneState::Running)) => Plan::noop("zone already running"),
        (DesiredState::Running, Some(s @ (ZoneState::Incomplete | ZoneState::Unavailable))) => {
            return Err(unexpected(s));
        }
        // zoneadm will not boot a zone still on its way down; settle it first.
        (DesiredState::Running, Some(ZoneState::ShuttingDown | ZoneState::Down)) => {
            Plan::run(vec![Halt, Boot])
        }
        (DesiredState::Running, Some(_)) => Plan::run(vec![Boot]),

        (DesiredState::Stopped, None) => return Err(not_found()),
        (DesiredState::Stopped, Some(s)) if s.needs_halt() => Plan::run(vec![Halt]),
        (DesiredState::Stopped, Some(_)) => Plan::noop("zone already stopped"),

        (DesiredState::Absent, None) => Plan::noop("zone does not exist"),
        (DesiredState::Absent, Some(s)) => {
            let mut actions = Vec::new();
            if s.needs_halt() {
                actions.push(Halt);
            }
            if s.has_install() {
                actions.push(Uninstall);
            }
            actions.push(Delete);
            Plan::run(actions)
        }

        (DesiredState::Configured, None) => Plan::run(vec![Configure]),
        (DesiredState::Configured, Some(_)) => Plan::noop("zone already exists"),

        (DesiredState::Detached, None) => return Err(not_found()),
        (DesiredState::Detached, Some(ZoneState::Configured)) => {
            Plan::noop("zone already detached")
        }
        (DesiredState::Detached, Some(s)) => {
            let mut actions = Vec::new();
            if s.needs_halt() {
                actions.push(Halt);
            }
            actions.push(Detach);
            Plan::run(actions)
        }

        (DesiredState::Attached, None) => return Err(not_found()),
        (DesiredState::Attached, Some(ZoneState::Configured)) => Plan::run(vec![Attach]),
        (DesiredState::Attached, Some(_)) => Plan::noop("zone already attached"),
    };

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Action::*;

    fn zone() -> ZoneName {
        ZoneName::new("web").unwrap()
    }

    fn actions(current: Option<ZoneState>, desired: DesiredState) -> Vec<Action> {
        plan(&zone(), current, desired).unwrap().actions
    }

    #[test]
    fn running_from_nothing_configures_installs_and_boots() {
        assert_eq!(
            actions(None, DesiredState::Running),
            vec![Configure, Install, Boot]
        );
    }

    #[test]
    fn running_zone_is_left_alone() {
        let p = plan(&zone(), Some(ZoneState::Running), DesiredState::Running).unwrap();
        assert!(p.is_noop());
        assert_eq!(p.note, Some("zone already running"));
    }

    #[test]
    fn configured_zone_is_installed_for_present() {
        assert_eq!(
            actions(Some(ZoneState::Configured), DesiredState::Present),
            vec![Install]
        );
        assert_eq!(
            actions(Some(ZoneState::Configured), DesiredState::Running),
            vec![Install, Boot]
        );
    }

    #[test]
    fn installed_zone_boots() {
        assert_eq!(
            actions(Some(ZoneState::Installed), DesiredState::Running),
            vec![Boot]
        );
    }

    #[test]
    fn every_existing_non_running_zone_boots() {
        for state in [ZoneState::Installed, ZoneState::Ready, ZoneState::Mounted] {
            assert_eq!(actions(Some(state), DesiredState::Running), vec![Boot], "{state}");
        }
    }

    #[test]
    fn zone_going_down_is_halted_before_boot() {
        for state in [ZoneState::ShuttingDown, ZoneState::Down] {
            assert_eq!(
                actions(Some(state), DesiredState::Running),
                vec![Halt, Boot],
                "{state}"
            );
        }
    }

    #[test]
    fn broken_zone_cannot_be_made_running() {
        for state in [ZoneState::Incomplete, ZoneState::Unavailable] {
            assert!(matches!(
                plan(&zone(), Some(state), DesiredState::Running),
                Err(ConvergeError::UnexpectedState { .. })
            ));
        }
    }

    #[test]
    fn stopped_only_halts_when_up() {
        assert_eq!(
            actions(Some(ZoneState::Running), DesiredState::Stopped),
            vec![Halt]
        );
        assert!(actions(Some(ZoneState::Installed), DesiredState::Stopped).is_empty());
    }

    #[test]
    fn stopped_requires_existing_zone() {
        assert!(matches!(
            plan(&zone(), None, DesiredState::Stopped),
            Err(ConvergeError::ZoneNotFound(_))
        ));
    }

    #[test]
    fn absent_tears_down_in_order() {
        assert_eq!(
            actions(Some(ZoneState::Running), DesiredState::Absent),
            vec![Halt, Uninstall, Delete]
        );
        assert_eq!(
            actions(Some(ZoneState::Installed), DesiredState::Absent),
            vec![Uninstall, Delete]
        );
        assert_eq!(
            actions(Some(ZoneState::Configured), DesiredState::Absent),
            vec![Delete]
        );
        assert_eq!(
            actions(Some(ZoneState::Incomplete), DesiredState::Absent),
            vec![Uninstall, Delete]
        );
        assert!(actions(None, DesiredState::Absent).is_empty());
    }

    #[test]
    fn incomplete_zone_cannot_be_made_present() {
        assert!(matches!(
            plan(&zone(), Some(ZoneState::Incomplete), DesiredState::Present),
            Err(ConvergeError::UnexpectedState { .. })
        ));
    }

    #[test]
    fn detach_and_attach() {
        assert_eq!(
            actions(Some(ZoneState::Running), DesiredState::Detached),
            vec![Halt, Detach]
        );
        assert!(actions(Some(ZoneState::Configured), DesiredState::Detached).is_empty());
        assert_eq!(
            actions(Some(ZoneState::Configured), DesiredState::Attached),
            vec![Attach]
        );
        assert!(actions(Some(ZoneState::Installed), DesiredState::Attached).is_empty());
        assert!(plan(&zone(), None, DesiredState::Attached).is_err());
    }

    #[test]
    fn configured_never_installs() {
        assert_eq!(actions(None, DesiredState::Configured), vec![Configure]);
        assert!(actions(Some(ZoneState::Running), DesiredState::Configured).is_empty());
    }
}
