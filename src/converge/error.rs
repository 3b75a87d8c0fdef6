// ABOUTME: Error types for zone convergence.
// ABOUTME: Wraps administration, provisioning and platform failures plus plan refusals.

use crate::admin::AdmError;
use crate::config::MissingEnvVar;
use crate::platform::PlatformError;
use crate::provision::ProvisionError;
use crate::types::{DesiredState, ZoneName, ZoneState};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConvergeError {
    #[error("zone {0} does not exist")]
    ZoneNotFound(ZoneName),

    #[error("zone {0} must be configured but no path was given")]
    MissingPath(ZoneName),

    #[error("zone {zone} is {state} and cannot be made {desired}")]
    UnexpectedState {
        zone: ZoneName,
        state: ZoneState,
        desired: DesiredState,
    },

    #[error("timed out after {timeout:?} waiting for zone {zone} to boot")]
    BootTimeout { zone: ZoneName, timeout: Duration },

    #[error(transparent)]
    Adm(#[from] AdmError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVar),
}
