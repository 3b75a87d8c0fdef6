// ABOUTME: Application-wide error types for zonectl.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::admin::AdmError;
use crate::converge::ConvergeError;
use crate::platform::PlatformError;
use crate::types::ZoneNameError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("zone not in manifest: {0}")]
    UnknownZone(String),

    #[error("zone does not exist: {0}")]
    ZoneNotFound(String),

    #[error("invalid zone name: {0}")]
    InvalidZoneName(#[from] ZoneNameError),

    #[error("{zone}: {source}")]
    Converge {
        zone: String,
        #[source]
        source: ConvergeError,
    },

    #[error(transparent)]
    Adm(#[from] AdmError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
