// ABOUTME: Desired configuration of a single zone.
// ABOUTME: Mirrors the zonecfg/zoneadm knobs zonectl is able to converge.

use super::EnvValue;
use crate::types::{DesiredState, ZoneName};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneSpec {
    pub name: ZoneName,

    #[serde(default)]
    pub state: DesiredState,

    /// Zone path; required whenever the zone has to be configured.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Create a sparse-root zone instead of a whole-root one.
    #[serde(default)]
    pub sparse: bool,

    /// Extra zonecfg commands appended after `set zonepath`.
    #[serde(default)]
    pub config: String,

    #[serde(default)]
    pub create_options: String,

    #[serde(default)]
    pub install_options: String,

    #[serde(default)]
    pub attach_options: String,

    /// Pre-hashed root password written to the zone's shadow file.
    #[serde(default)]
    pub root_password: Option<EnvValue>,

    /// Overrides the manifest-wide boot timeout.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl ZoneSpec {
    pub fn new(name: ZoneName, state: DesiredState) -> Self {
        ZoneSpec {
            name,
            state,
            path: None,
            sparse: false,
            config: String::new(),
            create_options: String::new(),
            install_options: String::new(),
            attach_options: String::new(),
            root_password: None,
            timeout: None,
        }
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    pub fn config(mut self, config: impl Into<String>) -> Self {
        self.config = config.into();
        self
    }

    pub fn root_password(mut self, value: EnvValue) -> Self {
        self.root_password = Some(value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
