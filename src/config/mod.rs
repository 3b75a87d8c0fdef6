// ABOUTME: Configuration types and parsing for zonectl.yml.
// ABOUTME: Handles manifest discovery, YAML parsing and zone selection.

mod defaults;
mod deserialize;
mod env_value;
mod init;
mod zone;

pub use defaults::Defaults;
pub use env_value::{EnvValue, MissingEnvVar};
pub use init::init_config;
pub use zone::ZoneSpec;

use crate::admin::ToolPaths;
use crate::error::{Error, Result};
use crate::types::ZoneName;
use deserialize::deserialize_zones;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "zonectl.yml";
pub const CONFIG_FILENAME_ALT: &str = "zonectl.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".zonectl/config.yml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolPaths,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(deserialize_with = "deserialize_zones")]
    pub zones: NonEmpty<ZoneSpec>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("using manifest {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn zone(&self, name: &ZoneName) -> Result<&ZoneSpec> {
        self.zones
            .iter()
            .find(|z| &z.name == name)
            .ok_or_else(|| Error::UnknownZone(name.to_string()))
    }

    /// Zones to act on: all of them, or only those named, in manifest order.
    pub fn select(&self, names: &[ZoneName]) -> Result<Vec<&ZoneSpec>> {
        if names.is_empty() {
            return Ok(self.zones.iter().collect());
        }

        for name in names {
            self.zone(name)?;
        }

        Ok(self
            .zones
            .iter()
            .filter(|z| names.contains(&z.name))
            .collect())
    }
}
