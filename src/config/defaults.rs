// ABOUTME: Run-wide timing defaults applied to every zone in the manifest.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Defaults {
    /// How long to wait for a booted zone's console login to appear.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Delay between console checks while waiting for boot.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Kill any single zoneadm/zonecfg invocation running longer than this.
    #[serde(default, with = "humantime_serde")]
    pub command_timeout: Option<Duration>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(600)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(10)
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
            command_timeout: None,
        }
    }
}
