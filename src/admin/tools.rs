// ABOUTME: Locations of the administrative binaries zonectl drives.
// ABOUTME: Defaults match a stock Solaris/illumos global zone.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub zoneadm: String,
    pub zonecfg: String,
    pub ssh_keygen: String,
    pub ps: String,
    pub uname: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            zoneadm: "/usr/sbin/zoneadm".to_string(),
            zonecfg: "/usr/sbin/zonecfg".to_string(),
            ssh_keygen: "/usr/bin/ssh-keygen".to_string(),
            ps: "/usr/bin/ps".to_string(),
            uname: "/usr/bin/uname".to_string(),
        }
    }
}
