// ABOUTME: Manifest scaffolding for new hosts.
// ABOUTME: Creates a commented zonectl.yml template.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ZoneName;

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, zone: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let zone = ZoneName::new(zone.unwrap_or("web01"))?;
    std::fs::write(&config_path, generate_template_yaml(&zone))?;

    Ok(())
}

fn generate_template_yaml(zone: &ZoneName) -> String {
    format!(
        r#"# Uncomment to override tool locations
# tools:
#   zoneadm: /usr/sbin/zoneadm
#   zonecfg: /usr/sbin/zonecfg

defaults:
  timeout: 10m
  poll_interval: 10s

zones:
  - name: {zone}
    state: running
    path: /zones/{zone}
    sparse: false
    config: |
      set autoboot=true
    # install_options: "-c /path/to/profile.xml"
    # root_password:
    #   env: ZONE_ROOT_HASH
"#
    )
}
