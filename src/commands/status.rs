// ABOUTME: Status command implementation.
// ABOUTME: Lists zones as reported by zoneadm, optionally a single one.

use super::system_runner;
use zonectl::admin::{ToolPaths, ZoneAdm};
use zonectl::config::Config;
use zonectl::error::{Error, Result};
use zonectl::output::Output;
use zonectl::types::ZoneName;

pub async fn status(config: Option<&Config>, zone: Option<&ZoneName>, output: Output) -> Result<()> {
    let tools = config.map(|c| c.tools.clone()).unwrap_or_else(ToolPaths::default);
    let runner = system_runner(config);
    let adm = ZoneAdm::new(&runner, &tools);

    let zones = match zone {
        Some(name) => {
            let entry = adm
                .entry(name)
                .await?
                .ok_or_else(|| Error::ZoneNotFound(name.to_string()))?;
            vec![entry]
        }
        None => adm.zones().await?,
    };

    output.zones(&zones);
    Ok(())
}
