// ABOUTME: Apply command implementation.
// ABOUTME: Converges every selected manifest zone, stopping at the first failure.

use super::system_runner;
use zonectl::config::Config;
use zonectl::converge::Converger;
use zonectl::error::{Error, Result};
use zonectl::output::Output;
use zonectl::platform::OsRelease;
use zonectl::types::ZoneName;

/// Converge the selected zones (all of them when `names` is empty).
pub async fn apply(config: &Config, names: &[ZoneName], mut output: Output) -> Result<()> {
    let zones = config.select(names)?;

    output.start_timer();
    let runner = system_runner(Some(config));
    let os = OsRelease::detect(&runner, &config.tools).await?;
    let converger = Converger::new(&runner, &config.tools, &config.defaults);

    output.progress(&format!(
        "Converging {} zone(s) on SunOS {}.{}",
        zones.len(),
        os.major,
        os.minor
    ));

    let mut changed = 0;
    for spec in zones {
        output.progress(&format!("  → {} ({})", spec.name, spec.state));
        let report = converger
            .converge_on(&os, spec)
            .await
            .map_err(|source| Error::Converge {
                zone: spec.name.to_string(),
                source,
            })?;
        if report.changed {
            changed += 1;
        }
        output.report(&report);
    }

    output.success(&format!("Done, {} zone(s) changed", changed));
    Ok(())
}
