// ABOUTME: ZoneAdm issues zoneadm/zonecfg/ps commands for a single zone.
// ABOUTME: Mutating operations fail with the tool's combined output on non-zero exit.

use super::error::{AdmError, ExecSnafu, FailedSnafu, Operation, ParseSnafu, ScriptSnafu};
use super::tools::ToolPaths;
use crate::runner::{CommandOutput, CommandRunner};
use crate::types::{ZoneListEntry, ZoneName, ZoneState};
use snafu::{ResultExt, ensure};
use std::io::Write;

/// Split a free-form option string (`"-c /tmp/profile.xml"`) into arguments.
pub fn split_options(options: &str) -> Vec<String> {
    options.split_whitespace().map(str::to_string).collect()
}

/// Administrative operations against the zone subsystem.
pub struct ZoneAdm<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    tools: &'a ToolPaths,
}

impl<'a, R: CommandRunner + ?Sized> ZoneAdm<'a, R> {
    pub fn new(runner: &'a R, tools: &'a ToolPaths) -> Self {
        Self { runner, tools }
    }

    /// Current state of the zone, or `None` if it is not configured at all.
    pub async fn state(&self, zone: &ZoneName) -> Result<Option<ZoneState>, AdmError> {
        Ok(self.entry(zone).await?.map(|e| e.state))
    }

    /// The zone's `zoneadm list -p` record, or `None` if it does not exist.
    pub async fn entry(&self, zone: &ZoneName) -> Result<Option<ZoneListEntry>, AdmError> {
        let output = self
            .exec(
                Operation::List,
                zone.as_str(),
                &self.tools.zoneadm,
                args(&["-z", zone.as_str(), "list", "-p"]),
            )
            .await?;

        if !output.success() {
            return Ok(None);
        }

        let line = output.stdout.lines().next().unwrap_or_default();
        let entry = ZoneListEntry::parse(line).context(ParseSnafu {
            zone: zone.as_str(),
        })?;
        Ok(Some(entry))
    }

    /// Every zone on the host, including configured-only ones.
    pub async fn list(&self) -> Result<Vec<ZoneListEntry>, AdmError> {
        let output = self
            .checked(
                Operation::List,
                "<all>",
                &self.tools.zoneadm,
                args(&["list", "-cp"]),
            )
            .await?;

        output
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| ZoneListEntry::parse(line).context(ParseSnafu { zone: "<all>" }))
            .collect()
    }

    /// Zones zonectl can manage: everything but the global zone.
    pub async fn zones(&self) -> Result<Vec<ZoneListEntry>, AdmError> {
        let mut zones = self.list().await?;
        zones.retain(|z| z.name != "global");
        Ok(zones)
    }

    /// Create the zone configuration from a zonecfg command file.
    pub async fn configure(&self, zone: &ZoneName, script: &str) -> Result<(), AdmError> {
        let mut file = tempfile::Builder::new()
            .prefix("zonectl-")
            .suffix(".zonecfg")
            .tempfile()
            .context(ScriptSnafu {
                zone: zone.as_str(),
            })?;
        file.write_all(script.as_bytes())
            .and_then(|_| file.flush())
            .context(ScriptSnafu {
                zone: zone.as_str(),
            })?;

        let path = file.path().to_string_lossy().to_string();
        self.checked(
            Operation::Configure,
            zone.as_str(),
            &self.tools.zonecfg,
            args(&["-z", zone.as_str(), "-f", &path]),
        )
        .await?;
        Ok(())
    }

    pub async fn install(&self, zone: &ZoneName, options: &[String]) -> Result<(), AdmError> {
        let mut argv = args(&["-z", zone.as_str(), "install"]);
        argv.extend_from_slice(options);
        self.checked(Operation::Install, zone.as_str(), &self.tools.zoneadm, argv)
            .await?;
        Ok(())
    }

    pub async fn uninstall(&self, zone: &ZoneName) -> Result<(), AdmError> {
        self.checked(
            Operation::Uninstall,
            zone.as_str(),
            &self.tools.zoneadm,
            args(&["-z", zone.as_str(), "uninstall", "-F"]),
        )
        .await?;
        Ok(())
    }

    pub async fn boot(&self, zone: &ZoneName) -> Result<(), AdmError> {
        self.checked(
            Operation::Boot,
            zone.as_str(),
            &self.tools.zoneadm,
            args(&["-z", zone.as_str(), "boot"]),
        )
        .await?;
        Ok(())
    }

    pub async fn halt(&self, zone: &ZoneName) -> Result<(), AdmError> {
        self.checked(
            Operation::Halt,
            zone.as_str(),
            &self.tools.zoneadm,
            args(&["-z", zone.as_str(), "halt"]),
        )
        .await?;
        Ok(())
    }

    /// Remove the zone configuration.
    pub async fn delete(&self, zone: &ZoneName) -> Result<(), AdmError> {
        self.checked(
            Operation::Delete,
            zone.as_str(),
            &self.tools.zonecfg,
            args(&["-z", zone.as_str(), "delete", "-F"]),
        )
        .await?;
        Ok(())
    }

    pub async fn detach(&self, zone: &ZoneName) -> Result<(), AdmError> {
        self.checked(
            Operation::Detach,
            zone.as_str(),
            &self.tools.zoneadm,
            args(&["-z", zone.as_str(), "detach"]),
        )
        .await?;
        Ok(())
    }

    pub async fn attach(&self, zone: &ZoneName, options: &[String]) -> Result<(), AdmError> {
        let mut argv = args(&["-z", zone.as_str(), "attach"]);
        argv.extend_from_slice(options);
        self.checked(Operation::Attach, zone.as_str(), &self.tools.zoneadm, argv)
            .await?;
        Ok(())
    }

    /// Whether the zone's console login (ttymon on /dev/console) is up.
    ///
    /// `zoneadm boot` returns before SMF has finished bringing the zone up;
    /// the console ttymon is the last thing started on first boot.
    pub async fn console_ready(&self, zone: &ZoneName) -> Result<bool, AdmError> {
        let output = self
            .exec(
                Operation::ConsoleCheck,
                zone.as_str(),
                &self.tools.ps,
                args(&["-z", zone.as_str(), "-o", "args"]),
            )
            .await?;

        if !output.success() {
            return Ok(false);
        }

        Ok(output
            .stdout
            .lines()
            .any(|line| line.contains("ttymon") && line.contains("-d /dev/console")))
    }

    async fn exec(
        &self,
        op: Operation,
        zone: &str,
        program: &str,
        argv: Vec<String>,
    ) -> Result<CommandOutput, AdmError> {
        self.runner
            .run(program, &argv)
            .await
            .context(ExecSnafu { op, zone })
    }

    async fn checked(
        &self,
        op: Operation,
        zone: &str,
        program: &str,
        argv: Vec<String>,
    ) -> Result<CommandOutput, AdmError> {
        let output = self.exec(op, zone, program, argv).await?;
        ensure!(
            output.success(),
            FailedSnafu {
                op,
                zone,
                output: output.combined(),
            }
        );
        Ok(output)
    }
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_split_on_whitespace() {
        assert_eq!(
            split_options("  -c /tmp/profile.xml   -x  "),
            vec!["-c", "/tmp/profile.xml", "-x"]
        );
        assert!(split_options("").is_empty());
    }
}
