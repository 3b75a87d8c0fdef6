// ABOUTME: Idempotent convergence of a zone to its desired state.
// ABOUTME: Reads current state, plans from a fixed table and executes the steps in order.

mod error;
mod plan;
mod report;

pub use error::ConvergeError;
pub use plan::{Action, Plan, plan};
pub use report::Report;

use crate::admin::{ToolPaths, ZoneAdm, ZonecfgScript, split_options};
use crate::config::{Defaults, ZoneSpec};
use crate::diagnostics::Diagnostics;
use crate::platform::OsRelease;
use crate::provision::Provisioner;
use crate::runner::CommandRunner;
use crate::types::ZoneName;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Drives zones to their desired state through a [`CommandRunner`].
pub struct Converger<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    tools: &'a ToolPaths,
    defaults: &'a Defaults,
}

/// Per-zone execution context shared by the action steps.
struct Step<'s> {
    spec: &'s ZoneSpec,
    os: &'s OsRelease,
    /// Zone path from the spec, else the one zoneadm reported.
    zonepath: Option<PathBuf>,
}

impl<'a, R: CommandRunner + ?Sized> Converger<'a, R> {
    pub fn new(runner: &'a R, tools: &'a ToolPaths, defaults: &'a Defaults) -> Self {
        Self {
            runner,
            tools,
            defaults,
        }
    }

    fn adm(&self) -> ZoneAdm<'a, R> {
        ZoneAdm::new(self.runner, self.tools)
    }

    /// Detect the host platform, then converge `spec`.
    pub async fn converge(&self, spec: &ZoneSpec) -> Result<Report, ConvergeError> {
        let os = OsRelease::detect(self.runner, self.tools).await?;
        self.converge_on(&os, spec).await
    }

    /// Converge `spec` on a host whose release is already known.
    pub async fn converge_on(
        &self,
        os: &OsRelease,
        spec: &ZoneSpec,
    ) -> Result<Report, ConvergeError> {
        let adm = self.adm();
        let entry = adm.entry(&spec.name).await?;
        let current = entry.as_ref().map(|e| e.state);

        tracing::info!(
            "zone {}: current={} desired={}",
            spec.name,
            current.map(|s| s.to_string()).unwrap_or_else(|| "absent".to_string()),
            spec.state
        );

        let plan = plan(&spec.name, current, spec.state)?;
        let mut report = Report::new(spec.name.clone(), spec.state);
        if let Some(note) = plan.note {
            report.note(note);
        }

        if plan.is_noop() {
            return Ok(report);
        }

        let step = Step {
            spec,
            os,
            zonepath: zonepath(spec, entry.map(|e| PathBuf::from(e.path))),
        };

        let mut diag = Diagnostics::default();
        for action in plan.actions {
            tracing::info!("zone {}: {}", spec.name, action);
            if let Err(e) = self
                .execute(&adm, &step, action, &mut report, &mut diag)
                .await
            {
                if let ConvergeError::Adm(adm_err) = &e {
                    tracing::debug!(
                        kind = ?adm_err.kind(),
                        "zone {}: {} failed at {}",
                        spec.name,
                        action,
                        adm_err
                            .operation()
                            .map(|op| op.to_string())
                            .unwrap_or_else(|| "output parsing".to_string())
                    );
                }
                return Err(e);
            }
            report.changed(action.done_message());
        }

        report.warnings = diag.into_warnings();
        Ok(report)
    }

    async fn execute(
        &self,
        adm: &ZoneAdm<'a, R>,
        step: &Step<'_>,
        action: Action,
        report: &mut Report,
        diag: &mut Diagnostics,
    ) -> Result<(), ConvergeError> {
        let zone = &step.spec.name;
        match action {
            Action::Configure => {
                let path = step
                    .spec
                    .path
                    .as_deref()
                    .ok_or_else(|| ConvergeError::MissingPath(zone.clone()))?;
                let path = path.to_string_lossy();
                let script = ZonecfgScript {
                    sparse: step.spec.sparse,
                    create_options: &step.spec.create_options,
                    path: &path,
                    config: &step.spec.config,
                };
                report.note(script.describe());
                adm.configure(zone, &script.render()).await?;
            }
            Action::Install => {
                adm.install(zone, &split_options(&step.spec.install_options))
                    .await?;
                let zonepath = step
                    .zonepath
                    .as_deref()
                    .ok_or_else(|| ConvergeError::MissingPath(zone.clone()))?;
                self.provision(step, zonepath, diag).await?;
            }
            Action::Boot => {
                adm.boot(zone).await?;
                let timeout = step.spec.timeout.unwrap_or(self.defaults.timeout);
                wait_for_console(adm, zone, timeout, self.defaults.poll_interval).await?;
            }
            Action::Halt => adm.halt(zone).await?,
            Action::Uninstall => adm.uninstall(zone).await?,
            Action::Delete => adm.delete(zone).await?,
            Action::Detach => adm.detach(zone).await?,
            Action::Attach => {
                adm.attach(zone, &split_options(&step.spec.attach_options))
                    .await?
            }
        }
        Ok(())
    }

    async fn provision(
        &self,
        step: &Step<'_>,
        zonepath: &Path,
        diag: &mut Diagnostics,
    ) -> Result<(), ConvergeError> {
        let root_password = step
            .spec
            .root_password
            .as_ref()
            .map(|v| v.resolve())
            .transpose()?;

        Provisioner::new(self.runner, self.tools, &step.spec.name, zonepath)
            .provision(step.os, root_password.as_deref(), diag)
            .await?;
        Ok(())
    }
}

/// Where the zone lives: zoneadm's answer for an existing zone, else the manifest's.
fn zonepath(spec: &ZoneSpec, reported: Option<PathBuf>) -> Option<PathBuf> {
    match (reported, &spec.path) {
        (Some(reported), Some(wanted)) if &reported != wanted => {
            tracing::warn!(
                "zone {} lives at {}, not {}; using the existing path",
                spec.name,
                reported.display(),
                wanted.display()
            );
            Some(reported)
        }
        (Some(reported), _) => Some(reported),
        (None, wanted) => wanted.clone(),
    }
}

/// Poll until the zone's console login is up or `timeout` elapses.
async fn wait_for_console<R: CommandRunner + ?Sized>(
    adm: &ZoneAdm<'_, R>,
    zone: &ZoneName,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), ConvergeError> {
    let started = Instant::now();
    loop {
        if adm.console_ready(zone).await? {
            tracing::debug!("zone {} booted after {:?}", zone, started.elapsed());
            return Ok(());
        }
        if started.elapsed() >= timeout {
            return Err(ConvergeError::BootTimeout {
                zone: zone.clone(),
                timeout,
            });
        }
        tokio::time::sleep(poll_interval).await;
    }
}
