// ABOUTME: CommandRunner implementation backed by tokio::process.
// ABOUTME: Captures stdout/stderr and enforces an optional per-command timeout.

use super::{CommandError, CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs commands on the local host.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    command_timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    async fn run_inner(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        tracing::debug!("exec: {} {}", program, args.join(" "));

        let output = match self.command_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.run_inner(program, args))
                .await
                .map_err(|_| CommandError::Timeout {
                    program: program.to_string(),
                    timeout,
                })??,
            None => self.run_inner(program, args).await?,
        };

        tracing::debug!("exit {}: {}", output.exit_code, program);
        Ok(output)
    }
}
