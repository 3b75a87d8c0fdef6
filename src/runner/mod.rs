// ABOUTME: External process execution behind a mockable trait.
// ABOUTME: Every zoneadm, zonecfg, ps and ssh-keygen call flows through CommandRunner.

mod error;
mod system;

pub use error::CommandError;
pub use system::SystemRunner;

use async_trait::async_trait;

/// Output from a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code of the command (-1 when killed by a signal).
    pub exit_code: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, trimmed, for error messages.
    pub fn combined(&self) -> String {
        let mut text = String::new();
        text.push_str(self.stdout.trim());
        if !self.stderr.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(self.stderr.trim());
        }
        text
    }
}

/// Runs a program with arguments and captures its output.
///
/// A non-zero exit status is not an error at this layer; callers decide
/// what a failure means for the operation they are performing.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError>;
}
