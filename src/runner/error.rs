// ABOUTME: Errors from spawning or waiting on external commands.
// ABOUTME: Non-zero exit codes are reported through CommandOutput, not here.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}
