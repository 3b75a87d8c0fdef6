// ABOUTME: Command module aggregator for the zonectl CLI.
// ABOUTME: Re-exports apply, ensure, and status command handlers.

mod apply;
mod ensure;
mod status;

pub use apply::apply;
pub use ensure::ensure;
pub use status::status;

use zonectl::config::Config;
use zonectl::runner::SystemRunner;

/// Local runner honouring the manifest's per-command timeout.
fn system_runner(config: Option<&Config>) -> SystemRunner {
    SystemRunner::new().command_timeout(config.and_then(|c| c.defaults.command_timeout))
}
