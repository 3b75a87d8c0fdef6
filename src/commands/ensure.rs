// ABOUTME: Ensure command implementation.
// ABOUTME: Converges one zone described entirely by command-line flags.

use super::system_runner;
use crate::cli::EnsureArgs;
use zonectl::admin::ToolPaths;
use zonectl::config::{Config, Defaults, EnvValue, ZoneSpec};
use zonectl::converge::Converger;
use zonectl::error::{Error, Result};
use zonectl::output::Output;

pub async fn ensure(config: Option<&Config>, args: EnsureArgs, mut output: Output) -> Result<()> {
    let tools = config.map(|c| c.tools.clone()).unwrap_or_default();
    let defaults = config.map(|c| c.defaults.clone()).unwrap_or_default();
    let spec = spec_from_args(args);

    output.start_timer();
    let runner = system_runner(config);
    let report = converge(&runner, &tools, &defaults, &spec).await?;
    output.report(&report);
    output.success(if report.changed {
        "Zone changed"
    } else {
        "Zone already in desired state"
    });
    Ok(())
}

async fn converge(
    runner: &zonectl::runner::SystemRunner,
    tools: &ToolPaths,
    defaults: &Defaults,
    spec: &ZoneSpec,
) -> Result<zonectl::converge::Report> {
    Converger::new(runner, tools, defaults)
        .converge(spec)
        .await
        .map_err(|source| Error::Converge {
            zone: spec.name.to_string(),
            source,
        })
}

fn spec_from_args(args: EnsureArgs) -> ZoneSpec {
    let mut spec = ZoneSpec::new(args.name, args.state)
        .sparse(args.sparse)
        .config(args.config);
    spec.path = args.path;
    spec.create_options = args.create_options;
    spec.install_options = args.install_options;
    spec.attach_options = args.attach_options;
    spec.root_password = args.root_password.map(EnvValue::Literal);
    spec.timeout = args.timeout;
    spec
}
