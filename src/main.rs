// ABOUTME: Entry point for the zonectl CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use tracing_subscriber::EnvFilter;
use zonectl::config::{self, Config};
use zonectl::error::Result;
use zonectl::output::{Output, OutputMode};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli, mode).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let output = Output::new(mode);
    match cli.command {
        Commands::Init { zone, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, zone.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Apply { zones } => {
            let config = load_config(cli.file.as_deref())?;
            commands::apply(&config, &zones, output).await
        }
        Commands::Ensure(args) => {
            // A manifest is optional here; it only supplies tools and defaults.
            let config = match load_config(cli.file.as_deref()) {
                Ok(config) => Some(config),
                Err(zonectl::error::Error::ConfigNotFound(_)) if cli.file.is_none() => None,
                Err(e) => return Err(e),
            };
            commands::ensure(config.as_ref(), args, output).await
        }
        Commands::Status { zone } => {
            let config = match load_config(cli.file.as_deref()) {
                Ok(config) => Some(config),
                Err(zonectl::error::Error::ConfigNotFound(_)) if cli.file.is_none() => None,
                Err(e) => return Err(e),
            };
            commands::status(config.as_ref(), zone.as_ref(), output).await
        }
    }
}

fn load_config(file: Option<&std::path::Path>) -> Result<Config> {
    match file {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}
