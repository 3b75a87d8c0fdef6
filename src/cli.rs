// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use zonectl::types::{DesiredState, ZoneName};

#[derive(Parser)]
#[command(name = "zonectl")]
#[command(about = "Converge Solaris and illumos zones to a desired state")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print zones that changed
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the zone manifest (default: discover zonectl.yml)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a zonectl.yml manifest template
    Init {
        /// Name of the example zone
        #[arg(long)]
        zone: Option<String>,

        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Converge every zone in the manifest
    Apply {
        /// Only converge these zones
        #[arg(short, long = "zone")]
        zones: Vec<ZoneName>,
    },

    /// Converge a single zone described on the command line
    Ensure(EnsureArgs),

    /// Show zones known to zoneadm
    Status {
        /// Show only this zone
        zone: Option<ZoneName>,
    },
}

#[derive(Args)]
pub struct EnsureArgs {
    /// Zone name
    pub name: ZoneName,

    /// Desired state
    #[arg(short, long, value_enum, default_value_t = DesiredState::Present)]
    pub state: DesiredState,

    /// Zone path, required when the zone must be created
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Create a sparse-root zone
    #[arg(long)]
    pub sparse: bool,

    /// Extra zonecfg commands
    #[arg(long, default_value = "")]
    pub config: String,

    /// Options passed to zonecfg create
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub create_options: String,

    /// Options passed to zoneadm install
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub install_options: String,

    /// Options passed to zoneadm attach
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub attach_options: String,

    /// Pre-hashed root password
    #[arg(long, env = "ZONECTL_ROOT_PASSWORD", hide_env_values = true)]
    pub root_password: Option<String>,

    /// Boot timeout (e.g. 10m)
    #[arg(long, value_parser = humantime_serde::re::humantime::parse_duration)]
    pub timeout: Option<Duration>,
}
