// ABOUTME: Host operating system detection via uname.
// ABOUTME: Zones require SunOS 5.10 or later; 5.10 additionally needs sysid answers.

use crate::admin::ToolPaths;
use crate::runner::{CommandError, CommandRunner};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("zones require Solaris or illumos, found {0}")]
    UnsupportedPlatform(String),

    #[error("zones require SunOS 5.10 or later, found {0}")]
    UnsupportedRelease(String),

    #[error("unrecognized OS release: {0}")]
    InvalidRelease(String),

    #[error("uname failed: {0}")]
    Uname(String),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Kernel name and release of the global zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsRelease {
    pub system: String,
    pub major: u32,
    pub minor: u32,
}

impl OsRelease {
    /// Run `uname -s` and `uname -r` and validate the result.
    pub async fn detect<R: CommandRunner + ?Sized>(
        runner: &R,
        tools: &ToolPaths,
    ) -> Result<Self, PlatformError> {
        let system = uname(runner, tools, "-s").await?;
        let release = uname(runner, tools, "-r").await?;
        let os = Self::parse(&system, &release)?;
        tracing::debug!("detected {} {}.{}", os.system, os.major, os.minor);
        Ok(os)
    }

    pub fn parse(system: &str, release: &str) -> Result<Self, PlatformError> {
        let system = system.trim();
        if system != "SunOS" {
            return Err(PlatformError::UnsupportedPlatform(system.to_string()));
        }

        let release = release.trim();
        let (major, minor) = release
            .split_once('.')
            .ok_or_else(|| PlatformError::InvalidRelease(release.to_string()))?;
        // Some illumos distributions append a suffix to the minor number.
        let minor: String = minor.chars().take_while(|c| c.is_ascii_digit()).collect();

        let major = major
            .parse::<u32>()
            .map_err(|_| PlatformError::InvalidRelease(release.to_string()))?;
        let minor = minor
            .parse::<u32>()
            .map_err(|_| PlatformError::InvalidRelease(release.to_string()))?;

        if minor < 10 {
            return Err(PlatformError::UnsupportedRelease(release.to_string()));
        }

        Ok(OsRelease {
            system: system.to_string(),
            major,
            minor,
        })
    }

    /// Solaris 10 zones boot into the sysid tool unless pre-answered.
    pub fn uses_sysid(&self) -> bool {
        self.minor == 10
    }
}

async fn uname<R: CommandRunner + ?Sized>(
    runner: &R,
    tools: &ToolPaths,
    flag: &str,
) -> Result<String, PlatformError> {
    let output = runner.run(&tools.uname, &[flag.to_string()]).await?;
    if !output.success() {
        return Err(PlatformError::Uname(output.combined()));
    }
    Ok(output.stdout.trim().to_string())
}
