// ABOUTME: First-boot preparation of a freshly installed zone root.
// ABOUTME: Writes sysid answers, sets the root password hash and generates SSH host keys.

mod host_keys;
mod shadow;
mod sysid;

pub use host_keys::HostKeyType;
pub use shadow::set_root_hash;
pub use sysid::SYSID_STATE;

use crate::admin::ToolPaths;
use crate::diagnostics::{Diagnostics, Warning};
use crate::platform::OsRelease;
use crate::runner::{CommandError, CommandRunner};
use crate::types::ZoneName;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to update {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create {key_type} host key: {output}")]
    KeyGen {
        key_type: HostKeyType,
        output: String,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ProvisionError + '_ {
    move |source| ProvisionError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Prepares the root filesystem of an installed zone.
pub struct Provisioner<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    tools: &'a ToolPaths,
    zone: &'a ZoneName,
    root: PathBuf,
}

impl<'a, R: CommandRunner + ?Sized> Provisioner<'a, R> {
    /// `zonepath` is the zone's configured path; its image lives under `root/`.
    pub fn new(runner: &'a R, tools: &'a ToolPaths, zone: &'a ZoneName, zonepath: &Path) -> Self {
        Self {
            runner,
            tools,
            zone,
            root: zonepath.join("root"),
        }
    }

    pub async fn provision(
        &self,
        os: &OsRelease,
        root_password: Option<&str>,
        diag: &mut Diagnostics,
    ) -> Result<(), ProvisionError> {
        if os.uses_sysid() {
            sysid::write_answers(&self.root, self.zone)?;
        }

        if let Some(hash) = root_password {
            let shadow = self.root.join("etc/shadow");
            if !shadow::apply_root_hash(&shadow, hash)? {
                diag.warn(Warning::root_password(format!(
                    "no root entry in {}; root password not set",
                    shadow.display()
                )));
            }
        }

        self.generate_host_keys(diag).await
    }

    async fn generate_host_keys(&self, diag: &mut Diagnostics) -> Result<(), ProvisionError> {
        for key_type in HostKeyType::ALL {
            let key_file = self.root.join("etc/ssh").join(key_type.file_name());
            if key_file.is_file() {
                continue;
            }

            match host_keys::generate(self.runner, &self.tools.ssh_keygen, key_type, &key_file)
                .await
            {
                Ok(()) => tracing::info!("generated {} host key for {}", key_type, self.zone),
                Err(ProvisionError::KeyGen { output, .. }) if !key_type.is_required() => {
                    diag.warn(Warning::host_key(format!(
                        "skipped {} host key for {}: {}",
                        key_type, self.zone, output
                    )));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
