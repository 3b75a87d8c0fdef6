// ABOUTME: SSH host key generation inside the zone root via ssh-keygen.

use super::ProvisionError;
use crate::runner::CommandRunner;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKeyType {
    Rsa,
    Dsa,
}

impl HostKeyType {
    pub const ALL: [HostKeyType; 2] = [HostKeyType::Rsa, HostKeyType::Dsa];

    pub fn as_str(&self) -> &'static str {
        match self {
            HostKeyType::Rsa => "rsa",
            HostKeyType::Dsa => "dsa",
        }
    }

    pub fn file_name(&self) -> String {
        format!("ssh_host_{}_key", self.as_str())
    }

    /// DSA was removed from recent OpenSSH releases, so only RSA must succeed.
    pub fn is_required(&self) -> bool {
        matches!(self, HostKeyType::Rsa)
    }
}

impl fmt::Display for HostKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(super) async fn generate<R: CommandRunner + ?Sized>(
    runner: &R,
    ssh_keygen: &str,
    key_type: HostKeyType,
    key_file: &Path,
) -> Result<(), ProvisionError> {
    let argv = vec![
        "-f".to_string(),
        key_file.to_string_lossy().to_string(),
        "-t".to_string(),
        key_type.as_str().to_string(),
        "-N".to_string(),
        String::new(),
    ];

    let output = runner.run(ssh_keygen, &argv).await?;
    if !output.success() {
        return Err(ProvisionError::KeyGen {
            key_type,
            output: output.combined(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_file_names() {
        assert_eq!(HostKeyType::Rsa.file_name(), "ssh_host_rsa_key");
        assert_eq!(HostKeyType::Dsa.file_name(), "ssh_host_dsa_key");
        assert!(HostKeyType::Rsa.is_required());
        assert!(!HostKeyType::Dsa.is_required());
    }
}
