// ABOUTME: Sets the root password hash in a zone's shadow file.

use super::{ProvisionError, io_error};
use std::fs;
use std::path::Path;

/// Replace the password field of the `root` entry.
///
/// Returns `None` when the input has no root entry. All other lines,
/// including the trailing newline, are preserved byte for byte.
pub fn set_root_hash(shadow: &str, hash: &str) -> Option<String> {
    let mut found = false;
    let lines: Vec<String> = shadow
        .split_inclusive('\n')
        .map(|line| {
            if found {
                return line.to_string();
            }
            let mut fields: Vec<&str> = line.split(':').collect();
            if fields.len() > 1 && fields[0] == "root" {
                found = true;
                fields[1] = hash;
                fields.join(":")
            } else {
                line.to_string()
            }
        })
        .collect();

    found.then(|| lines.concat())
}

/// Rewrite `path` with the new root hash; `Ok(false)` if there is no root entry.
pub(super) fn apply_root_hash(path: &Path, hash: &str) -> Result<bool, ProvisionError> {
    let current = fs::read_to_string(path).map_err(io_error(path))?;
    match set_root_hash(&current, hash) {
        Some(updated) => {
            fs::write(path, updated).map_err(io_error(path))?;
            Ok(true)
        }
        None => Ok(false),
    }
}
