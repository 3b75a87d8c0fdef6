// ABOUTME: Pre-answers the Solaris 10 sysidtool so new zones boot unattended.

use super::{ProvisionError, io_error};
use crate::types::ZoneName;
use std::fs;
use std::path::Path;

/// Contents of `etc/.sysIDtool.state` marking every sysid question as answered.
pub const SYSID_STATE: &str = "\
1       # System previously configured?
1       # Bootparams succeeded?
1       # System is on a network?
1       # Extended network information gathered?
0       # Autobinder succeeded?
1       # Network has subnets?
1       # root password prompted for?
1       # locale and term prompted for?
1       # security policy in place
1       # NFSv4 domain configured
0       # Auto Registration Configured
vt100";

pub(super) fn write_answers(root: &Path, zone: &ZoneName) -> Result<(), ProvisionError> {
    let unconfigured = root.join("etc/.UNCONFIGURED");
    if unconfigured.is_file() {
        fs::remove_file(&unconfigured).map_err(io_error(&unconfigured))?;
    }

    let noautoshutdown = root.join("noautoshutdown");
    fs::write(&noautoshutdown, "").map_err(io_error(&noautoshutdown))?;

    let nodename = root.join("etc/nodename");
    fs::write(&nodename, zone.as_str()).map_err(io_error(&nodename))?;

    let state = root.join("etc/.sysIDtool.state");
    fs::write(&state, SYSID_STATE).map_err(io_error(&state))?;

    tracing::debug!("wrote sysid answers for {}", zone);
    Ok(())
}
