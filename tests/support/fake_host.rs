// ABOUTME: In-memory simulation of a Solaris global zone's administrative tools.
// ABOUTME: Answers zoneadm, zonecfg, ps, uname and ssh-keygen like the real commands would.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use zonectl::runner::{CommandError, CommandOutput, CommandRunner};
use zonectl::types::ZoneState;

pub const SHADOW: &str = "root:*LK*:6445::::::\ndaemon:NP:6445::::::\n";

#[derive(Debug, Clone)]
struct FakeZone {
    id: u32,
    state: ZoneState,
    path: String,
    /// ps polls remaining before the console ttymon shows up.
    console_delay: u32,
}

#[derive(Default)]
struct HostState {
    system: String,
    release: String,
    zones: BTreeMap<String, FakeZone>,
    scripts: HashMap<String, String>,
    calls: Vec<String>,
    failures: HashMap<String, String>,
    rejected_key_types: HashSet<String>,
    console_delay: u32,
    next_id: u32,
    ps_polls: u32,
}

/// A global zone whose tools only exist in memory.
pub struct FakeHost {
    state: Mutex<HostState>,
}

fn ok(stdout: impl Into<String>) -> CommandOutput {
    CommandOutput {
        exit_code: 0,
        stdout: stdout.into(),
        stderr: String::new(),
    }
}

fn fail(stderr: impl Into<String>) -> CommandOutput {
    CommandOutput {
        exit_code: 1,
        stdout: String::new(),
        stderr: stderr.into(),
    }
}

impl FakeHost {
    pub fn solaris11() -> Self {
        Self::with_release("SunOS", "5.11")
    }

    pub fn solaris10() -> Self {
        Self::with_release("SunOS", "5.10")
    }

    pub fn with_release(system: &str, release: &str) -> Self {
        FakeHost {
            state: Mutex::new(HostState {
                system: system.to_string(),
                release: release.to_string(),
                next_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Pre-populate a zone, creating its root when it has an installed image.
    pub fn with_zone(self, name: &str, state: ZoneState, path: &Path) -> Self {
        if state.has_install() {
            create_zone_root(path);
        }
        {
            let mut host = self.state.lock();
            let id = host.next_id;
            host.next_id += 1;
            host.zones.insert(
                name.to_string(),
                FakeZone {
                    id,
                    state,
                    path: path.to_string_lossy().to_string(),
                    console_delay: 0,
                },
            );
        }
        self
    }

    /// Make `zoneadm`/`zonecfg` subcommand `op` fail with `message`.
    pub fn fail_on(self, op: &str, message: &str) -> Self {
        self.state
            .lock()
            .failures
            .insert(op.to_string(), message.to_string());
        self
    }

    /// Number of ps polls after boot before the console login appears.
    pub fn console_delay(self, polls: u32) -> Self {
        self.state.lock().console_delay = polls;
        self
    }

    pub fn reject_key_type(self, key_type: &str) -> Self {
        self.state
            .lock()
            .rejected_key_types
            .insert(key_type.to_string());
        self
    }

    pub fn zone_state(&self, name: &str) -> Option<ZoneState> {
        self.state.lock().zones.get(name).map(|z| z.state)
    }

    pub fn script(&self, name: &str) -> Option<String> {
        self.state.lock().scripts.get(name).cloned()
    }

    /// Every invocation, as `tool arg arg ...`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// State-changing invocations, summarized as `tool op zone`.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|call| {
                let words: Vec<&str> = call.split(' ').collect();
                match words.as_slice() {
                    ["zonecfg", "-z", zone, "-f", ..] => Some(format!("zonecfg create {zone}")),
                    ["zonecfg", "-z", zone, "delete", ..] => Some(format!("zonecfg delete {zone}")),
                    ["zoneadm", "-z", _, "list", ..] => None,
                    ["zoneadm", "-z", zone, op, ..] => Some(format!("zoneadm {op} {zone}")),
                    ["ssh-keygen", .., "-t", kind, "-N", _] => Some(format!("ssh-keygen {kind}")),
                    _ => None,
                }
            })
            .collect()
    }

    pub fn ps_polls(&self) -> u32 {
        self.state.lock().ps_polls
    }
}

fn create_zone_root(path: &Path) {
    let root = path.join("root");
    std::fs::create_dir_all(root.join("etc/ssh")).unwrap();
    std::fs::write(root.join("etc/shadow"), SHADOW).unwrap();
}

impl HostState {
    fn list_line(name: &str, zone: &FakeZone) -> String {
        let id = if zone.state == ZoneState::Running {
            zone.id.to_string()
        } else {
            "-".to_string()
        };
        format!(
            "{}:{}:{}:{}:{}-uuid:solaris:excl\n",
            id,
            name,
            zone.state,
            zone.path.replace(':', "\\:"),
            name
        )
    }

    fn uname(&self, args: &[String]) -> CommandOutput {
        match args.first().map(String::as_str) {
            Some("-s") => ok(format!("{}\n", self.system)),
            Some("-r") => ok(format!("{}\n", self.release)),
            _ => fail("uname: illegal option"),
        }
    }

    fn zoneadm(&mut self, args: &[String]) -> CommandOutput {
        if args.first().map(String::as_str) == Some("list") {
            let mut out = String::from("0:global:running:/::solaris:shared\n");
            for (name, zone) in &self.zones {
                out.push_str(&Self::list_line(name, zone));
            }
            return ok(out);
        }

        let (name, op) = match args {
            [z, name, op, ..] if z == "-z" => (name.clone(), op.clone()),
            _ => return fail("usage: zoneadm -z zone subcommand"),
        };

        if op != "list" {
            if let Some(message) = self.failures.get(&op) {
                return fail(message.clone());
            }
        }

        let console_delay = self.console_delay;
        let Some(zone) = self.zones.get_mut(&name) else {
            return fail(format!("zoneadm: {name}: No such zone configured"));
        };

        match op.as_str() {
            "list" => {
                let line = Self::list_line(&name, zone);
                ok(line)
            }
            "install" if zone.state == ZoneState::Configured => {
                create_zone_root(Path::new(&zone.path));
                zone.state = ZoneState::Installed;
                ok("Installation: Succeeded\n")
            }
            "uninstall" if zone.state.has_install() && !zone.state.needs_halt() => {
                zone.state = ZoneState::Configured;
                ok("")
            }
            "boot" if matches!(zone.state, ZoneState::Installed | ZoneState::Ready) => {
                zone.state = ZoneState::Running;
                zone.console_delay = console_delay;
                ok("")
            }
            "halt" if zone.state.needs_halt() => {
                zone.state = ZoneState::Installed;
                ok("")
            }
            "detach" if zone.state == ZoneState::Installed => {
                zone.state = ZoneState::Configured;
                ok("")
            }
            "attach" if zone.state == ZoneState::Configured => {
                zone.state = ZoneState::Installed;
                ok("")
            }
            _ => fail(format!(
                "zoneadm: zone '{name}': {op} operation is invalid for {} zones",
                zone.state
            )),
        }
    }

    fn zonecfg(&mut self, args: &[String]) -> CommandOutput {
        match args {
            [z, name, f, file] if z == "-z" && f == "-f" => {
                if let Some(message) = self.failures.get("configure") {
                    return fail(message.clone());
                }
                if self.zones.contains_key(name) {
                    return fail(format!("zonecfg:{name}: Zone {name} already exists"));
                }
                let script = std::fs::read_to_string(file).unwrap_or_default();
                let path = script
                    .lines()
                    .find_map(|l| l.strip_prefix("set zonepath="))
                    .unwrap_or_default()
                    .to_string();
                let id = self.next_id;
                self.next_id += 1;
                self.zones.insert(
                    name.clone(),
                    FakeZone {
                        id,
                        state: ZoneState::Configured,
                        path,
                        console_delay: 0,
                    },
                );
                self.scripts.insert(name.clone(), script);
                ok("")
            }
            [z, name, d, force] if z == "-z" && d == "delete" && force == "-F" => {
                match self.zones.get(name) {
                    Some(zone) if zone.state == ZoneState::Configured => {
                        self.zones.remove(name);
                        ok("")
                    }
                    Some(zone) => fail(format!(
                        "zonecfg: zone {name} is {}; must be configured to delete",
                        zone.state
                    )),
                    None => fail(format!("zonecfg:{name}: No such zone configured")),
                }
            }
            _ => fail("zonecfg: usage"),
        }
    }

    fn ps(&mut self, args: &[String]) -> CommandOutput {
        self.ps_polls += 1;
        let name = match args {
            [z, name, ..] if z == "-z" => name,
            _ => return fail("ps: usage"),
        };
        match self.zones.get_mut(name) {
            Some(zone) if zone.state == ZoneState::Running => {
                if zone.console_delay > 0 {
                    zone.console_delay -= 1;
                    ok("ARGS\n/sbin/init\n/lib/svc/bin/svc.startd\n")
                } else {
                    ok("ARGS\n/sbin/init\n/usr/lib/saf/ttymon -g -d /dev/console -l console -T vt100\n")
                }
            }
            _ => fail(format!("ps: unknown zone: {name}")),
        }
    }

    fn ssh_keygen(&self, args: &[String]) -> CommandOutput {
        let file = args
            .iter()
            .position(|a| a == "-f")
            .and_then(|i| args.get(i + 1));
        let kind = args
            .iter()
            .position(|a| a == "-t")
            .and_then(|i| args.get(i + 1));
        match (file, kind) {
            (Some(_), Some(kind)) if self.rejected_key_types.contains(kind) => {
                fail(format!("unknown key type {kind}"))
            }
            (Some(file), Some(_)) => match std::fs::write(file, "PRIVATE KEY") {
                Ok(()) => ok(""),
                Err(e) => fail(format!("{file}: {e}")),
            },
            _ => fail("ssh-keygen: usage"),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeHost {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, CommandError> {
        let tool = program.rsplit('/').next().unwrap_or(program);
        let mut host = self.state.lock();
        host.calls.push(format!("{} {}", tool, args.join(" ")));

        let output = match tool {
            "uname" => host.uname(args),
            "zoneadm" => host.zoneadm(args),
            "zonecfg" => host.zonecfg(args),
            "ps" => host.ps(args),
            "ssh-keygen" => host.ssh_keygen(args),
            _ => {
                return Err(CommandError::Spawn {
                    program: program.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
        };
        Ok(output)
    }
}
