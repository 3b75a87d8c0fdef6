// ABOUTME: Renders the zonecfg command file used to create a zone.
// ABOUTME: Chooses sparse-root or whole-root creation and appends user config.

/// Commands fed to `zonecfg -z NAME -f FILE`.
#[derive(Debug, Clone)]
pub struct ZonecfgScript<'a> {
    pub sparse: bool,
    pub create_options: &'a str,
    pub path: &'a str,
    pub config: &'a str,
}

impl ZonecfgScript<'_> {
    pub fn render(&self) -> String {
        let create = if self.sparse { "create" } else { "create -b" };
        let create_line = format!("{} {}", create, self.create_options.trim());

        let mut script = String::new();
        script.push_str(create_line.trim_end());
        script.push('\n');
        script.push_str(&format!("set zonepath={}\n", self.path));
        if !self.config.trim().is_empty() {
            script.push_str(self.config.trim_end());
            script.push('\n');
        }
        script
    }

    /// Progress note describing which kind of root is being created.
    pub fn describe(&self) -> &'static str {
        if self.sparse {
            "creating sparse-root zone"
        } else {
            "creating whole-root zone"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_root_uses_blank_create() {
        let script = ZonecfgScript {
            sparse: false,
            create_options: "",
            path: "/zones/web",
            config: "set autoboot=true\nadd net\nset physical=net0\nend",
        };
        assert_eq!(
            script.render(),
            "create -b\nset zonepath=/zones/web\nset autoboot=true\nadd net\nset physical=net0\nend\n"
        );
        assert_eq!(script.describe(), "creating whole-root zone");
    }

    #[test]
    fn sparse_with_create_options() {
        let script = ZonecfgScript {
            sparse: true,
            create_options: "-t SYSdefault",
            path: "/zones/db",
            config: "",
        };
        assert_eq!(
            script.render(),
            "create -t SYSdefault\nset zonepath=/zones/db\n"
        );
    }
}
