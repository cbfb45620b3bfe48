//! Follow-up instructions printed once the project exists

use std::path::{Path, PathBuf};

/// Package manager that launched the scaffolder, parsed from its user agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerInfo {
    pub name: String,
    pub version: Option<String>,
}

/// Parse a user agent like `pnpm/8.6.0 npm/? node/v18.16.0 linux x64`
///
/// Only the first space-separated segment is considered. Returns `None` for
/// a missing or empty user agent.
pub fn package_manager_from_user_agent(user_agent: Option<&str>) -> Option<PackageManagerInfo> {
    let spec = user_agent?.split(' ').next().filter(|s| !s.is_empty())?;
    let mut parts = spec.split('/');
    let name = parts.next()?.to_string();
    let version = parts.next().map(str::to_string);
    Some(PackageManagerInfo { name, version })
}

/// `cd` target (if any) plus install and dev commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSteps {
    pub cd: Option<PathBuf>,
    pub commands: Vec<String>,
}

impl NextSteps {
    /// Build the steps for a project at `root` created from `cwd`
    pub fn new(root: &Path, cwd: &Path, user_agent: Option<&str>, default_manager: &str) -> Self {
        let manager = package_manager_from_user_agent(user_agent)
            .map(|info| info.name)
            .unwrap_or_else(|| default_manager.to_string());

        let commands = match manager.as_str() {
            "yarn" => vec!["yarn".to_string(), "yarn dev".to_string()],
            other => vec![format!("{} install", other), format!("{} run dev", other)],
        };

        Self {
            cd: relative_dir(root, cwd),
            commands,
        }
    }

    /// Every line to print, in order
    pub fn lines(&self) -> Vec<String> {
        self.cd
            .iter()
            .map(|dir| format!("cd {}", dir.display()))
            .chain(self.commands.iter().cloned())
            .collect()
    }
}

/// Path of `root` as seen from `cwd`, `None` when they are the same directory
fn relative_dir(root: &Path, cwd: &Path) -> Option<PathBuf> {
    if root == cwd {
        return None;
    }
    match root.strip_prefix(cwd) {
        Ok(relative) if relative.as_os_str().is_empty() => None,
        Ok(relative) => Some(relative.to_path_buf()),
        Err(_) => Some(root.to_path_buf()),
    }
}
