//! Moving the bundled Java runtime aside
//!
//! The launcher prefers `jre/` next to it. Renaming it lets the system JDK
//! load the agent instead.

use std::fmt;

use serde::Serialize;

use crate::platform::{InstallationRoot, Location};

/// What happened to the bundled runtime directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum RuntimeOutcome {
    /// `jre` was renamed to `jr`
    Renamed,
    /// `jr` already exists from an earlier run
    AlreadyDisabled,
    /// There is no bundled runtime
    Absent,
    /// The rename was attempted and refused
    RenameFailed(String),
}

impl fmt::Display for RuntimeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeOutcome::Renamed => f.write_str("bundled runtime disabled"),
            RuntimeOutcome::AlreadyDisabled => f.write_str("bundled runtime already disabled"),
            RuntimeOutcome::Absent => f.write_str("no bundled runtime"),
            RuntimeOutcome::RenameFailed(reason) => write!(f, "could not disable runtime: {reason}"),
        }
    }
}

/// Rename the bundled runtime unless that already happened
pub fn disable_bundled_runtime(root: &InstallationRoot) -> RuntimeOutcome {
    let active = root.resolve(Location::RuntimeDir);
    let disabled = root.resolve(Location::DisabledRuntimeDir);

    if disabled.exists() {
        return RuntimeOutcome::AlreadyDisabled;
    }
    if !active.exists() {
        return RuntimeOutcome::Absent;
    }

    match std::fs::rename(&active, &disabled) {
        Ok(()) => {
            tracing::info!(from = %active.display(), to = %disabled.display(), "renamed bundled runtime");
            RuntimeOutcome::Renamed
        }
        Err(e) => {
            tracing::warn!(dir = %active.display(), error = %e, "failed to rename bundled runtime");
            RuntimeOutcome::RenameFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Layout, locate};
    use std::fs;
    use tempfile::TempDir;

    fn install(temp: &TempDir) -> InstallationRoot {
        fs::write(temp.path().join("dbeaver"), b"").unwrap();
        locate(temp.path().to_str().unwrap(), Layout::Linux).unwrap()
    }

    #[test]
    fn test_rename_then_already_disabled() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("jre/bin")).unwrap();
        let root = install(&temp);

        assert_eq!(disable_bundled_runtime(&root), RuntimeOutcome::Renamed);
        assert!(temp.path().join("jr/bin").is_dir());
        assert!(!temp.path().join("jre").exists());

        assert_eq!(disable_bundled_runtime(&root), RuntimeOutcome::AlreadyDisabled);
    }

    #[test]
    fn test_absent_runtime() {
        let temp = TempDir::new().unwrap();
        let root = install(&temp);
        assert_eq!(disable_bundled_runtime(&root), RuntimeOutcome::Absent);
    }

    #[test]
    fn test_both_present_left_alone() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("jre")).unwrap();
        fs::create_dir_all(temp.path().join("jr")).unwrap();
        let root = install(&temp);

        assert_eq!(disable_bundled_runtime(&root), RuntimeOutcome::AlreadyDisabled);
        assert!(temp.path().join("jre").is_dir());
    }
}
