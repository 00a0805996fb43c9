//! Packaging the agent project with an external build tool

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::common::process;
use crate::error::{Result, RiggerError};
use crate::platform::Layout;

/// Bound on `mvn -version` while probing aliases
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Produces the packaged agent from a project root
pub trait BuildTool {
    /// Build `project_root` and return the packaged artifact
    fn build(&self, project_root: &Path) -> Result<PathBuf>;
}

/// Apache Maven, discovered on `PATH`
#[derive(Debug, Clone)]
pub struct Maven {
    aliases: Vec<String>,
    output_glob: String,
}

impl Maven {
    /// Maven with the host's command aliases
    pub fn new(output_glob: impl Into<String>) -> Self {
        let aliases = if cfg!(windows) {
            vec!["mvn.cmd", "mvn.bat", "mvn"]
        } else {
            vec!["mvn"]
        };
        Self::with_aliases(aliases.into_iter().map(String::from).collect(), output_glob)
    }

    pub fn with_aliases(aliases: Vec<String>, output_glob: impl Into<String>) -> Self {
        Self {
            aliases,
            output_glob: output_glob.into(),
        }
    }

    /// First alias that answers `-version` successfully
    pub fn discover(&self) -> Result<String> {
        for alias in &self.aliases {
            let mut cmd = Command::new(alias);
            cmd.arg("-version");
            match process::run(&mut cmd, Some(PROBE_TIMEOUT)) {
                Ok(Ok(output)) if output.success() => {
                    let banner = output.stdout.lines().next().unwrap_or_default();
                    tracing::debug!(%alias, %banner, "found build tool");
                    return Ok(alias.clone());
                }
                Ok(Ok(output)) => {
                    tracing::debug!(%alias, status = %output.status, "build tool probe failed");
                }
                Ok(Err(e)) => tracing::warn!(%alias, error = %e, "build tool probe timed out"),
                Err(e) => tracing::debug!(%alias, error = %e, "build tool not runnable"),
            }
        }
        Err(RiggerError::ToolUnavailable {
            tried: self.aliases.join(", "),
            hint: install_hint(Layout::current()).to_string(),
        })
    }
}

impl BuildTool for Maven {
    fn build(&self, project_root: &Path) -> Result<PathBuf> {
        let mvn = self.discover()?;

        let mut cmd = Command::new(&mvn);
        cmd.args(["clean", "package", "-DskipTests"])
            .current_dir(project_root);
        tracing::info!(command = %process::describe(&cmd), dir = %project_root.display(), "building agent");

        let output = process::run(&mut cmd, None).map_err(|e| RiggerError::ToolUnavailable {
            tried: format!("{mvn} ({e})"),
            hint: install_hint(Layout::current()).to_string(),
        })??;

        if !output.success() {
            return Err(RiggerError::BuildFailed {
                project: project_root.display().to_string(),
                log: output.combined_log(),
            });
        }

        find_output(&project_root.join("target"), &self.output_glob)
    }
}

/// How to get Maven onto `PATH` on each host family
pub fn install_hint(layout: Layout) -> &'static str {
    match layout {
        Layout::MacOs => "Install Maven with `brew install maven`, then check `mvn -version`",
        Layout::Linux => {
            "Install Maven with your package manager (`sudo apt install maven`, \
             `sudo yum install maven` or `sudo dnf install maven`), then check `mvn -version`"
        }
        Layout::Windows => {
            "Download Maven from https://maven.apache.org/download.cgi, set MAVEN_HOME \
             and add %MAVEN_HOME%\\bin to PATH, then check `mvn -version`"
        }
    }
}

/// First file in `dir` (file name order) matching `pattern`
pub fn find_output(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let missing = || RiggerError::BuildOutputMissing {
        pattern: pattern.to_string(),
        dir: dir.display().to_string(),
    };

    let glob = Glob::new(pattern).map_err(|e| RiggerError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    if !dir.is_dir() {
        return Err(missing());
    }

    let mut hits: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            // Globs are written with forward slashes on every platform
            let normalized = relative.to_string_lossy().replace('\\', "/");
            glob.is_match(CandidatePath::from(normalized.as_str()))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    hits.sort();

    hits.into_iter().next().ok_or_else(missing)
}
