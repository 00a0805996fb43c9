//! Command helper utilities

use std::path::PathBuf;

use inquire::{InquireError, Text};

use crate::cli::Cli;
use crate::config::DeployConfig;
use crate::error::{Result, RiggerError};
use crate::platform::Layout;

/// Flags shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub project: Option<PathBuf>,
    pub layout: Option<Layout>,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            project: cli.project.clone(),
            layout: cli.layout,
            config: cli.config.clone(),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout.unwrap_or_else(Layout::current)
    }
}

/// Resolve project path from optional argument
///
/// If a project path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| RiggerError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}

/// Project root and the configuration that applies to it
pub fn load_project(globals: &GlobalOptions) -> Result<(PathBuf, DeployConfig)> {
    let project_root = resolve_project_path(globals.project.clone())?;
    let (config, _origin) = DeployConfig::load(&project_root, globals.config.as_deref())?;
    Ok((project_root, config))
}

/// Ask for the installation path on the terminal
pub fn prompt_install_path() -> Result<String> {
    let answer = Text::new("DBeaver installation path:")
        .with_help_message("Directory, executable, or .app bundle. Drag and drop works too.")
        .prompt();

    match answer {
        Ok(path) => non_empty_path(&path),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Err(RiggerError::NoPathProvided)
        }
        Err(e) => Err(e.into()),
    }
}

fn non_empty_path(answer: &str) -> Result<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        Err(RiggerError::NoPathProvided)
    } else {
        Ok(trimmed.to_string())
    }
}
