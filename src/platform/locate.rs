//! Resolving a user-supplied path into an installation root
//!
//! Accepts the installation directory itself, the launcher binary, a `.app`
//! bundle, any path inside a bundle, or a directory holding a bundle.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Result, RiggerError};

use super::{Layout, Location};

/// Name prefix of bundles searched for inside a plain directory
const BUNDLE_PREFIX: &str = "DBeaver";
const BUNDLE_EXTENSION: &str = "app";

/// A validated, absolute installation root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationRoot {
    path: PathBuf,
    layout: Layout,
}

impl InstallationRoot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Resolve a logical location inside this installation
    pub fn resolve(&self, location: Location) -> PathBuf {
        self.layout.resolve(&self.path, location)
    }
}

/// Strip whitespace, surrounding quotes and trailing separators
pub fn normalize_input(raw: &str) -> PathBuf {
    let unquoted = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    let stripped = unquoted.trim_end_matches(['/', '\\']);

    // "/" and "C:\" must survive as roots
    if stripped.is_empty() || stripped.ends_with(':') {
        PathBuf::from(unquoted)
    } else {
        PathBuf::from(stripped)
    }
}

/// Locate the installation root for `raw` under `layout`
pub fn locate(raw: &str, layout: Layout) -> Result<InstallationRoot> {
    let input = normalize_input(raw);

    if input.as_os_str().is_empty() || !input.exists() {
        return Err(not_found(&input));
    }

    let path = dunce::canonicalize(&input).map_err(|_| not_found(&input))?;

    let root = if layout.is_bundle() {
        locate_bundle(&path)?
    } else {
        locate_flat(&path, layout)?
    };

    tracing::debug!(root = %root.display(), %layout, "located installation");
    Ok(InstallationRoot { path: root, layout })
}

fn locate_bundle(path: &Path) -> Result<PathBuf> {
    if let Some(bundle) = path.ancestors().find(|p| is_bundle_dir(p)) {
        return Ok(bundle.to_path_buf());
    }

    if path.is_dir() {
        let child = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .map(walkdir::DirEntry::into_path)
            .find(|p| is_bundle_dir(p) && has_bundle_prefix(p));

        if let Some(bundle) = child {
            return Ok(bundle);
        }
    }

    Err(RiggerError::NotAnInstallation {
        path: path.display().to_string(),
        reason: format!("no {BUNDLE_PREFIX}*.{BUNDLE_EXTENSION} bundle found"),
    })
}

fn locate_flat(path: &Path, layout: Layout) -> Result<PathBuf> {
    let executable = layout.executable_name();

    if path.is_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let accepted = match layout {
            Layout::Windows => name == executable,
            _ => name.contains(executable),
        };

        return match path.parent() {
            Some(parent) if accepted => Ok(parent.to_path_buf()),
            _ => Err(RiggerError::NotAnInstallation {
                path: path.display().to_string(),
                reason: format!("not the {executable} executable"),
            }),
        };
    }

    if path.is_dir() {
        if layout.resolve(path, Location::Executable).exists() {
            return Ok(path.to_path_buf());
        }
        return Err(RiggerError::NotFound {
            path: path.join(executable).display().to_string(),
        });
    }

    Err(RiggerError::NotAnInstallation {
        path: path.display().to_string(),
        reason: "neither a file nor a directory".to_string(),
    })
}

fn is_bundle_dir(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION) && path.is_dir()
}

fn has_bundle_prefix(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with(BUNDLE_PREFIX))
}

fn not_found(path: &Path) -> RiggerError {
    RiggerError::NotFound {
        path: path.display().to_string(),
    }
}
