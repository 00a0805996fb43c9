//! Discovering version-qualified dependency jars in an installation
//!
//! Plugin jars carry a long Eclipse qualifier in their file name, e.g.
//! `com.dbeaver.lm.api_3.0.9.202506090822.jar`. A rule captures the qualifier
//! and the leading `major.minor.patch` becomes the Maven version.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::common::fs::replace_file;
use crate::error::{Result, RiggerError, fs as fs_error};

#[allow(clippy::expect_used)]
static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+\.\d+)").expect("valid version prefix regex"));

/// Maps file names matching `pattern` to the Maven `artifactId` `key`
#[derive(Debug, Clone)]
pub struct ArtifactRule {
    pattern: Regex,
    key: String,
}

impl ArtifactRule {
    /// Compile a rule. The pattern must match the whole file name and have
    /// exactly one capture group holding the qualifier.
    pub fn new(pattern: &str, key: impl Into<String>) -> Result<Self> {
        let anchored = format!("^(?:{pattern})$");
        let invalid = |reason: String| RiggerError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let regex = Regex::new(&anchored).map_err(|e| invalid(e.to_string()))?;
        if regex.captures_len() != 2 {
            return Err(invalid(format!(
                "expected one capture group, found {}",
                regex.captures_len() - 1
            )));
        }

        Ok(Self {
            pattern: regex,
            key: key.into(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Match a file name, producing its descriptor
    pub fn apply(&self, file_name: &str) -> Option<ArtifactDescriptor> {
        let qualifier = self.pattern.captures(file_name)?.get(1)?.as_str();
        Some(ArtifactDescriptor {
            artifact_key: self.key.clone(),
            normalized_version: normalize_qualifier(qualifier).to_string(),
            file_name: file_name.to_string(),
        })
    }
}

/// One matched artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDescriptor {
    pub artifact_key: String,
    pub normalized_version: String,
    pub file_name: String,
}

/// Leading `major.minor.patch` of a qualifier, or the whole qualifier
pub fn normalize_qualifier(qualifier: &str) -> &str {
    VERSION_PREFIX
        .captures(qualifier)
        .and_then(|c| c.get(1))
        .map_or(qualifier, |m| m.as_str())
}

/// Find the first matching file for every rule in `source_dir`.
///
/// Files are visited in file name order so repeated runs pick the same jar.
pub fn find_matches(
    source_dir: &Path,
    rules: &[ArtifactRule],
) -> Result<Vec<(ArtifactDescriptor, PathBuf)>> {
    if !source_dir.is_dir() {
        return Err(fs_error::missing(source_dir));
    }

    let files: Vec<(String, PathBuf)> = WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.file_name().to_string_lossy().into_owned(), e.into_path()))
        .collect();

    let mut found = Vec::new();
    for rule in rules {
        match files
            .iter()
            .find_map(|(name, path)| rule.apply(name).map(|d| (d, path.clone())))
        {
            Some(hit) => found.push(hit),
            None => tracing::warn!(
                key = rule.key(),
                pattern = rule.pattern.as_str(),
                dir = %source_dir.display(),
                "no matching artifact"
            ),
        }
    }
    Ok(found)
}

/// Copy every matched artifact from `source_dir` into `dest_dir`
pub fn match_and_copy(
    source_dir: &Path,
    dest_dir: &Path,
    rules: &[ArtifactRule],
) -> Result<Vec<ArtifactDescriptor>> {
    let matches = find_matches(source_dir, rules)?;

    let mut descriptors = Vec::with_capacity(matches.len());
    for (descriptor, source) in matches {
        let target = dest_dir.join(&descriptor.file_name);
        replace_file(&source, &target)?;
        tracing::info!(
            key = %descriptor.artifact_key,
            version = %descriptor.normalized_version,
            file = %descriptor.file_name,
            "copied artifact"
        );
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}
