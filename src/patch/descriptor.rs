//! `pom.xml` version and system dependency substitution
//!
//! Two shapes are edited. The project version:
//!
//! ```xml
//! <artifactId>dbeaver-agent</artifactId>
//! <version>25.1.0</version>
//! ```
//!
//! and every system-scoped dependency on a copied jar:
//!
//! ```xml
//! <dependency>
//!     <groupId>com.dbeaver</groupId>
//!     <artifactId>api</artifactId>
//!     <version>3.0.8</version>
//!     <scope>system</scope>
//!     <systemPath>${project.basedir}/libs/com.dbeaver.lm.api_3.0.8.202504011200.jar</systemPath>
//! </dependency>
//! ```
//!
//! Only the version text and the file segment of the path are replaced.

use std::path::Path;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::artifact::ArtifactDescriptor;
use crate::common::fs::{read_text, write_atomic};
use crate::error::{Result, RiggerError};
use crate::metadata::Version;

use super::Substitution;

/// Anchors identifying the blocks owned by this patcher
#[derive(Debug, Clone)]
pub struct DescriptorOptions {
    /// `artifactId` of the project whose own version is rewritten
    pub project_artifact_id: String,
    /// Directory part of `systemPath`, kept verbatim
    pub system_path_prefix: String,
}

impl Default for DescriptorOptions {
    fn default() -> Self {
        Self {
            project_artifact_id: "dbeaver-agent".to_string(),
            system_path_prefix: "${project.basedir}/libs/".to_string(),
        }
    }
}

/// Outcome of patching one build descriptor
#[derive(Debug, Clone, Default, Serialize)]
pub struct DescriptorReport {
    /// Every located value, changed or not
    pub substitutions: Vec<Substitution>,
    /// Blocks that were not found and left alone
    pub skipped: Vec<String>,
    /// Whether the file was rewritten
    pub written: bool,
}

impl DescriptorReport {
    pub fn changes(&self) -> impl Iterator<Item = &Substitution> {
        self.substitutions.iter().filter(|s| s.is_change())
    }
}

/// Rewrite the project version and dependency blocks of `path`
pub fn patch_build_descriptor(
    path: &Path,
    version: &Version,
    artifacts: &[ArtifactDescriptor],
    options: &DescriptorOptions,
) -> Result<DescriptorReport> {
    let original = read_text(path)?;
    let (patched, mut report) = apply(&original, &version.to_string(), artifacts, options)?;

    if patched != original {
        write_atomic(path, &patched)?;
        report.written = true;
    }

    for s in report.changes() {
        tracing::info!(target_field = %s.target, old = %s.old, new = %s.new, "updated build descriptor");
    }
    Ok(report)
}

/// Apply every pass to `content` without touching the file system
pub fn apply(
    content: &str,
    version: &str,
    artifacts: &[ArtifactDescriptor],
    options: &DescriptorOptions,
) -> Result<(String, DescriptorReport)> {
    let mut report = DescriptorReport::default();

    let mut text = match substitute_project_version(content, &options.project_artifact_id, version)? {
        Some((text, substitution)) => {
            report.substitutions.push(substitution);
            text
        }
        None => {
            tracing::info!(
                artifact_id = %options.project_artifact_id,
                "project version block not found, skipping"
            );
            report.skipped.push(format!("{} version", options.project_artifact_id));
            content.to_string()
        }
    };

    for artifact in artifacts {
        match substitute_dependency(&text, artifact, &options.system_path_prefix)? {
            Some((next, substitutions)) => {
                report.substitutions.extend(substitutions);
                text = next;
            }
            None => {
                tracing::info!(
                    key = %artifact.artifact_key,
                    "dependency block not found, skipping"
                );
                report.skipped.push(format!("{} dependency", artifact.artifact_key));
            }
        }
    }

    Ok((text, report))
}

/// Replace the `<version>` following the project's own `<artifactId>`.
/// Only the first occurrence is touched.
pub fn substitute_project_version(
    content: &str,
    artifact_id: &str,
    version: &str,
) -> Result<Option<(String, Substitution)>> {
    let pattern = format!(
        r"(<artifactId>{}</artifactId>\s*\n\s*<version>)([^<]+)(</version>)",
        regex::escape(artifact_id)
    );
    let regex = compile(&pattern)?;

    let Some(caps) = regex.captures(content) else {
        return Ok(None);
    };
    let Some(old) = caps.get(2) else {
        return Ok(None);
    };

    let mut text = String::with_capacity(content.len() + version.len());
    text.push_str(&content[..old.start()]);
    text.push_str(version);
    text.push_str(&content[old.end()..]);

    let substitution = Substitution::new(format!("{artifact_id} version"), old.as_str(), version);
    Ok(Some((text, substitution)))
}

/// Replace version and jar file name of the dependency on `artifact`
pub fn substitute_dependency(
    content: &str,
    artifact: &ArtifactDescriptor,
    system_path_prefix: &str,
) -> Result<Option<(String, Vec<Substitution>)>> {
    let pattern = format!(
        concat!(
            r"(<dependency>\s*\n",
            r"\s*<groupId>[^<]+</groupId>\s*\n",
            r"\s*<artifactId>{key}</artifactId>\s*\n",
            r"\s*<version>)([^<]+)(</version>\s*\n",
            r"\s*<scope>system</scope>\s*\n",
            r"\s*<systemPath>{prefix})([^<]+)(</systemPath>\s*\n",
            r"\s*</dependency>)"
        ),
        key = regex::escape(&artifact.artifact_key),
        prefix = regex::escape(system_path_prefix),
    );
    let regex = compile(&pattern)?;

    let Some(first) = regex.captures(content) else {
        return Ok(None);
    };

    let key = &artifact.artifact_key;
    let substitutions = vec![
        Substitution::new(format!("{key} version"), &first[2], &artifact.normalized_version),
        Substitution::new(format!("{key} path"), &first[4], &artifact.file_name),
    ];

    let text = regex
        .replace_all(content, |caps: &Captures<'_>| {
            format!(
                "{}{}{}{}{}",
                &caps[1], artifact.normalized_version, &caps[3], artifact.file_name, &caps[5]
            )
        })
        .into_owned();

    Ok(Some((text, substitutions)))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| RiggerError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>

    <groupId>com.dbeaver</groupId>
    <artifactId>dbeaver-agent</artifactId>
    <version>25.1.0</version>

    <dependencies>
        <dependency>
            <groupId>net.bytebuddy</groupId>
            <artifactId>byte-buddy</artifactId>
            <version>1.17.5</version>
        </dependency>
        <dependency>
            <groupId>com.dbeaver</groupId>
            <artifactId>api</artifactId>
            <version>3.0.8</version>
            <scope>system</scope>
            <systemPath>${project.basedir}/libs/com.dbeaver.lm.api_3.0.8.202504011200.jar</systemPath>
        </dependency>
        <dependency>
            <groupId>org.jkiss</groupId>
            <artifactId>utils</artifactId>
            <version>2.4.0</version>
            <scope>system</scope>
            <systemPath>${project.basedir}/libs/org.jkiss.utils_2.4.0.202504011200.jar</systemPath>
        </dependency>
    </dependencies>
</project>
"#;

    fn artifact(key: &str, version: &str, file: &str) -> ArtifactDescriptor {
        ArtifactDescriptor {
            artifact_key: key.to_string(),
            normalized_version: version.to_string(),
            file_name: file.to_string(),
        }
    }

    fn artifacts() -> Vec<ArtifactDescriptor> {
        vec![
            artifact("api", "3.0.9", "com.dbeaver.lm.api_3.0.9.202506090822.jar"),
            artifact("utils", "2.5.1", "org.jkiss.utils_2.5.1.202506090822.jar"),
        ]
    }

    #[test]
    fn test_project_version_replaced() {
        let (text, sub) = substitute_project_version(POM, "dbeaver-agent", "25.2.0")
            .unwrap()
            .unwrap();
        assert!(text.contains("<artifactId>dbeaver-agent</artifactId>\n    <version>25.2.0</version>"));
        // Dependency versions untouched
        assert!(text.contains("<version>1.17.5</version>"));
        assert_eq!(sub.old, "25.1.0");
        assert_eq!(sub.new, "25.2.0");
    }

    #[test]
    fn test_project_version_first_match_only() {
        let twice = "<artifactId>a</artifactId>\n<version>1</version>\n<artifactId>a</artifactId>\n<version>1</version>\n";
        let (text, _) = substitute_project_version(twice, "a", "2").unwrap().unwrap();
        assert_eq!(
            text,
            "<artifactId>a</artifactId>\n<version>2</version>\n<artifactId>a</artifactId>\n<version>1</version>\n"
        );
    }

    #[test]
    fn test_project_version_missing_anchor() {
        assert!(
            substitute_project_version(POM, "other-agent", "1.0.0")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_dependency_replaced_in_place() {
        let api = &artifacts()[0];
        let (text, subs) = substitute_dependency(POM, api, "${project.basedir}/libs/")
            .unwrap()
            .unwrap();

        let expected = POM
            .replace(
                "<version>3.0.8</version>",
                "<version>3.0.9</version>",
            )
            .replace(
                "com.dbeaver.lm.api_3.0.8.202504011200.jar",
                "com.dbeaver.lm.api_3.0.9.202506090822.jar",
            );
        assert_eq!(text, expected);
        assert_eq!(subs[0].old, "3.0.8");
        assert_eq!(subs[1].old, "com.dbeaver.lm.api_3.0.8.202504011200.jar");
    }

    #[test]
    fn test_dependency_without_system_scope_untouched() {
        let byte_buddy = artifact("byte-buddy", "9.9.9", "byte-buddy.jar");
        assert!(
            substitute_dependency(POM, &byte_buddy, "${project.basedir}/libs/")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let odd = artifact("api", "$1", "weird_${x}.jar");
        let (text, _) = substitute_dependency(POM, &odd, "${project.basedir}/libs/")
            .unwrap()
            .unwrap();
        assert!(text.contains("<version>$1</version>"));
        assert!(text.contains("${project.basedir}/libs/weird_${x}.jar</systemPath>"));
    }

    #[test]
    fn test_apply_reports_skips() {
        let extra = vec![artifact("missing", "1.0.0", "missing_1.0.0.jar")];
        let (text, report) =
            apply(POM, "25.2.0", &extra, &DescriptorOptions::default()).unwrap();
        assert!(text.contains("<version>25.2.0</version>"));
        assert_eq!(report.skipped, vec!["missing dependency".to_string()]);
        assert_eq!(report.changes().count(), 1);
    }

    #[test]
    fn test_apply_crlf_content() {
        let crlf = POM.replace('\n', "\r\n");
        let (text, report) =
            apply(&crlf, "25.2.0", &artifacts(), &DescriptorOptions::default()).unwrap();
        assert!(report.skipped.is_empty());
        assert!(text.contains("<version>25.2.0</version>\r\n"));
        assert!(text.contains("org.jkiss.utils_2.5.1.202506090822.jar</systemPath>\r\n"));
    }

    #[test]
    fn test_patch_converges() {
        let temp = TempDir::new().unwrap();
        let pom = temp.path().join("pom.xml");
        std::fs::write(&pom, POM).unwrap();
        let version = Version::new(25, 2, 0);
        let options = DescriptorOptions::default();

        let first = patch_build_descriptor(&pom, &version, &artifacts(), &options).unwrap();
        assert!(first.written);
        assert_eq!(first.changes().count(), 5);
        let after_first = std::fs::read_to_string(&pom).unwrap();

        let second = patch_build_descriptor(&pom, &version, &artifacts(), &options).unwrap();
        assert!(!second.written);
        assert_eq!(second.changes().count(), 0);
        assert_eq!(std::fs::read_to_string(&pom).unwrap(), after_first);
    }

    #[test]
    fn test_patch_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = patch_build_descriptor(
            &temp.path().join("pom.xml"),
            &Version::new(1, 0, 0),
            &[],
            &DescriptorOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RiggerError::FileMissing { .. }));
    }
}
