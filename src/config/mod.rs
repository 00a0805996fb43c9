//! Project configuration (`rigger.yaml`)
//!
//! Every field is optional; a missing file means the defaults below, which
//! describe the stock agent project layout. The file is looked up in order:
//! `--config <file>`, `$RIGGER_CONFIG`, then `<project>/rigger.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactRule;
use crate::error::{Result, RiggerError};
use crate::patch::DescriptorOptions;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "RIGGER_CONFIG";
/// Configuration file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "rigger.yaml";

/// Deployment settings for one agent project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// `artifactId` of the agent project in `pom.xml`
    pub project_artifact_id: String,

    /// Directory, relative to the project, receiving the copied jars
    pub libs_dir: String,

    /// Literal directory prefix of `<systemPath>` values
    pub system_path_prefix: String,

    /// File name of the agent inside the installation's plugins directory
    pub agent_jar_name: String,

    /// Glob, relative to `target/`, selecting the packaged agent
    pub build_output_glob: String,

    /// JVM flags that must follow `-vmargs`
    pub extra_flags: Vec<String>,

    /// Dependency jars to copy from the installation
    pub artifacts: Vec<ArtifactRuleConfig>,
}

/// Serialized form of an [`ArtifactRule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactRuleConfig {
    /// File name regex with one capture group for the qualifier
    pub pattern: String,
    /// Maven `artifactId` of the matching dependency block
    pub key: String,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            project_artifact_id: "dbeaver-agent".to_string(),
            libs_dir: "libs".to_string(),
            system_path_prefix: "${project.basedir}/libs/".to_string(),
            agent_jar_name: "dbeaver-agent.jar".to_string(),
            build_output_glob: "*-jar-with-dependencies.jar".to_string(),
            extra_flags: vec!["-Dlm.debug.mode=true".to_string()],
            artifacts: vec![
                ArtifactRuleConfig {
                    pattern: r"com\.dbeaver\.lm\.api_(.+)\.jar".to_string(),
                    key: "api".to_string(),
                },
                ArtifactRuleConfig {
                    pattern: r"org\.jkiss\.utils_(.+)\.jar".to_string(),
                    key: "utils".to_string(),
                },
            ],
        }
    }
}

impl DeployConfig {
    /// Parse configuration from YAML; `origin` only labels errors
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| RiggerError::ConfigParseFailed {
            path: origin.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load the configuration for `project_root`.
    ///
    /// Returns the file that was read, if any.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let (path, required) = match explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        {
            Some(path) => (path, true),
            None => (project_root.join(CONFIG_FILE_NAME), false),
        };

        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok((Self::default(), None));
        }

        let yaml = std::fs::read_to_string(&path).map_err(|e| RiggerError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml(&yaml, &path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok((config, Some(path)))
    }

    /// Compile the artifact rules
    pub fn artifact_rules(&self) -> Result<Vec<ArtifactRule>> {
        self.artifacts
            .iter()
            .map(|r| ArtifactRule::new(&r.pattern, r.key.clone()))
            .collect()
    }

    pub fn descriptor_options(&self) -> DescriptorOptions {
        DescriptorOptions {
            project_artifact_id: self.project_artifact_id.clone(),
            system_path_prefix: self.system_path_prefix.clone(),
        }
    }
}
