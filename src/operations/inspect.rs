//! Read-only look at an installation

use serde::Serialize;

use crate::artifact::{self, ArtifactDescriptor, ArtifactRule};
use crate::error::Result;
use crate::metadata::{self, Edition, ProductIdentity};
use crate::patch::startup;
use crate::platform::{self, InstallationRoot, Layout, Location};

/// What an installation looks like, without changing anything
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub root: InstallationRoot,
    pub identity: ProductIdentity,
    pub edition: Option<Edition>,
    /// Dependency jars the configured rules would copy
    pub artifacts: Vec<ArtifactDescriptor>,
    /// Agent lines already present after `-vmargs` in the startup file
    pub agents: Vec<String>,
    /// Whether the bundled runtime is still active
    pub bundled_runtime: bool,
}

pub struct InspectOperation<'a> {
    rules: &'a [ArtifactRule],
}

impl<'a> InspectOperation<'a> {
    pub fn new(rules: &'a [ArtifactRule]) -> Self {
        Self { rules }
    }

    pub fn execute(&self, raw_path: &str, layout: Layout) -> Result<InspectReport> {
        let root = platform::locate(raw_path, layout)?;
        let identity = metadata::extract(&root.resolve(Location::ProductDescriptor))?;
        let edition = identity.edition();

        let artifacts = artifact::find_matches(&root.resolve(Location::PluginsDir), self.rules)?
            .into_iter()
            .map(|(descriptor, _)| descriptor)
            .collect();

        let startup_file = root.resolve(Location::StartupConfig);
        let agents = match std::fs::read_to_string(&startup_file) {
            Ok(content) => agent_lines(&content),
            Err(e) => {
                tracing::debug!(path = %startup_file.display(), error = %e, "startup file unreadable");
                Vec::new()
            }
        };

        Ok(InspectReport {
            bundled_runtime: root.resolve(Location::RuntimeDir).is_dir(),
            root,
            identity,
            edition,
            artifacts,
            agents,
        })
    }
}

fn agent_lines(content: &str) -> Vec<String> {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let Some(sentinel) = startup::find_sentinel(&lines) else {
        return Vec::new();
    };
    lines[sentinel + 1..]
        .iter()
        .filter(|line| line.trim().starts_with(startup::AGENT_PREFIX))
        .map(|line| line.trim().to_string())
        .collect()
}
