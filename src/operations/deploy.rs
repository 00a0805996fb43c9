//! The deploy pipeline
//!
//! Steps run strictly in order and the first failure aborts the run; files
//! already written by earlier steps stay as they are. Re-running against the
//! same or an upgraded installation converges instead of piling up edits.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::artifact::{self, ArtifactDescriptor};
use crate::common::fs::replace_file;
use crate::config::DeployConfig;
use crate::error::{Result, fs as fs_error};
use crate::metadata::{self, Edition, ProductIdentity};
use crate::patch::{self, DescriptorReport, StartupPatch, StartupReport};
use crate::platform::{self, InstallationRoot, Layout, Location};
use crate::progress::StepProgress;
use crate::runtime::{self, RuntimeOutcome};
use crate::toolchain::{self, BuildTool};

/// Build descriptor file name inside the project root
pub const BUILD_DESCRIPTOR: &str = "pom.xml";

/// Number of progress steps reported by [`DeployOperation::run`]
pub const STEP_COUNT: usize = 8;

/// Inputs of one deploy run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Path naming the installation, as typed by the user
    pub install_path: String,
    /// Installation layout to assume
    pub layout: Layout,
    /// Agent project root holding `pom.xml`
    pub project_root: PathBuf,
    pub config: DeployConfig,
    /// Reuse an existing build output instead of invoking the build tool
    pub skip_build: bool,
}

/// Everything a deploy run found and changed
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub root: InstallationRoot,
    pub identity: ProductIdentity,
    pub edition: Option<Edition>,
    pub artifacts: Vec<ArtifactDescriptor>,
    pub descriptor: DescriptorReport,
    /// Where the agent jar was installed, if a build output was available
    pub agent: Option<PathBuf>,
    pub startup: StartupReport,
    pub runtime: RuntimeOutcome,
}

/// Drives one deploy run
pub struct DeployOperation<'a> {
    options: &'a DeployOptions,
    builder: &'a dyn BuildTool,
    progress: &'a StepProgress,
}

impl<'a> DeployOperation<'a> {
    pub fn new(
        options: &'a DeployOptions,
        builder: &'a dyn BuildTool,
        progress: &'a StepProgress,
    ) -> Self {
        Self {
            options,
            builder,
            progress,
        }
    }

    /// Run every step, returning the aggregate report
    pub fn run(&self) -> Result<DeployReport> {
        let result = self.run_steps();
        match &result {
            Ok(_) => self.progress.finish(),
            Err(_) => self.progress.abandon(),
        }
        result
    }

    fn run_steps(&self) -> Result<DeployReport> {
        let options = self.options;
        let config = &options.config;
        let progress = self.progress;

        let pom = options.project_root.join(BUILD_DESCRIPTOR);
        if !pom.is_file() {
            return Err(fs_error::missing(&pom));
        }
        let rules = config.artifact_rules()?;

        progress.begin(&format!("Locating installation: {}", options.install_path));
        let root = platform::locate(&options.install_path, options.layout)?;
        progress.done(format!("Installation: {}", root.path().display()));

        progress.begin("Reading product metadata");
        let identity = metadata::extract(&root.resolve(Location::ProductDescriptor))?;
        let edition = identity.edition();
        if edition.is_none() {
            tracing::warn!(
                product_id = %identity.product_id,
                known = %Edition::KNOWN_IDS.join(", "),
                "unrecognised product id"
            );
        }
        progress.done(format!(
            "Version {} ({})",
            identity.version, identity.product_id
        ));

        progress.begin("Copying dependency jars");
        let artifacts = artifact::match_and_copy(
            &root.resolve(Location::PluginsDir),
            &options.project_root.join(&config.libs_dir),
            &rules,
        )?;
        if artifacts.len() < rules.len() {
            progress.warn(format!(
                "Copied {} of {} dependency jars",
                artifacts.len(),
                rules.len()
            ));
        } else {
            progress.done(format!("Copied {} dependency jars", artifacts.len()));
        }

        progress.begin("Updating pom.xml");
        let descriptor = patch::patch_build_descriptor(
            &pom,
            &identity.version,
            &artifacts,
            &config.descriptor_options(),
        )?;
        progress.done(describe_descriptor(&descriptor));

        progress.begin("Building agent");
        let built = self.build()?;

        progress.begin("Deploying agent");
        let agent = match built {
            Some(jar) => {
                let target = deploy_agent(&root, &jar, &config.agent_jar_name)?;
                progress.done(format!("Agent: {}", target.display()));
                Some(target)
            }
            None => {
                progress.skip("No build output to deploy");
                None
            }
        };

        progress.begin("Updating startup configuration");
        let startup = patch::patch_startup_config(
            &root.resolve(Location::StartupConfig),
            &StartupPatch {
                agent_reference: root.layout().agent_reference(&config.agent_jar_name),
                extra_flags: config.extra_flags.clone(),
                drop_vm_override: root.layout().drops_bundled_vm(),
            },
        )?;
        progress.done(describe_startup(&startup));

        progress.begin("Disabling bundled runtime");
        let runtime = runtime::disable_bundled_runtime(&root);
        match runtime {
            RuntimeOutcome::RenameFailed(_) => progress.warn(runtime.to_string()),
            _ => progress.done(runtime.to_string()),
        }

        Ok(DeployReport {
            root,
            identity,
            edition,
            artifacts,
            descriptor,
            agent,
            startup,
            runtime,
        })
    }

    /// Build the agent, or with `skip_build` pick up an earlier build output
    fn build(&self) -> Result<Option<PathBuf>> {
        let options = self.options;

        if !options.skip_build {
            let jar = self.builder.build(&options.project_root)?;
            self.progress.done(format!("Built {}", display_name(&jar)));
            return Ok(Some(jar));
        }

        let target = options.project_root.join("target");
        match toolchain::find_output(&target, &options.config.build_output_glob) {
            Ok(jar) => {
                self.progress
                    .skip(format!("Build skipped, reusing {}", display_name(&jar)));
                Ok(Some(jar))
            }
            Err(e) => {
                tracing::warn!(error = %e, "build skipped and no previous output found");
                self.progress.skip("Build skipped");
                Ok(None)
            }
        }
    }
}

/// Install the packaged agent into the installation's plugins directory
pub fn deploy_agent(root: &InstallationRoot, jar: &Path, jar_name: &str) -> Result<PathBuf> {
    let plugins = root.resolve(Location::PluginsDir);
    if !plugins.is_dir() {
        return Err(fs_error::missing(&plugins));
    }
    let target = plugins.join(jar_name);
    replace_file(jar, &target)?;
    tracing::info!(from = %jar.display(), to = %target.display(), "deployed agent");
    Ok(target)
}

fn describe_descriptor(report: &DescriptorReport) -> String {
    let changed = report.changes().count();
    if changed == 0 {
        "pom.xml already up to date".to_string()
    } else {
        format!("pom.xml: {changed} value(s) updated")
    }
}

fn describe_startup(report: &StartupReport) -> String {
    if report.written {
        format!(
            "dbeaver.ini: {} line(s) added, {} removed",
            report.inserted.len(),
            report.removed.len()
        )
    } else {
        "dbeaver.ini already up to date".to_string()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
