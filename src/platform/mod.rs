//! Installation layouts for the supported operating system families
//!
//! Every path inside an installation is computed here from the root, so the
//! rest of the crate never branches on the operating system itself.

pub mod locate;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

pub use locate::{InstallationRoot, locate};

/// Directory holding everything on macOS, relative to the `.app` bundle
const BUNDLE_CONTENT: [&str; 2] = ["Contents", "Eclipse"];

/// Logical locations inside an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The launcher binary
    Executable,
    /// `.eclipseproduct`, carrying version and product id
    ProductDescriptor,
    /// `plugins/`, source of the dependency jars and home of the agent
    PluginsDir,
    /// Bundled Java runtime
    RuntimeDir,
    /// Where the bundled runtime is moved to so the system one is used
    DisabledRuntimeDir,
    /// `dbeaver.ini`, one launcher argument per line
    StartupConfig,
}

/// On-disk layout of an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Flat directory with `dbeaver.exe`
    Windows,
    /// `.app` bundle with everything under `Contents/Eclipse`
    #[value(name = "macos")]
    MacOs,
    /// Flat directory with a `dbeaver` binary
    Linux,
}

impl Layout {
    /// Layout of the host this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Layout::Windows
        } else if cfg!(target_os = "macos") {
            Layout::MacOs
        } else {
            Layout::Linux
        }
    }

    /// Whether installations are `.app` bundles rather than flat directories
    pub fn is_bundle(self) -> bool {
        self == Layout::MacOs
    }

    /// File name of the launcher in a flat layout
    pub fn executable_name(self) -> &'static str {
        match self {
            Layout::Windows => "dbeaver.exe",
            Layout::MacOs | Layout::Linux => "dbeaver",
        }
    }

    /// Resolve a logical location against an installation root.
    ///
    /// Pure path arithmetic; existence is the caller's concern.
    pub fn resolve(self, root: &Path, location: Location) -> PathBuf {
        if self.is_bundle() && location == Location::Executable {
            return root.join("Contents").join("MacOS").join("dbeaver");
        }

        let base = self.content_dir(root);
        match location {
            Location::Executable => base.join(self.executable_name()),
            Location::ProductDescriptor => base.join(".eclipseproduct"),
            Location::PluginsDir => base.join("plugins"),
            Location::RuntimeDir => base.join("jre"),
            Location::DisabledRuntimeDir => base.join("jr"),
            Location::StartupConfig => base.join("dbeaver.ini"),
        }
    }

    /// Agent path as written in the startup file, relative to the launcher
    pub fn agent_reference(self, jar_name: &str) -> String {
        if self.is_bundle() {
            format!("../Eclipse/plugins/{jar_name}")
        } else {
            format!("plugins/{jar_name}")
        }
    }

    /// Whether the startup file's `-vm <path>` pair must be dropped so the
    /// launcher falls back to the system runtime
    pub fn drops_bundled_vm(self) -> bool {
        self.is_bundle()
    }

    fn content_dir(self, root: &Path) -> PathBuf {
        if self.is_bundle() {
            BUNDLE_CONTENT.iter().fold(root.to_path_buf(), |p, c| p.join(c))
        } else {
            root.to_path_buf()
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Windows => "windows",
            Layout::MacOs => "macos",
            Layout::Linux => "linux",
        };
        f.write_str(name)
    }
}
