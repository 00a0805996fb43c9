//! CLI definitions using clap derive API
//!
//! Argument types per command live in submodules:
//! - deploy: Deploy command arguments
//! - inspect: Inspect command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::platform::Layout;

pub mod completions;
pub mod deploy;
pub mod inspect;

pub use completions::CompletionsArgs;
pub use deploy::DeployArgs;
pub use inspect::InspectArgs;

/// Rigger - installation patching for the DBeaver agent
///
/// Converges an installation's startup configuration and the agent project's
/// build descriptor with whatever version is installed.
#[derive(Parser, Debug)]
#[command(
    name = "rigger",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Wire an agent project into an existing DBeaver installation",
    long_about = "Rigger finds a DBeaver installation, reads its version, copies the library jars \
                  the agent compiles against, aligns pom.xml with them, builds and deploys the agent, \
                  and adds it to dbeaver.ini. Every step is safe to repeat.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  rigger deploy /opt/dbeaver                 \x1b[90m# Patch a Linux install\x1b[0m\n   \
                  rigger deploy /Applications/DBeaver.app    \x1b[90m# Patch a macOS bundle\x1b[0m\n   \
                  rigger deploy /opt/dbeaver --skip-build    \x1b[90m# Reuse the last build\x1b[0m\n   \
                  rigger inspect /opt/dbeaver                \x1b[90m# Show what is installed\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Agent project directory holding pom.xml (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "RIGGER_PROJECT")]
    pub project: Option<PathBuf>,

    /// Installation layout (defaults to the host platform)
    #[arg(long, global = true, value_enum)]
    pub layout: Option<Layout>,

    /// Configuration file (overrides RIGGER_CONFIG and <project>/rigger.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Patch an installation and deploy the agent
    Deploy(DeployArgs),

    /// Show installation details without changing anything
    Inspect(InspectArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
