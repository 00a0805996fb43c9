use clap::Parser;

/// Arguments for the inspect command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show version and edition:\n    rigger inspect /opt/dbeaver\n\n\
                  Inspect a macOS bundle from another host:\n    rigger inspect ./DBeaver.app --layout macos\n\n\
                  Machine-readable output:\n    rigger inspect /opt/dbeaver --json")]
pub struct InspectArgs {
    /// Installation directory, executable or .app bundle
    pub path: String,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
