use clap::Parser;

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Patch an installation (prompts for the path when omitted):\n    rigger deploy /opt/dbeaver\n\n\
                  Use an agent project elsewhere:\n    rigger deploy /opt/dbeaver --project ~/src/dbeaver-agent\n\n\
                  Skip the Maven build and reuse target/:\n    rigger deploy /opt/dbeaver --skip-build\n\n\
                  Print the report as JSON:\n    rigger deploy /opt/dbeaver --json")]
pub struct DeployArgs {
    /// Installation directory, executable or .app bundle (if omitted, prompts for it)
    pub path: Option<String>,

    /// Do not run the build; deploy an existing build output if there is one
    #[arg(long)]
    pub skip_build: bool,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
