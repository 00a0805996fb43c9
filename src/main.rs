//! Rigger - wires a Java agent project into an existing DBeaver installation
//!
//! Locates the installation, reads its product metadata, copies the library
//! jars the agent compiles against, rewrites `pom.xml` to match them, builds
//! and deploys the agent, then converges `dbeaver.ini`. Every step can be
//! repeated safely, including after the application was upgraded.

use clap::Parser;

mod artifact;
mod cli;
mod commands;
mod common;
mod config;
mod error;
mod logging;
mod metadata;
mod operations;
mod patch;
mod platform;
mod progress;
mod runtime;
mod toolchain;
mod ui;

use cli::{Cli, Commands};
use commands::helpers::GlobalOptions;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let globals = GlobalOptions::from_cli(&cli);
    let result = match cli.command {
        Commands::Deploy(args) => commands::deploy::run(globals, args),
        Commands::Inspect(args) => commands::inspect::run(globals, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
