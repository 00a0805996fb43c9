//! Deploy command implementation

use crate::cli::DeployArgs;
use crate::commands::helpers::{self, GlobalOptions};
use crate::error::Result;
use crate::operations::deploy::STEP_COUNT;
use crate::operations::{DeployOperation, DeployOptions};
use crate::progress::StepProgress;
use crate::toolchain::Maven;
use crate::ui;

pub fn run(globals: GlobalOptions, args: DeployArgs) -> Result<()> {
    let (project_root, config) = helpers::load_project(&globals)?;

    let install_path = match args.path {
        Some(path) => path,
        None => helpers::prompt_install_path()?,
    };

    let options = DeployOptions {
        install_path,
        layout: globals.layout(),
        project_root,
        config,
        skip_build: args.skip_build,
    };

    let maven = Maven::new(options.config.build_output_glob.clone());
    let progress = if args.json {
        StepProgress::hidden(STEP_COUNT)
    } else {
        StepProgress::new(STEP_COUNT)
    };

    let report = DeployOperation::new(&options, &maven, &progress).run()?;

    if args.json {
        ui::print_json(&report)
    } else {
        ui::display::display_deploy_report(&report);
        Ok(())
    }
}
