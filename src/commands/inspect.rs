//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::commands::helpers::{self, GlobalOptions};
use crate::error::Result;
use crate::operations::InspectOperation;
use crate::ui;

pub fn run(globals: GlobalOptions, args: InspectArgs) -> Result<()> {
    let (_project_root, config) = helpers::load_project(&globals)?;
    let rules = config.artifact_rules()?;

    let report = InspectOperation::new(&rules).execute(&args.path, globals.layout())?;

    if args.json {
        ui::print_json(&report)
    } else {
        ui::display::display_inspect_report(&report);
        Ok(())
    }
}
