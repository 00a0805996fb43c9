//! Text rendering for deploy and inspect reports

use std::fmt::Write;

use console::Style;

use crate::metadata::{Edition, ProductIdentity};
use crate::operations::{DeployReport, InspectReport};
use crate::platform::InstallationRoot;

macro_rules! field {
    ($out:expr, $label:expr, $value:expr) => {
        let _ = writeln!($out, "  {} {}", Style::new().bold().apply_to($label), $value);
    };
}

/// Display the outcome of a deploy run
pub fn display_deploy_report(report: &DeployReport) {
    print!("{}", render_deploy_report(report));
}

/// Display what inspect found
pub fn display_inspect_report(report: &InspectReport) {
    print!("{}", render_inspect_report(report));
}

pub fn render_deploy_report(report: &DeployReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", Style::new().bold().green().apply_to("Deployed"));
    write_identity(&mut out, &report.root, &report.identity, report.edition);

    if report.artifacts.is_empty() {
        field!(out, "Libraries:", Style::new().yellow().apply_to("none found"));
    } else {
        field!(out, "Libraries:", "");
        for artifact in &report.artifacts {
            let _ = writeln!(
                out,
                "    {} {} ({})",
                Style::new().cyan().apply_to(&artifact.artifact_key),
                artifact.normalized_version,
                artifact.file_name
            );
        }
    }

    let changes: Vec<_> = report.descriptor.changes().collect();
    if changes.is_empty() {
        field!(out, "pom.xml:", Style::new().dim().apply_to("unchanged"));
    } else {
        field!(out, "pom.xml:", "");
        for change in changes {
            let _ = writeln!(
                out,
                "    {}: {} -> {}",
                change.target,
                Style::new().red().apply_to(&change.old),
                Style::new().green().apply_to(&change.new)
            );
        }
    }
    for skipped in &report.descriptor.skipped {
        let _ = writeln!(out, "    {} {skipped} not found", Style::new().yellow().apply_to("!"));
    }

    match &report.agent {
        Some(path) => {
            field!(out, "Agent:", path.display());
        }
        None => {
            field!(out, "Agent:", Style::new().yellow().apply_to("not deployed (no build output)"));
        }
    }

    if report.startup.written {
        field!(out, "dbeaver.ini:", "");
        for line in &report.startup.removed {
            let _ = writeln!(out, "    {} {line}", Style::new().red().apply_to("-"));
        }
        for line in &report.startup.inserted {
            let _ = writeln!(out, "    {} {line}", Style::new().green().apply_to("+"));
        }
    } else {
        field!(out, "dbeaver.ini:", Style::new().dim().apply_to("unchanged"));
    }

    field!(out, "Runtime:", report.runtime);
    out
}

pub fn render_inspect_report(report: &InspectReport) -> String {
    let mut out = String::new();
    write_identity(&mut out, &report.root, &report.identity, report.edition);

    if report.artifacts.is_empty() {
        field!(out, "Libraries:", Style::new().yellow().apply_to("none found"));
    } else {
        field!(out, "Libraries:", "");
        for artifact in &report.artifacts {
            let _ = writeln!(
                out,
                "    {} {}",
                Style::new().cyan().apply_to(&artifact.artifact_key),
                artifact.normalized_version
            );
        }
    }

    if report.agents.is_empty() {
        field!(out, "Agents:", Style::new().dim().apply_to("none"));
    } else {
        field!(out, "Agents:", report.agents.join(", "));
    }

    let runtime = if report.bundled_runtime {
        "bundled"
    } else {
        "system"
    };
    field!(out, "Runtime:", runtime);
    out
}

fn write_identity(
    out: &mut String,
    root: &InstallationRoot,
    identity: &ProductIdentity,
    edition: Option<Edition>,
) {
    field!(out, "Installation:", root.path().display());
    field!(out, "Layout:", root.layout());
    field!(out, "Version:", Style::new().bold().yellow().apply_to(identity.version));
    let edition = match edition {
        Some(edition) => format!("{edition:?}"),
        None => Style::new().yellow().apply_to("unknown").to_string(),
    };
    field!(out, "Product:", format!("{} ({edition})", identity.product_id));
}
