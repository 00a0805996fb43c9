//! CLI integration tests using the REAL rigger binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
fn rigger_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rigger").unwrap();
    cmd.env_remove("RIGGER_CONFIG")
        .env_remove("RIGGER_PROJECT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_output() {
    rigger_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_output() {
    rigger_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rigger"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("rigger.yaml"));
}

#[test]
fn test_completions_bash() {
    rigger_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rigger"));
}

#[test]
fn test_completions_unknown_shell() {
    rigger_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_unknown_layout_rejected() {
    rigger_cmd()
        .args(["inspect", "/opt/dbeaver", "--layout", "solaris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("solaris"));
}

#[test]
fn test_inspect_prints_identity() {
    let fx = common::TestInstall::new();

    rigger_cmd()
        .current_dir(&fx.project)
        .args(["inspect", &fx.install_arg(), "--layout", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.2.0"))
        .stdout(predicate::str::contains("com.dbeaver.ultimate"))
        .stdout(predicate::str::contains("3.0.9"))
        .stdout(predicate::str::contains("Runtime: bundled"));

    // Nothing was modified
    assert_eq!(fx.read_install_file("dbeaver.ini"), common::STARTUP_CONFIG);
    assert!(fx.install.join("jre").is_dir());
}

#[test]
fn test_inspect_json() {
    let fx = common::TestInstall::new();

    let output = rigger_cmd()
        .current_dir(&fx.project)
        .args(["inspect", &fx.install_arg(), "--layout", "linux", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["identity"]["version"], "25.2.0");
    assert_eq!(report["identity"]["product_id"], "com.dbeaver.ultimate");
    assert_eq!(report["edition"], "ultimate");
    assert_eq!(report["artifacts"].as_array().unwrap().len(), 2);
}

#[test]
fn test_inspect_accepts_quoted_executable_path() {
    let fx = common::TestInstall::new();
    let quoted = format!("\"{}/dbeaver\"", fx.install.display());

    rigger_cmd()
        .current_dir(&fx.project)
        .args(["inspect", &quoted, "--layout", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25.2.0"));
}

#[test]
fn test_inspect_missing_path_fails() {
    let fx = common::TestInstall::new();
    let missing = fx.install.join("nope");

    rigger_cmd()
        .current_dir(&fx.project)
        .args(["inspect", missing.to_str().unwrap(), "--layout", "linux"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_inspect_non_installation_fails() {
    let fx = common::TestInstall::new();

    rigger_cmd()
        .current_dir(&fx.project)
        .args(["inspect", fx.project.to_str().unwrap(), "--layout", "linux"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("rigger::locate"));
}

#[test]
fn test_inspect_malformed_descriptor_fails() {
    let fx = common::TestInstall::new();
    fx.write_install_file(".eclipseproduct", "id=com.dbeaver.ultimate\nversion=25.2\n");

    rigger_cmd()
        .current_dir(&fx.project)
        .args(["inspect", &fx.install_arg(), "--layout", "linux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rigger::metadata::malformed_version"));
}
