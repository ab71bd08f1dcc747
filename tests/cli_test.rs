//! Integration tests for the preinstall binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A project directory with its own HOME so no user config leaks in.
fn setup_project(config: Option<&str>) -> TempDir {
    let temp = TempDir::new().unwrap();
    if let Some(config) = config {
        let dir = temp.path().join(".preinstall");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
    }
    temp
}

fn preinstall(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("preinstall"));
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preinstall"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ready for the agent installation"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preinstall"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_list_shows_all_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let mut cmd = preinstall(&temp);
    cmd.arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("os-version"))
        .stdout(predicate::str::contains("companion-tool"))
        .stdout(predicate::str::contains("critical"));
    Ok(())
}

#[test]
fn cli_list_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let output = preinstall(&temp).args(["list", "--json"]).output()?;
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(10));
    Ok(())
}

#[test]
fn cli_check_json_report_structure() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let output = preinstall(&temp)
        .args(["check", "--format", "json", "--port", "47123"])
        .output()?;

    // Host-dependent verdict: installable or not, never a config error.
    let code = output.status.code();
    assert!(code == Some(0) || code == Some(1), "exit code {:?}", code);

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let checks = report["checks"].as_array().expect("checks array");
    assert_eq!(checks.len(), 10);
    assert_eq!(checks[0]["id"], "os-version");
    assert_eq!(checks[9]["id"], "companion-tool");
    assert_eq!(report["summary"]["total"], 10);

    let can_install = report["summary"]["can_install"].as_bool().expect("bool");
    assert_eq!(can_install, code == Some(0));
    Ok(())
}

#[test]
fn cli_check_parallel_keeps_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let output = preinstall(&temp)
        .args(["check", "--format", "json", "--parallel", "--port", "47124"])
        .output()?;

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let ids: Vec<&str> = report["checks"]
        .as_array()
        .expect("checks array")
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "os-version",
            "elevation",
            "database-driver",
            "native-runtime",
            "managed-runtime",
            "disk-space",
            "database-path",
            "port",
            "firewall",
            "companion-tool",
        ]
    );
    Ok(())
}

#[test]
fn cli_check_html_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let out = temp.path().join("report.html");
    let mut cmd = preinstall(&temp);
    cmd.args(["--quiet", "check", "--format", "html", "--output"])
        .arg(&out);
    cmd.assert().code(predicate::in_iter([0, 1]));

    let html = fs::read_to_string(&out)?;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("System Requirements Check"));
    Ok(())
}

#[test]
fn cli_unwritable_output_exits_three() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let target = temp.path().join("no/such/dir/report.html");
    let mut cmd = preinstall(&temp);
    cmd.args(["check", "--format", "html", "--output"])
        .arg(&target);
    cmd.assert()
        .failure()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"));
    assert!(!target.exists());
    Ok(())
}

#[test]
fn cli_default_command_is_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(Some("settings:\n  format: json\n"));
    let output = preinstall(&temp).output()?;

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["checks"].as_array().map(|a| a.len()), Some(10));
    Ok(())
}

#[test]
fn cli_rejects_port_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let mut cmd = preinstall(&temp);
    cmd.args(["check", "--port", "0"]);
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn cli_invalid_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(Some("checks:\n  companion_tool:\n    program: \"\"\n"));
    let mut cmd = preinstall(&temp);
    cmd.arg("check");
    cmd.assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn cli_missing_agent_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let mut cmd = preinstall(&temp);
    cmd.args(["check", "--agent-config", "missing.json"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("missing.json"));
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preinstall"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("preinstall"));
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("preinstall"));
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(None);
    let mut cmd = preinstall(&temp);
    cmd.args(["--debug", "list"]);
    cmd.assert().success();
    Ok(())
}
