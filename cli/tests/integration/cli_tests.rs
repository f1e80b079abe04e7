//! Integration tests for the agentdir command tree and global flags.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentdir(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentdir"));
    cmd.env("NO_COLOR", "1")
        .env("AGENTDIR_CONFIG", config_dir.path().join("config.yaml"))
        .env_remove("AGENTDIR_DIRECTORY_URL")
        .env_remove("AGENTDIR_DIRCTL_BINARY");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    // clap with arg_required_else_help shows help on stderr and exits 2
    agentdir(&dir).assert().code(2).stderr(predicate::str::contains(
        "Search, publish and import records in an OASF agent directory",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = agentdir(&dir).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in [
        "login", "logout", "search", "pull", "push", "sign", "org", "import", "convert", "config",
        "status",
    ] {
        assert!(stdout.contains(command), "help is missing {command}:\n{stdout}");
    }
}

#[test]
fn test_version_command_shows_version() {
    let dir = TempDir::new().unwrap();
    agentdir(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "agentdir {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json() {
    let dir = TempDir::new().unwrap();
    let output = agentdir(&dir).args(["version", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_version_works_with_broken_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.yaml"), "directory: [").unwrap();
    agentdir(&dir).arg("version").assert().success();
}

#[test]
fn test_unknown_command_fails() {
    let dir = TempDir::new().unwrap();
    agentdir(&dir)
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_search_filter_rejects_unknown_value() {
    let dir = TempDir::new().unwrap();
    agentdir(&dir)
        .args(["search", "--filter", "widgets"])
        .assert()
        .code(2);
}
