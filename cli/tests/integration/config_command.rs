//! Integration tests for `agentdir config`.
//!
//! All filesystem-touching tests set `AGENTDIR_CONFIG` to a temp path so they
//! never read or write `~/.agentdir/config.yaml`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentdir() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentdir"));
    cmd.env("NO_COLOR", "1")
        .env_remove("AGENTDIR_DIRECTORY_URL")
        .env_remove("AGENTDIR_DIRCTL_BINARY");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// `agentdir config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    agentdir()
        .args(["config", "show"])
        .env("AGENTDIR_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://agent-directory.outshift.com"))
        .stdout(predicate::str::contains("~/.agntcy/bin/dirctl"));
}

#[test]
fn test_config_show_json_includes_path() {
    let (_dir, path) = temp_config_path();
    let output = agentdir()
        .args(["config", "show", "--json"])
        .env("AGENTDIR_CONFIG", &path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["directory"]["url"], "https://agent-directory.outshift.com");
}

#[test]
fn test_config_show_reflects_env_override() {
    let (_dir, path) = temp_config_path();
    agentdir()
        .args(["config", "show"])
        .env("AGENTDIR_CONFIG", &path)
        .env("AGENTDIR_DIRECTORY_URL", "localhost:8888")
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:8888"));
}

// ---------------------------------------------------------------------------
// `agentdir config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_persists_value() {
    let (_dir, path) = temp_config_path();
    agentdir()
        .args(["config", "set", "directory.url", "localhost:9999"])
        .env("AGENTDIR_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set directory.url = localhost:9999"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("localhost:9999"));

    agentdir()
        .args(["config", "show"])
        .env("AGENTDIR_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("localhost:9999"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    agentdir()
        .args(["config", "set", "directory.colour", "blue"])
        .env("AGENTDIR_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory.colour"));
}

#[test]
fn test_config_set_invalid_timeout_fails_with_json_code() {
    let (_dir, path) = temp_config_path();
    let output = agentdir()
        .args(["config", "set", "http.timeout-secs", "0", "--json"])
        .env("AGENTDIR_CONFIG", &path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "CONFIG_ERROR");
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_api_url_requires_http() {
    let (_dir, path) = temp_config_path();
    agentdir()
        .args(["config", "set", "directory.api-url", "ftp://example.com"])
        .env("AGENTDIR_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("http"));
}

#[cfg(unix)]
#[test]
fn test_config_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    agentdir()
        .args(["config", "set", "organization.id", "org-1"])
        .env("AGENTDIR_CONFIG", &path)
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
