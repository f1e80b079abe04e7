//! Argument construction and exit handling of the `dirctl` wrapper.

use agentdir_cli::domain::error::DirectoryError;
use agentdir_cli::infra::dirctl::Dirctl;

use crate::helpers::{DIRCTL, LOCAL_ADDR, ScriptedRunner, err_output, ok_output};

fn dirctl(runner: &ScriptedRunner) -> Dirctl<ScriptedRunner> {
    Dirctl::new(runner.clone(), DIRCTL, LOCAL_ADDR)
}

#[test]
fn test_plain_subcommand_gets_server_addr() {
    let args = dirctl(&ScriptedRunner::new()).command_args(&["pull", "--json", "baf1"], false);
    assert_eq!(args, ["pull", "--json", "baf1", "--server-addr", LOCAL_ADDR]);
}

#[test]
fn test_hub_subcommand_gets_server_address() {
    let args = dirctl(&ScriptedRunner::new()).command_args(&["hub", "pull", "sha256:ab"], false);
    assert_eq!(args, ["hub", "pull", "sha256:ab", "--server-address", LOCAL_ADDR]);
}

#[test]
fn test_piped_payload_appends_stdin_flag_last() {
    let args = dirctl(&ScriptedRunner::new()).command_args(&["push"], true);
    assert_eq!(args, ["push", "--server-addr", LOCAL_ADDR, "--stdin"]);
}

#[tokio::test]
async fn test_exec_returns_stdout_and_uses_binary() {
    let runner = ScriptedRunner::new().on(&["sign"], ok_output(b"signed\n"));
    let out = dirctl(&runner).exec(&["sign", "baf1"]).await.unwrap();
    assert_eq!(out, "signed\n");

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, DIRCTL);
    assert!(calls[0].stdin.is_none());
}

#[tokio::test]
async fn test_exec_with_stdin_pipes_payload() {
    let runner = ScriptedRunner::new().on(&["push"], ok_output(b"baf1"));
    dirctl(&runner)
        .exec_with_stdin(&["push"], br#"{"name":"x"}"#)
        .await
        .unwrap();
    assert_eq!(runner.calls()[0].stdin.as_deref(), Some(&br#"{"name":"x"}"#[..]));
}

#[tokio::test]
async fn test_non_zero_exit_reports_stderr() {
    let runner = ScriptedRunner::new().on(&["pull"], err_output(1, b"  record not found\n"));
    let err = dirctl(&runner).exec(&["pull", "baf1"]).await.unwrap_err();
    match err {
        DirectoryError::Tool { message } => assert_eq!(message, "record not found"),
        other => panic!("expected Tool error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_zero_exit_without_stderr_names_status() {
    let runner = ScriptedRunner::new().on(&["pull"], err_output(3, b""));
    let err = dirctl(&runner).exec(&["pull", "baf1"]).await.unwrap_err();
    assert!(
        err.to_string().starts_with("dirctl exited with"),
        "unexpected message: {err}"
    );
}

#[tokio::test]
async fn test_spawn_failure_names_binary() {
    let runner = ScriptedRunner::new().failing_spawn("No such file or directory");
    let err = dirctl(&runner).exec(&["search", "--json"]).await.unwrap_err();
    assert_eq!(err.code(), "DIRCTL_NOT_FOUND");
    assert!(err.to_string().contains(DIRCTL));
}
