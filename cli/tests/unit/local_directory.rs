//! `LocalDirectory` against a scripted `dirctl`.

use agentdir_cli::application::ports::Directory;
use agentdir_cli::domain::directory::SearchRequest;
use agentdir_cli::domain::error::DirectoryError;
use agentdir_cli::infra::dirctl::Dirctl;
use agentdir_cli::infra::directory::LocalDirectory;
use agentdir_cli::infra::directory::local::{LOGIN_MESSAGE, LOGOUT_MESSAGE};

use crate::helpers::{
    DIRCTL, LOCAL_ADDR, ScriptedRunner, anonymous_ctx, err_output, ok_output, record, record_json,
};

fn local(runner: &ScriptedRunner) -> LocalDirectory<ScriptedRunner> {
    LocalDirectory::new(Dirctl::new(runner.clone(), DIRCTL, LOCAL_ADDR))
}

fn pull_ok(runner: ScriptedRunner, cid: &str, name: &str) -> ScriptedRunner {
    runner.on(
        &["pull", "--json", cid],
        ok_output(record_json(name, "1.0.0").as_bytes()),
    )
}

// ── login / logout ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_and_logout_need_no_tool() {
    let runner = ScriptedRunner::new();
    let dir = local(&runner);
    assert_eq!(dir.login(&anonymous_ctx()).await.unwrap(), LOGIN_MESSAGE);
    assert_eq!(dir.logout(&anonymous_ctx()).await.unwrap(), LOGOUT_MESSAGE);
    assert!(runner.calls().is_empty());
}

// ── search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_builds_flags_and_pulls_each_cid() {
    let runner = ScriptedRunner::new().on(&["search"], ok_output(br#"["baf1","baf2"]"#));
    let runner = pull_ok(pull_ok(runner, "baf1", "alpha"), "baf2", "beta");

    let results = local(&runner)
        .search(&anonymous_ctx(), &SearchRequest::term("name=alpha*, version=1.0.0"))
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(
        calls[0].args,
        [
            "search",
            "--json",
            "--name",
            "alpha*",
            "--version",
            "1.0.0",
            "--server-addr",
            LOCAL_ADDR
        ]
    );
    assert_eq!(calls.len(), 3);
    assert_eq!(results.len(), 2);
    assert_eq!(results.records()[0].name, "alpha");
    assert_eq!(results.refs()[1].digest, "baf2");
}

#[tokio::test]
async fn test_empty_term_searches_without_filters() {
    let runner = ScriptedRunner::new().on(&["search"], ok_output(b"[]"));
    let results = local(&runner)
        .search(&anonymous_ctx(), &SearchRequest::term("   "))
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(
        runner.calls()[0].args,
        ["search", "--json", "--server-addr", LOCAL_ADDR]
    );
}

#[tokio::test]
async fn test_rejected_terms_run_nothing() {
    for term in ["name=a b", "name", "name=a=b", "colour=red", "=x", "name=$(id)"] {
        let runner = ScriptedRunner::new();
        let results = local(&runner)
            .search(&anonymous_ctx(), &SearchRequest::term(term))
            .await
            .unwrap();
        assert!(results.is_empty(), "term {term:?} should yield nothing");
        assert!(runner.calls().is_empty(), "term {term:?} should not spawn dirctl");
    }
}

#[tokio::test]
async fn test_no_results_sentinel_is_empty() {
    let runner = ScriptedRunner::new().on(&["search"], ok_output(b"No record CIDs found\n"));
    let results = local(&runner)
        .search(&anonymous_ctx(), &SearchRequest::term("skill=nlp"))
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_failed_pull_is_skipped_and_alignment_kept() {
    let runner = ScriptedRunner::new()
        .on(&["search"], ok_output(br#"["baf1","baf2","baf3"]"#))
        .on(&["pull", "--json", "baf2"], err_output(1, b"not found"));
    let runner = pull_ok(pull_ok(runner, "baf1", "alpha"), "baf3", "gamma");

    let results = local(&runner)
        .search(&anonymous_ctx(), &SearchRequest::term("module=runtime_mcp"))
        .await
        .unwrap();
    let pairs: Vec<_> = results
        .iter()
        .map(|(r, rf)| (r.name.as_str(), rf.digest.as_str()))
        .collect();
    assert_eq!(pairs, [("alpha", "baf1"), ("gamma", "baf3")]);
}

#[tokio::test]
async fn test_search_failure_propagates() {
    let runner = ScriptedRunner::new().on(&["search"], err_output(1, b"connection refused"));
    let err = local(&runner)
        .search(&anonymous_ctx(), &SearchRequest::term("name=x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Tool { ref message } if message == "connection refused"));
}

// ── push / sign / pull ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_push_pipes_record_and_trims_cid() {
    let runner = ScriptedRunner::new().on(&["push"], ok_output(b"baf-new\n"));
    let cid = local(&runner)
        .push(&anonymous_ctx(), &record("alpha", "1.0.0"))
        .await
        .unwrap();
    assert_eq!(cid, "baf-new");

    let call = &runner.calls()[0];
    assert_eq!(call.args, ["push", "--server-addr", LOCAL_ADDR, "--stdin"]);
    let payload = call.stdin_json();
    assert_eq!(payload["name"], "alpha");
    assert_eq!(payload["schema_version"], "0.7.0");
}

#[tokio::test]
async fn test_sign_passes_cid() {
    let runner = ScriptedRunner::new().on(&["sign", "baf1"], ok_output(b"Signed\n"));
    let out = local(&runner).sign(&anonymous_ctx(), "baf1").await.unwrap();
    assert_eq!(out, "Signed");
    assert_eq!(
        runner.calls()[0].args,
        ["sign", "baf1", "--server-addr", LOCAL_ADDR]
    );
}

#[tokio::test]
async fn test_pull_normalizes_legacy_document() {
    let legacy = serde_json::json!({
        "name": "github-mcp",
        "version": "0.3.0",
        "schema_version": "v0.6.0",
        "extensions": [{
            "name": "runtime/mcp",
            "version": "v1.0.0",
            "data": {"servers": [{"name": "github", "type": "local", "command": "docker"}]}
        }]
    });
    let runner = ScriptedRunner::new().on(&["pull"], ok_output(legacy.to_string().as_bytes()));
    let record = local(&runner).pull(&anonymous_ctx(), "baf1").await.unwrap();
    assert_eq!(record.name, "github-mcp");
    assert!(record.mcp().is_some());
}

#[tokio::test]
async fn test_repeated_pull_returns_equal_records() {
    let legacy = serde_json::json!({
        "name": "github-mcp",
        "version": "0.3.0",
        "schema_version": "v0.6.0",
        "authors": null,
        "extensions": [{
            "name": "runtime/mcp",
            "data": {"servers": [{"name": "github", "type": "local", "command": "docker"}]}
        }]
    })
    .to_string();
    let runner = ScriptedRunner::new()
        .on(&["pull", "--json", "baf-legacy"], ok_output(legacy.as_bytes()))
        .on(
            &["pull", "--json", "baf-current"],
            ok_output(record_json("weather", "1.0.0").as_bytes()),
        );
    let dir = local(&runner);
    let ctx = anonymous_ctx();

    for cid in ["baf-legacy", "baf-current"] {
        let first = dir.pull(&ctx, cid).await.unwrap();
        let second = dir.pull(&ctx, cid).await.unwrap();
        assert_eq!(first, second, "{cid}");
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap(), "{cid}");
    }
    assert_eq!(runner.calls().len(), 4);
}

#[tokio::test]
async fn test_pull_rejects_non_record_output() {
    let runner = ScriptedRunner::new().on(&["pull"], ok_output(b"Error: oops"));
    let err = local(&runner).pull(&anonymous_ctx(), "baf1").await.unwrap_err();
    assert_eq!(err.code(), "DECODE_ERROR");
}
