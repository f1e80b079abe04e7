//! Record use-cases over an in-memory `Directory`.

use std::collections::HashMap;
use std::sync::Mutex;

use agentdir_cli::application::ports::Directory;
use agentdir_cli::application::services::record_service::{
    SignOutcome, import_chat_mode, import_mcp_server, push_record, read_record,
};
use agentdir_cli::domain::directory::{DirectoryContext, SearchRequest, SearchResults};
use agentdir_cli::domain::error::{DirectoryError, ImportError};
use agentdir_cli::domain::import::McpServerConfig;
use agentdir_common::Record;
use serde_json::json;

use crate::helpers::{anonymous_ctx, record};

/// Stores pushed records under `cid-<n>`; signing can be made to fail.
#[derive(Default)]
struct MemoryDirectory {
    records: Mutex<HashMap<String, Record>>,
    signed: Mutex<Vec<String>>,
    sign_fails: bool,
}

impl MemoryDirectory {
    fn with(digest: &str, record: Record) -> Self {
        let dir = Self::default();
        dir.records
            .lock()
            .unwrap()
            .insert(digest.to_string(), record);
        dir
    }
}

impl Directory for MemoryDirectory {
    async fn login(&self, _: &DirectoryContext) -> Result<String, DirectoryError> {
        Ok(String::new())
    }

    async fn logout(&self, _: &DirectoryContext) -> Result<String, DirectoryError> {
        Ok(String::new())
    }

    async fn search(
        &self,
        _: &DirectoryContext,
        _: &SearchRequest,
    ) -> Result<SearchResults, DirectoryError> {
        Ok(SearchResults::default())
    }

    async fn push(&self, _: &DirectoryContext, record: &Record) -> Result<String, DirectoryError> {
        let mut records = self.records.lock().unwrap();
        let digest = format!("cid-{}", records.len() + 1);
        records.insert(digest.clone(), record.clone());
        Ok(digest)
    }

    async fn sign(&self, _: &DirectoryContext, digest: &str) -> Result<String, DirectoryError> {
        if self.sign_fails {
            return Err(DirectoryError::Tool {
                message: "no signing key".to_string(),
            });
        }
        self.signed.lock().unwrap().push(digest.to_string());
        Ok(format!("signed {digest}"))
    }

    async fn pull(&self, _: &DirectoryContext, digest: &str) -> Result<Record, DirectoryError> {
        self.records
            .lock()
            .unwrap()
            .get(digest)
            .cloned()
            .ok_or_else(|| DirectoryError::Tool {
                message: format!("record {digest} not found"),
            })
    }
}

// ── push ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_push_without_sign() {
    let dir = MemoryDirectory::default();
    let outcome = push_record(&dir, &anonymous_ctx(), &record("alpha", "1.0.0"), false)
        .await
        .unwrap();
    assert_eq!(outcome.digest, "cid-1");
    assert!(matches!(outcome.sign, SignOutcome::NotRequested));
    assert!(dir.signed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_push_then_sign_uses_returned_digest() {
    let dir = MemoryDirectory::default();
    let outcome = push_record(&dir, &anonymous_ctx(), &record("alpha", "1.0.0"), true)
        .await
        .unwrap();
    assert!(matches!(outcome.sign, SignOutcome::Signed(ref out) if out == "signed cid-1"));
    assert_eq!(*dir.signed.lock().unwrap(), ["cid-1"]);
}

#[tokio::test]
async fn test_sign_failure_keeps_the_push() {
    let dir = MemoryDirectory {
        sign_fails: true,
        ..MemoryDirectory::default()
    };
    let outcome = push_record(&dir, &anonymous_ctx(), &record("alpha", "1.0.0"), true)
        .await
        .unwrap();
    assert_eq!(outcome.digest, "cid-1");
    assert!(matches!(outcome.sign, SignOutcome::Failed(_)));
    assert!(dir.records.lock().unwrap().contains_key("cid-1"));
}

// ── read ─────────────────────────────────────────────────────────────────────

#[test]
fn test_read_record_accepts_both_revisions() {
    let current = json!({"name": "a", "version": "1", "schema_version": "0.7.0", "modules": []});
    let legacy = json!({"name": "b", "version": "1", "schema_version": "v0.6.0", "extensions": []});
    assert_eq!(read_record(&current.to_string()).unwrap().name, "a");
    assert_eq!(read_record(&legacy.to_string()).unwrap().name, "b");
}

#[test]
fn test_read_record_rejects_garbage() {
    let err = read_record("[1, 2]").unwrap_err();
    assert!(err.to_string().contains("not a valid OASF record"));
}

// ── import ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_mcp_server_from_pulled_record() {
    let dir = MemoryDirectory::with("cid-9", record("weather", "1.0.0"));
    let config = import_mcp_server(&dir, &anonymous_ctx(), "cid-9").await.unwrap();
    match config {
        McpServerConfig::Stdio { name, command, args, .. } => {
            assert_eq!(name, "weather");
            assert_eq!(command, "npx");
            assert_eq!(args, ["-y", "weather"]);
        }
        other => panic!("expected a stdio server, got {other:?}"),
    }
}

#[tokio::test]
async fn test_import_mcp_server_without_module() {
    let dir = MemoryDirectory::with("cid-1", Record::new("bare", "1.0.0"));
    let err = import_mcp_server(&dir, &anonymous_ctx(), "cid-1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::MissingModule(_))
    ));
}

#[tokio::test]
async fn test_import_chat_mode_needs_llm_tools() {
    let dir = MemoryDirectory::with("cid-1", record("weather", "1.0.0"));
    let err = import_chat_mode(&dir, &anonymous_ctx(), "cid-1").await.unwrap_err();
    assert!(err.to_string().contains("cannot import 'weather' as a chat mode"));
}

#[tokio::test]
async fn test_import_of_unknown_digest_reports_pull() {
    let dir = MemoryDirectory::default();
    let err = import_mcp_server(&dir, &anonymous_ctx(), "cid-404").await.unwrap_err();
    assert!(err.to_string().contains("failed to pull record cid-404"));
}
