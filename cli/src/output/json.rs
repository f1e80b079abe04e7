//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed document to stdout.
//! Failures use the error object from [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::record_service::{PushOutcome, SignOutcome};
use crate::domain::config::AgentdirConfig;
use crate::domain::directory::SearchResults;
use crate::domain::error::{ConfigError, DirectoryError, ImportError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for the first typed error in `err`'s chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DirectoryError>() {
            return e.code();
        }
        if cause.is::<ImportError>() {
            return "IMPORT_ERROR";
        }
        if cause.is::<ConfigError>() {
            return "CONFIG_ERROR";
        }
    }
    "ERROR"
}

/// Search results as `{ "records": [...], "refs": [...] }`, index-aligned.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn search_document(results: &SearchResults) -> Result<String> {
    let obj = serde_json::json!({
        "records": results.records(),
        "refs": results.refs(),
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Push result: the digest plus the signing step, if any.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn push_document(outcome: &PushOutcome) -> Result<String> {
    let mut obj = serde_json::json!({ "digest": outcome.digest });
    match &outcome.sign {
        SignOutcome::NotRequested => {}
        SignOutcome::Signed(output) => {
            obj["signed"] = true.into();
            obj["sign_output"] = output.as_str().into();
        }
        SignOutcome::Failed(e) => {
            obj["signed"] = false.into();
            obj["sign_error"] = e.to_string().into();
        }
    }
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders every output as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{json}");
        Ok(())
    }

    pub(crate) fn render_search(&self, results: &SearchResults) -> Result<()> {
        println!("{}", search_document(results)?);
        Ok(())
    }

    pub(crate) fn render_push(&self, outcome: &PushOutcome) -> Result<()> {
        println!("{}", push_document(outcome)?);
        Ok(())
    }

    pub(crate) fn render_message(&self, message: &str) -> Result<()> {
        self.render_value(&serde_json::json!({ "message": message }))
    }

    pub(crate) fn render_config(&self, config: &AgentdirConfig, path: &Path) -> Result<()> {
        self.render_value(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    pub(crate) fn render_written(&self, path: &Path) -> Result<()> {
        self.render_value(&serde_json::json!({ "path": path.display().to_string() }))
    }
}
