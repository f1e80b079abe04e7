//! Application service: record use-cases built on a [`Directory`].

use agentdir_common::{Record, normalize};
use anyhow::{Context, Result};

use crate::application::ports::Directory;
use crate::domain::directory::DirectoryContext;
use crate::domain::error::DirectoryError;
use crate::domain::import::{
    CHAT_MODE_EXTENSION, ChatMode, McpServerConfig, chat_mode_file_name, chat_mode_from_record,
    mcp_server_config, parse_chat_mode, record_from_chat_mode, render_chat_mode,
    safe_record_name,
};

/// Extension of record documents written by conversions.
pub const RECORD_FILE_EXTENSION: &str = ".oasf.json";

/// Result of the optional signing step after a push.
#[derive(Debug)]
pub enum SignOutcome {
    NotRequested,
    Signed(String),
    /// The push went through; only signing failed.
    Failed(DirectoryError),
}

#[derive(Debug)]
pub struct PushOutcome {
    pub digest: String,
    pub sign: SignOutcome,
}

/// Read a record document of either schema revision.
///
/// # Errors
///
/// Returns an error if `content` is not a record document.
pub fn read_record(content: &str) -> Result<Record> {
    normalize(content).context("not a valid OASF record")
}

/// Push a record and, when asked, sign what was pushed.
///
/// # Errors
///
/// Returns an error if the push fails. A signing failure is reported in
/// [`PushOutcome::sign`] instead.
pub async fn push_record(
    directory: &impl Directory,
    ctx: &DirectoryContext,
    record: &Record,
    sign: bool,
) -> Result<PushOutcome> {
    let digest = directory
        .push(ctx, record)
        .await
        .with_context(|| format!("failed to push record '{}'", record.name))?;

    let sign = if !sign {
        SignOutcome::NotRequested
    } else if digest.is_empty() {
        SignOutcome::Failed(DirectoryError::Tool {
            message: "push returned no record identifier to sign".to_string(),
        })
    } else {
        match directory.sign(ctx, &digest).await {
            Ok(output) => SignOutcome::Signed(output),
            Err(e) => SignOutcome::Failed(e),
        }
    };
    Ok(PushOutcome { digest, sign })
}

/// Pull a record and derive its MCP server install configuration.
///
/// # Errors
///
/// Returns an error if the pull fails or the record has no usable MCP server.
pub async fn import_mcp_server(
    directory: &impl Directory,
    ctx: &DirectoryContext,
    digest: &str,
) -> Result<McpServerConfig> {
    let record = directory
        .pull(ctx, digest)
        .await
        .with_context(|| format!("failed to pull record {digest}"))?;
    mcp_server_config(&record).with_context(|| format!("cannot import '{}' as an MCP server", record.name))
}

/// Pull a record and convert it into a chat mode.
///
/// # Errors
///
/// Returns an error if the pull fails or the record does not describe a
/// complete chat mode.
pub async fn import_chat_mode(
    directory: &impl Directory,
    ctx: &DirectoryContext,
    digest: &str,
) -> Result<(Record, ChatMode)> {
    let record = directory
        .pull(ctx, digest)
        .await
        .with_context(|| format!("failed to pull record {digest}"))?;
    let chat_mode = chat_mode_from_record(&record)
        .with_context(|| format!("cannot import '{}' as a chat mode", record.name))?;
    Ok((record, chat_mode))
}

/// A file to write: its name and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

/// Render `record` as a `.chatmode.md` artifact.
///
/// # Errors
///
/// Returns an error if the record does not describe a complete chat mode.
pub fn chat_mode_artifact(record: &Record) -> Result<Artifact> {
    let chat_mode = chat_mode_from_record(record)
        .with_context(|| format!("cannot convert '{}' to a chat mode", record.name))?;
    render_chat_mode_artifact(record, &chat_mode)
}

/// Render an already-resolved chat mode for `record`.
///
/// # Errors
///
/// Returns an error if the front matter cannot be serialized.
pub fn render_chat_mode_artifact(record: &Record, chat_mode: &ChatMode) -> Result<Artifact> {
    Ok(Artifact {
        file_name: chat_mode_file_name(record),
        contents: render_chat_mode(chat_mode).context("cannot render chat mode")?,
    })
}

/// Record name for a chat mode file: its base name without the
/// `.chatmode.md` suffix, made file-safe.
#[must_use]
pub fn chat_mode_record_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(CHAT_MODE_EXTENSION).unwrap_or_else(|| {
        file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem)
    });
    safe_record_name(stem)
}

/// Convert a chat mode file into a record document artifact.
///
/// # Errors
///
/// Returns an error if `content` is not a chat mode file.
pub fn record_artifact_from_chat_mode(
    file_name: &str,
    content: &str,
    authors: Vec<String>,
) -> Result<(Record, Artifact)> {
    let chat_mode =
        parse_chat_mode(content).with_context(|| format!("cannot read chat mode {file_name}"))?;
    let name = chat_mode_record_name(file_name);
    let record = record_from_chat_mode(&name, &chat_mode, authors);
    let contents = serde_json::to_string_pretty(&record).context("cannot serialize record")?;
    Ok((
        record,
        Artifact {
            file_name: format!("{name}{RECORD_FILE_EXTENSION}"),
            contents,
        },
    ))
}
