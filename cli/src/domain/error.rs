//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Directory errors ──────────────────────────────────────────────────────────

/// Errors raised by directory backends.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The REST API answered with a non-success status, or with a success
    /// status and a body that is not the expected JSON.
    #[error("HTTP error! status: {status} {status_text}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// `dirctl` ran and exited non-zero.
    #[error("{message}")]
    Tool { message: String },

    /// `dirctl` could not be started at all.
    #[error("dirctl binary not found or not executable at: {program} ({message})")]
    Spawn { program: String, message: String },

    /// Output could not be read as the expected shape.
    #[error("cannot decode {context}: {message}")]
    Decode { context: String, message: String },

    /// Required configuration is missing or invalid.
    #[error("{0}")]
    Config(String),
}

impl DirectoryError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Api { .. } => "API_ERROR",
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::Tool { .. } => "DIRCTL_FAILED",
            Self::Spawn { .. } => "DIRCTL_NOT_FOUND",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

// ── Import errors ─────────────────────────────────────────────────────────────

/// A record cannot be turned into an editor artifact.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("No servers defined in the runtime/mcp module.")]
    NoServers,

    #[error("MCP server '{0}' has neither a command (local) nor a url (http, sse).")]
    UnsupportedServer(String),

    #[error("Record has no {0} module.")]
    MissingModule(&'static str),

    #[error("The llm_tools module does not reference a prompt.")]
    NoPromptReference,

    #[error("Prompt '{0}' not found in the prompt module.")]
    PromptNotFound(String),

    #[error("Model '{0}' not found in the model module.")]
    ModelNotFound(String),

    #[error("Invalid chat mode file: {0}")]
    InvalidChatMode(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
