//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod styles;

use std::path::Path;

use agentdir_common::Record;
use anyhow::Result;
use console::Term;
use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::services::record_service::PushOutcome;
use crate::domain::config::AgentdirConfig;
use crate::domain::directory::{DirectoryStatus, SearchResults};
use crate::domain::hub::OrganizationsResponse;
use crate::domain::import::McpServerConfig;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// A spinner for a directory call, or `None` when progress is hidden.
    #[must_use]
    pub fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        self.show_progress().then(|| progress::spinner(msg))
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renderer for the active output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl<'a> Renderer<'a> {
    /// The renderer for `--json` (or its absence).
    #[must_use]
    pub fn new(output: &'a OutputContext, json: bool) -> Self {
        if json {
            Self::Json(JsonRenderer)
        } else {
            Self::Human(HumanRenderer::new(output))
        }
    }

    /// Render search results.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_search(&self, results: &SearchResults) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_search(results);
                Ok(())
            }
            Self::Json(r) => r.render_search(results),
        }
    }

    /// Render a pulled record. Both modes print the record document.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_record(&self, record: &Record) -> Result<()> {
        match self {
            Self::Human(r) => r.render_record(record),
            Self::Json(r) => r.render_value(record),
        }
    }

    /// Render the result of a push.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_push(&self, name: &str, outcome: &PushOutcome) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_push(name, outcome);
                Ok(())
            }
            Self::Json(r) => r.render_push(outcome),
        }
    }

    /// Render a backend's message (login, logout, sign).
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_message(&self, message: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_message(message);
                Ok(())
            }
            Self::Json(r) => r.render_message(message),
        }
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(&self, config: &AgentdirConfig, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => r.render_config(config, path),
            Self::Json(r) => r.render_config(config, path),
        }
    }

    /// Render directory status.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, status: &DirectoryStatus) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_status(status);
                Ok(())
            }
            Self::Json(r) => r.render_value(status),
        }
    }

    /// Render the caller's organizations, marking the selected one.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_organizations(
        &self,
        response: &OrganizationsResponse,
        selected: Option<&str>,
    ) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_organizations(response, selected);
                Ok(())
            }
            Self::Json(r) => r.render_value(response),
        }
    }

    /// Render an MCP server install configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_mcp_config(&self, config: &McpServerConfig) -> Result<()> {
        match self {
            Self::Human(r) => r.render_mcp_config(config),
            Self::Json(r) => r.render_value(config),
        }
    }

    /// Report a file written by an import or conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_written(&self, what: &str, path: &Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_written(what, path);
                Ok(())
            }
            Self::Json(r) => r.render_written(path),
        }
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Self::Json(r) => r.render_value(&serde_json::json!({ "version": version })),
        }
    }
}
