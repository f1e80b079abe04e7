//! Human-readable terminal renderer.

use std::path::Path;

use agentdir_common::Record;
use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::application::services::record_service::{PushOutcome, SignOutcome};
use crate::domain::config::{AgentdirConfig, DirectoryMode};
use crate::domain::directory::{DirectoryStatus, RecordRef, SearchResults};
use crate::domain::hub::OrganizationsResponse;
use crate::domain::import::McpServerConfig;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("agentdir {version}");
        }
    }

    /// One line per record: name, version, identifier, then the description.
    pub fn render_search(&self, results: &SearchResults) {
        if results.is_empty() {
            self.ctx.info("No records found.");
            return;
        }
        if self.ctx.quiet {
            // Identifiers only, for piping into `agentdir pull`.
            for reference in results.refs() {
                println!("{}", reference.digest);
            }
            return;
        }
        for (record, reference) in results.iter() {
            println!("  {}", record_line(self.ctx, record, reference));
            if !record.description.is_empty() {
                println!("    {}", record.description.style(self.ctx.styles.dim));
            }
        }
        println!();
        self.ctx.info(&format_count(results.len()));
    }

    /// A pulled record is printed as its JSON document so it can be saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized.
    pub fn render_record(&self, record: &Record) -> Result<()> {
        let json = serde_json::to_string_pretty(record).context("JSON serialization failed")?;
        println!("{json}");
        Ok(())
    }

    pub fn render_push(&self, name: &str, outcome: &PushOutcome) {
        if self.ctx.quiet {
            println!("{}", outcome.digest);
            return;
        }
        self.ctx.success(&format!("Pushed {name}"));
        self.ctx.kv("Digest:", &outcome.digest);
        match &outcome.sign {
            SignOutcome::NotRequested => {}
            SignOutcome::Signed(_) => self.ctx.success("Record signed"),
            SignOutcome::Failed(e) => self.ctx.warn(&format!("Signing failed: {e}")),
        }
    }

    pub fn render_message(&self, message: &str) {
        if !message.is_empty() {
            self.ctx.success(message);
        }
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn render_config(&self, config: &AgentdirConfig, path: &Path) -> Result<()> {
        self.ctx.header(&format!("Configuration ({})", path.display()));
        self.ctx.kv("directory.url:", &config.directory.url);
        let api_url = match &config.directory.api_url {
            Some(url) => url.clone(),
            None => config
                .api_url()
                .map(|url| format!("{url} (derived)"))
                .unwrap_or_else(|_| "-".to_string()),
        };
        self.ctx.kv("directory.api-url:", &api_url);
        self.ctx.kv("directory.listing:", config.directory.listing.as_str());
        self.ctx.kv("dirctl.binary:", &config.dirctl.binary);
        self.ctx.kv("session.file:", &config.session.file);
        self.ctx
            .kv("http.timeout-secs:", &config.http.timeout_secs.to_string());
        match &config.organization {
            Some(org) => self.ctx.kv("organization:", &organization_label(&org.name, &org.id)),
            None => self.ctx.kv("organization:", "-"),
        }
        Ok(())
    }

    pub fn render_status(&self, status: &DirectoryStatus) {
        self.ctx.kv("Mode:", status.mode.as_str());
        self.ctx.kv("Directory:", &status.directory_url);
        if let Some(api_url) = &status.api_url {
            self.ctx.kv("API:", api_url);
        }
        if status.mode == DirectoryMode::Local {
            return;
        }
        match (&status.user, status.logged_in) {
            (Some(user), true) => self.ctx.kv("Session:", &format!("logged in as {user}")),
            (None, true) => self.ctx.kv("Session:", "logged in"),
            (_, false) => self.ctx.kv("Session:", "not logged in (run `agentdir login`)"),
        }
        if let Some(org) = &status.organization {
            self.ctx
                .kv("Organization:", &organization_label(&org.name, &org.id));
        }
    }

    pub fn render_organizations(&self, response: &OrganizationsResponse, selected: Option<&str>) {
        if response.organizations.is_empty() {
            self.ctx.info("No organizations.");
            return;
        }
        for membership in &response.organizations {
            let org = &membership.organization;
            let marker = if selected == Some(org.id.as_str()) {
                "*"
            } else {
                " "
            };
            let role = if membership.role.is_empty() {
                String::new()
            } else {
                format!("  {}", membership.role.style(self.ctx.styles.dim))
            };
            if !self.ctx.quiet {
                println!(
                    "  {marker} {}  {}{role}",
                    org.name.style(self.ctx.styles.name),
                    org.id.style(self.ctx.styles.digest),
                );
            }
        }
    }

    /// The install configuration is printed as JSON, ready to paste.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn render_mcp_config(&self, config: &McpServerConfig) -> Result<()> {
        self.ctx
            .header(&format!("MCP server configuration for {}", config.name()));
        let json = serde_json::to_string_pretty(config).context("JSON serialization failed")?;
        println!("{json}");
        Ok(())
    }

    pub fn render_written(&self, what: &str, path: &Path) {
        self.ctx
            .success(&format!("Wrote {what} to {}", path.display()));
    }
}

fn record_line(ctx: &OutputContext, record: &Record, reference: &RecordRef) -> String {
    format!(
        "{} {}  {}",
        record.name.style(ctx.styles.name),
        record.version.style(ctx.styles.version),
        reference.digest.style(ctx.styles.digest),
    )
}

/// "1 record" / "N records".
#[must_use]
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 record".to_string()
    } else {
        format!("{count} records")
    }
}

/// "name (id)", or the id alone when the name is unknown.
#[must_use]
pub fn organization_label(name: &str, id: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        format!("{name} ({id})")
    }
}
