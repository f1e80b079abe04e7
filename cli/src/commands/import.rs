//! `agentdir import`: turn a directory record into an editor artifact.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::record_service;
use crate::commands::{with_spinner, write_artifact};

/// Import subcommands.
#[derive(Subcommand)]
pub enum ImportCommand {
    /// Print the MCP server configuration described by a record
    Mcp {
        /// Record identifier (CID or digest)
        digest: String,
    },
    /// Write a record as a `.chatmode.md` file
    ChatMode {
        /// Record identifier (CID or digest)
        digest: String,
        /// Directory to write the chat mode into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Run the import command.
pub async fn run(app: &AppContext, cmd: ImportCommand) -> Result<ExitCode> {
    let directory = app.directory()?;
    let ctx = app.context();
    match cmd {
        ImportCommand::Mcp { digest } => {
            let config = with_spinner(
                app,
                "Pulling...",
                record_service::import_mcp_server(&directory, &ctx, &digest),
            )
            .await?;
            app.renderer().render_mcp_config(&config)?;
        }
        ImportCommand::ChatMode { digest, dir } => {
            let (record, chat_mode) = with_spinner(
                app,
                "Pulling...",
                record_service::import_chat_mode(&directory, &ctx, &digest),
            )
            .await?;
            let artifact = record_service::render_chat_mode_artifact(&record, &chat_mode)?;
            match write_artifact(app, &dir, &artifact.file_name, &artifact.contents)? {
                Some(path) => app.renderer().render_written("chat mode", &path)?,
                None => app.output.warn("Import skipped"),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
