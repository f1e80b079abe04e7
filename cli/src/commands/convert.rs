//! `agentdir convert`: translate local files between chat modes and
//! record documents. No directory access.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::record_service;
use crate::commands::write_artifact;

/// Convert subcommands.
#[derive(Subcommand)]
pub enum ConvertCommand {
    /// Record document to `.chatmode.md`
    ToChatMode {
        /// Record document (either schema revision)
        file: PathBuf,
        /// Output directory; defaults to the input file's directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// `.chatmode.md` to record document (`<name>.oasf.json`)
    FromChatMode {
        /// Chat mode file
        file: PathBuf,
        /// Output directory; defaults to the input file's directory
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Record author; defaults to the current user
        #[arg(long = "author")]
        authors: Vec<String>,
    },
}

/// Run the convert command.
pub fn run(app: &AppContext, cmd: ConvertCommand) -> Result<ExitCode> {
    let (file, dir, artifact, what) = match cmd {
        ConvertCommand::ToChatMode { file, dir } => {
            let record = record_service::read_record(&read(&file)?)?;
            let artifact = record_service::chat_mode_artifact(&record)?;
            (file, dir, artifact, "chat mode")
        }
        ConvertCommand::FromChatMode { file, dir, authors } => {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .with_context(|| format!("{} is not a file", file.display()))?;
            let authors = if authors.is_empty() {
                current_user().into_iter().collect()
            } else {
                authors
            };
            let (_, artifact) =
                record_service::record_artifact_from_chat_mode(&file_name, &read(&file)?, authors)?;
            (file, dir, artifact, "record")
        }
    };

    let dir = dir.unwrap_or_else(|| parent_dir(&file));
    match write_artifact(app, &dir, &artifact.file_name, &artifact.contents)? {
        Some(path) => app.renderer().render_written(what, &path)?,
        None => app.output.warn("Conversion skipped"),
    }
    Ok(ExitCode::SUCCESS)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Login name of the current user, from the environment.
fn current_user() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .filter(|name| !name.trim().is_empty())
}
