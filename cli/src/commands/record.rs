//! `agentdir pull`, `agentdir push` and `agentdir sign`.

use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::Directory;
use crate::application::services::record_service::{self, SignOutcome};
use crate::commands::with_spinner;

/// Arguments for the pull command.
#[derive(Args)]
pub struct PullArgs {
    /// Record identifier (CID or digest)
    pub digest: String,

    /// Write the record to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the push command.
#[derive(Args)]
pub struct PushArgs {
    /// Record document (either schema revision); `-` reads stdin
    pub file: PathBuf,

    /// Sign the record once pushed
    #[arg(long)]
    pub sign: bool,
}

/// Arguments for the sign command.
#[derive(Args)]
pub struct SignArgs {
    /// Record identifier (CID or digest)
    pub digest: String,
}

/// Run the pull command.
pub async fn pull(app: &AppContext, args: &PullArgs) -> Result<ExitCode> {
    let directory = app.directory()?;
    let ctx = app.context();
    let record = with_spinner(app, "Pulling...", directory.pull(&ctx, &args.digest)).await?;

    match &args.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&record).context("cannot serialize record")?;
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            app.renderer().render_written("record", path)?;
        }
        None => app.renderer().render_record(&record)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the push command.
///
/// A signing failure after a successful push is reported but does not fail
/// the command.
pub async fn push(app: &AppContext, args: &PushArgs) -> Result<ExitCode> {
    let content = read_input(&args.file)?;
    let record = record_service::read_record(&content)?;

    let directory = app.directory()?;
    let ctx = app.context();
    let outcome = with_spinner(
        app,
        "Pushing...",
        record_service::push_record(&directory, &ctx, &record, args.sign),
    )
    .await?;
    if let SignOutcome::Failed(e) = &outcome.sign {
        tracing::warn!(digest = %outcome.digest, error = %e, "record pushed but not signed");
    }
    app.renderer().render_push(&record.name, &outcome)?;
    Ok(ExitCode::SUCCESS)
}

/// Run the sign command.
pub async fn sign(app: &AppContext, args: &SignArgs) -> Result<ExitCode> {
    let directory = app.directory()?;
    let ctx = app.context();
    let output = with_spinner(app, "Signing...", directory.sign(&ctx, &args.digest))
        .await
        .with_context(|| format!("failed to sign record {}", args.digest))?;
    let message = if output.is_empty() {
        format!("Signed {}", args.digest)
    } else {
        output
    };
    app.renderer().render_message(&message)?;
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("cannot read record from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
