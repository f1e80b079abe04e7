//! agentdir - client for OASF agent directories

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use agentdir_cli::cli::Cli;
use agentdir_cli::output::json::{error_code, format_error};

/// Environment variable holding the log filter, e.g. `agentdir=debug`.
const LOG_ENV: &str = "AGENTDIR_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json.then(|| format_error(&message, error_code(&e))) {
                Some(Ok(body)) => println!("{body}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
