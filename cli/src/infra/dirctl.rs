//! Wrapper around the `dirctl` command-line tool.
//!
//! Every invocation targets one registry: hub subcommands get
//! `--server-address <url>`, all others `--server-addr <url>`. When a payload
//! is piped, `--stdin` is appended and the payload written to the child.

use std::path::{Path, PathBuf};
use std::process::Output;

use crate::application::ports::CommandRunner;
use crate::domain::error::DirectoryError;

/// `dirctl` bound to a binary path and a registry address.
#[derive(Debug, Clone)]
pub struct Dirctl<R: CommandRunner> {
    runner: R,
    binary: PathBuf,
    server_address: String,
}

impl<R: CommandRunner> Dirctl<R> {
    pub fn new(runner: R, binary: impl Into<PathBuf>, server_address: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
            server_address: server_address.into(),
        }
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    #[must_use]
    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    /// Full argument list for `args`, including the address flag.
    #[must_use]
    pub fn command_args(&self, args: &[&str], with_stdin: bool) -> Vec<String> {
        let address_flag = if args.first() == Some(&"hub") {
            "--server-address"
        } else {
            "--server-addr"
        };
        let mut full: Vec<String> = args.iter().map(ToString::to_string).collect();
        full.push(address_flag.to_string());
        full.push(self.server_address.clone());
        if with_stdin {
            full.push("--stdin".to_string());
        }
        full
    }

    /// Run a subcommand and return its stdout.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Spawn`] if the binary cannot be started and
    /// [`DirectoryError::Tool`] if it exits non-zero.
    pub async fn exec(&self, args: &[&str]) -> Result<String, DirectoryError> {
        self.invoke(args, None).await
    }

    /// Run a subcommand with `stdin` piped to it and return its stdout.
    ///
    /// # Errors
    ///
    /// Same as [`Dirctl::exec`].
    pub async fn exec_with_stdin(&self, args: &[&str], stdin: &[u8]) -> Result<String, DirectoryError> {
        self.invoke(args, Some(stdin)).await
    }

    async fn invoke(&self, args: &[&str], stdin: Option<&[u8]>) -> Result<String, DirectoryError> {
        let program = self.binary.to_string_lossy();
        let full = self.command_args(args, stdin.is_some());
        let full: Vec<&str> = full.iter().map(String::as_str).collect();
        tracing::debug!(binary = %program, args = ?full, "running dirctl");

        let result = match stdin {
            Some(input) => self.runner.run_with_stdin(&program, &full, input).await,
            None => self.runner.run(&program, &full).await,
        };
        let output = result.map_err(|e| DirectoryError::Spawn {
            program: program.to_string(),
            message: format!("{e:#}"),
        })?;
        into_stdout(&output)
    }
}

fn into_stdout(output: &Output) -> Result<String, DirectoryError> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.trim().is_empty() {
        format!("dirctl exited with {}", output.status)
    } else {
        stderr.trim().to_string()
    };
    tracing::debug!(status = %output.status, %message, "dirctl failed");
    Err(DirectoryError::Tool { message })
}
