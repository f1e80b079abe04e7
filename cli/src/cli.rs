//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, ConfigOverrides, OutputFlags};
use crate::commands;
use crate::output::{OutputContext, Renderer};

/// Search, publish and import records in an OASF agent directory
#[derive(Parser)]
#[command(
    name = "agentdir",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Answer prompts with their default
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Directory address for this invocation: `host:port` for a local
    /// registry, an http(s) URL for the hub
    #[arg(long, global = true, env = "AGENTDIR_DIRECTORY_URL")]
    pub directory_url: Option<String>,

    /// Path to the dirctl binary for this invocation
    #[arg(long, global = true, env = "AGENTDIR_DIRCTL_BINARY")]
    pub dirctl_binary: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in to the directory
    Login,

    /// Log out of the directory
    Logout,

    /// Search records
    Search(commands::search::SearchArgs),

    /// Fetch a record
    Pull(commands::record::PullArgs),

    /// Publish a record
    Push(commands::record::PushArgs),

    /// Sign a published record
    Sign(commands::record::SignArgs),

    /// Manage hub organizations
    #[command(subcommand)]
    Org(commands::org::OrgCommand),

    /// Turn a record into an editor artifact
    #[command(subcommand)]
    Import(commands::import::ImportCommand),

    /// Convert local files between chat modes and records
    #[command(subcommand)]
    Convert(commands::convert::ConvertCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show directory and session status
    Status,

    /// Show version
    Version,
}

impl Cli {
    /// Flags for `AppContext::new`.
    #[must_use]
    pub fn app_flags(&self) -> AppFlags {
        AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                json: self.json,
            },
            behaviour: BehaviourFlags { yes: self.yes },
            overrides: ConfigOverrides {
                directory_url: self.directory_url.clone(),
                dirctl_binary: self.dirctl_binary.clone(),
            },
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        if matches!(self.command, Command::Version) {
            let output = OutputContext::new(self.no_color, self.quiet);
            return commands::version::run(&Renderer::new(&output, self.json));
        }

        let app = AppContext::new(&self.app_flags())?;
        match self.command {
            Command::Login => commands::auth::login(&app).await,
            Command::Logout => commands::auth::logout(&app).await,
            Command::Search(args) => commands::search::run(&app, &args).await,
            Command::Pull(args) => commands::record::pull(&app, &args).await,
            Command::Push(args) => commands::record::push(&app, &args).await,
            Command::Sign(args) => commands::record::sign(&app, &args).await,
            Command::Org(cmd) => commands::org::run(&app, cmd).await,
            Command::Import(cmd) => commands::import::run(&app, cmd).await,
            Command::Convert(cmd) => commands::convert::run(&app, cmd),
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Status => commands::status::run(&app),
            Command::Version => commands::version::run(&app.renderer()),
        }
    }
}
