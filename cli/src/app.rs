//! Application context: unified state passed to every command handler.
//!
//! `AppContext` carries the output context, the effective configuration and
//! the stores commands read from. Backends are opened per command through
//! [`AppContext::directory`].

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::application::services::session_service;
use crate::domain::config::AgentdirConfig;
use crate::domain::directory::DirectoryContext;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::directory::{self, AnyDirectory};
use crate::infra::session::SessionFileStore;
use crate::output::{OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `AGENTDIR_YES` env vars).
    pub yes: bool,
}

/// Settings given on the command line or through the environment. They win
/// over the configuration file and are never persisted.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub directory_url: Option<String>,
    pub dirctl_binary: Option<String>,
}

impl ConfigOverrides {
    /// Apply the non-blank overrides to `config`.
    pub fn apply(&self, config: &mut AgentdirConfig) {
        if let Some(url) = self.directory_url.as_deref().filter(|v| !v.trim().is_empty()) {
            config.directory.url = url.to_string();
        }
        if let Some(binary) = self.dirctl_binary.as_deref().filter(|v| !v.trim().is_empty()) {
            config.dirctl.binary = binary.to_string();
        }
    }
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// Configuration overrides.
    pub overrides: ConfigOverrides,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where configuration is read from and saved to.
    pub config_store: YamlConfigStore,
    /// Configuration file merged with the overrides.
    pub config: AgentdirConfig,
    /// The `dirctl` session file.
    pub session_store: SessionFileStore,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `AGENTDIR_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        Self::with_store(flags, YamlConfigStore::new())
    }

    /// Construct an `AppContext` reading configuration from `config_store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn with_store(flags: &AppFlags, config_store: YamlConfigStore) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("AGENTDIR_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let mut config = config_store.load().context("cannot load configuration")?;
        flags.overrides.apply(&mut config);
        let session_store = SessionFileStore::new(config.session_file(dirs::home_dir().as_deref()));

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store,
            config,
            session_store,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.output, self.is_json())
    }

    /// Open the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error when required settings are missing.
    pub fn directory(&self) -> Result<AnyDirectory<TokioCommandRunner>> {
        Ok(directory::open(&self.config)?)
    }

    /// Per-call context: selected organization and current session.
    #[must_use]
    pub fn context(&self) -> DirectoryContext {
        session_service::directory_context(&self.config, &self.session_store, now_ms())
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `AGENTDIR_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
