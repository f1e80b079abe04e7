//! Directory backends and the factory that picks one from configuration.

pub mod local;
pub mod saas;

use std::path::Path;
use std::time::Duration;

use agentdir_common::Record;

use crate::application::ports::{CommandRunner, Directory};
use crate::domain::config::{AgentdirConfig, DirectoryMode};
use crate::domain::directory::{DirectoryContext, SearchRequest, SearchResults};
use crate::domain::error::DirectoryError;
use crate::domain::hub::OrganizationsResponse;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::dirctl::Dirctl;
use crate::infra::hub_client::HubClient;

pub use local::LocalDirectory;
pub use saas::SaasDirectory;

/// A directory of either kind.
pub enum AnyDirectory<R: CommandRunner> {
    Local(LocalDirectory<R>),
    Saas(SaasDirectory<R>),
}

impl<R: CommandRunner> AnyDirectory<R> {
    #[must_use]
    pub fn mode(&self) -> DirectoryMode {
        match self {
            Self::Local(_) => DirectoryMode::Local,
            Self::Saas(_) => DirectoryMode::Saas,
        }
    }

    /// Organizations of the logged-in user. Only the hub has organizations.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] for a local directory, or the
    /// listing error.
    pub async fn organizations(
        &self,
        ctx: &DirectoryContext,
    ) -> Result<OrganizationsResponse, DirectoryError> {
        match self {
            Self::Local(_) => Err(DirectoryError::Config(
                "Organizations are only available for an http(s) directory URL.".to_string(),
            )),
            Self::Saas(dir) => dir.organizations(ctx).await,
        }
    }
}

impl<R: CommandRunner> Directory for AnyDirectory<R> {
    async fn login(&self, ctx: &DirectoryContext) -> Result<String, DirectoryError> {
        match self {
            Self::Local(dir) => dir.login(ctx).await,
            Self::Saas(dir) => dir.login(ctx).await,
        }
    }

    async fn logout(&self, ctx: &DirectoryContext) -> Result<String, DirectoryError> {
        match self {
            Self::Local(dir) => dir.logout(ctx).await,
            Self::Saas(dir) => dir.logout(ctx).await,
        }
    }

    async fn search(
        &self,
        ctx: &DirectoryContext,
        request: &SearchRequest,
    ) -> Result<SearchResults, DirectoryError> {
        match self {
            Self::Local(dir) => dir.search(ctx, request).await,
            Self::Saas(dir) => dir.search(ctx, request).await,
        }
    }

    async fn push(&self, ctx: &DirectoryContext, record: &Record) -> Result<String, DirectoryError> {
        match self {
            Self::Local(dir) => dir.push(ctx, record).await,
            Self::Saas(dir) => dir.push(ctx, record).await,
        }
    }

    async fn sign(&self, ctx: &DirectoryContext, digest: &str) -> Result<String, DirectoryError> {
        match self {
            Self::Local(dir) => dir.sign(ctx, digest).await,
            Self::Saas(dir) => dir.sign(ctx, digest).await,
        }
    }

    async fn pull(&self, ctx: &DirectoryContext, digest: &str) -> Result<Record, DirectoryError> {
        match self {
            Self::Local(dir) => dir.pull(ctx, digest).await,
            Self::Saas(dir) => dir.pull(ctx, digest).await,
        }
    }
}

/// Open the directory `config` points at, running `dirctl` with tokio.
///
/// # Errors
///
/// Returns [`DirectoryError::Config`] when required settings are missing.
pub fn open(config: &AgentdirConfig) -> Result<AnyDirectory<TokioCommandRunner>, DirectoryError> {
    open_with(config, TokioCommandRunner, dirs::home_dir().as_deref())
}

/// Open the directory `config` points at with an explicit runner and home
/// directory. Performs no I/O.
///
/// # Errors
///
/// Returns [`DirectoryError::Config`] when required settings are missing.
pub fn open_with<R: CommandRunner>(
    config: &AgentdirConfig,
    runner: R,
    home: Option<&Path>,
) -> Result<AnyDirectory<R>, DirectoryError> {
    let url = config.directory_url()?;
    let binary = config.dirctl_binary(home)?;
    let dirctl = Dirctl::new(runner, binary, url);

    match DirectoryMode::detect(url) {
        DirectoryMode::Local => Ok(AnyDirectory::Local(LocalDirectory::new(dirctl))),
        DirectoryMode::Saas => {
            let hub = HubClient::new(
                &config.api_url()?,
                Duration::from_secs(config.http.timeout_secs),
            )?;
            Ok(AnyDirectory::Saas(
                SaasDirectory::new(dirctl, hub).with_listing(config.directory.listing),
            ))
        }
    }
}
