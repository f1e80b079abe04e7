//! Application service: resolving the caller's hub session.

use crate::application::ports::SessionStore;
use crate::domain::config::{AgentdirConfig, DirectoryMode};
use crate::domain::directory::{DirectoryContext, DirectoryStatus};
use crate::domain::error::DirectoryError;
use crate::domain::session::Session;

/// Resolve the session for `directory_url`.
///
/// A missing or unreadable session file means "not logged in"; it never
/// fails the calling command.
pub fn current_session(store: &impl SessionStore, directory_url: &str, now_ms: i64) -> Session {
    match store.load() {
        Ok(file) => Session::resolve(file.as_ref(), directory_url, now_ms),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable session file");
            Session::anonymous()
        }
    }
}

/// Build the per-call context from configuration and the session store.
pub fn directory_context(
    config: &AgentdirConfig,
    store: &impl SessionStore,
    now_ms: i64,
) -> DirectoryContext {
    let session = config
        .directory_url()
        .map(|url| current_session(store, url, now_ms))
        .unwrap_or_default();
    DirectoryContext {
        organization: config.organization.clone(),
        session,
    }
}

/// Describe the configured directory and the caller's login state.
///
/// # Errors
///
/// Returns [`DirectoryError::Config`] when no directory URL is configured,
/// or a SaaS API URL cannot be derived.
pub fn directory_status(
    config: &AgentdirConfig,
    store: &impl SessionStore,
    now_ms: i64,
) -> Result<DirectoryStatus, DirectoryError> {
    let url = config.directory_url()?;
    let mode = DirectoryMode::detect(url);
    let api_url = match mode {
        DirectoryMode::Saas => Some(config.api_url()?),
        DirectoryMode::Local => None,
    };
    let session = match mode {
        DirectoryMode::Saas => current_session(store, url, now_ms),
        DirectoryMode::Local => Session::anonymous(),
    };
    Ok(DirectoryStatus {
        mode,
        directory_url: url.to_string(),
        api_url,
        logged_in: session.logged_in,
        user: session.user,
        organization: config.organization.clone(),
    })
}
