//! Resolving sessions and status from the session store.

use agentdir_cli::application::ports::SessionStore;
use agentdir_cli::application::services::session_service::{
    current_session, directory_context, directory_status,
};
use agentdir_cli::domain::config::{AgentdirConfig, DirectoryMode, SelectedOrganization};
use agentdir_cli::domain::session::{HubSession, SessionFile, SessionTokens};
use anyhow::Result;

use crate::helpers::jwt_expiring_at;

const HUB_URL: &str = "https://agent-directory.outshift.com";
const NOW_MS: i64 = 1_750_000_000_000;

enum FakeStore {
    Missing,
    Broken,
    With(SessionFile),
}

impl SessionStore for FakeStore {
    fn load(&self) -> Result<Option<SessionFile>> {
        match self {
            Self::Missing => Ok(None),
            Self::Broken => anyhow::bail!("cannot parse session.json"),
            Self::With(file) => Ok(Some(file.clone())),
        }
    }
}

fn store_with_token(url: &str, token: &str) -> FakeStore {
    let mut file = SessionFile::default();
    file.hub_sessions.insert(
        url.to_string(),
        HubSession {
            tokens: SessionTokens {
                access_token: token.to_string(),
                ..SessionTokens::default()
            },
            user: "ada".to_string(),
            auth_config: None,
        },
    );
    FakeStore::With(file)
}

#[test]
fn test_live_token_is_logged_in() {
    let token = jwt_expiring_at(NOW_MS / 1000 + 3600);
    let session = current_session(&store_with_token(HUB_URL, &token), HUB_URL, NOW_MS);
    assert!(session.logged_in);
    assert_eq!(session.bearer(), Some(token.as_str()));
    assert_eq!(session.user.as_deref(), Some("ada"));
}

#[test]
fn test_expired_token_is_not_logged_in() {
    let token = jwt_expiring_at(NOW_MS / 1000 - 1);
    let session = current_session(&store_with_token(HUB_URL, &token), HUB_URL, NOW_MS);
    assert!(!session.logged_in);
    assert!(session.bearer().is_none());
}

#[test]
fn test_session_for_other_url_is_ignored() {
    let token = jwt_expiring_at(NOW_MS / 1000 + 3600);
    let session = current_session(
        &store_with_token("https://other.example.com", &token),
        HUB_URL,
        NOW_MS,
    );
    assert!(!session.logged_in);
}

#[test]
fn test_missing_or_broken_store_is_anonymous() {
    assert!(!current_session(&FakeStore::Missing, HUB_URL, NOW_MS).logged_in);
    assert!(!current_session(&FakeStore::Broken, HUB_URL, NOW_MS).logged_in);
}

#[test]
fn test_context_carries_selected_organization() {
    let mut config = AgentdirConfig::default();
    config.organization = Some(SelectedOrganization {
        id: "org-1".to_string(),
        name: "Acme".to_string(),
    });
    let ctx = directory_context(&config, &FakeStore::Missing, NOW_MS);
    assert_eq!(ctx.organization_id(), Some("org-1"));
}

#[test]
fn test_status_for_saas_directory() {
    let token = jwt_expiring_at(NOW_MS / 1000 + 60);
    let status =
        directory_status(&AgentdirConfig::default(), &store_with_token(HUB_URL, &token), NOW_MS)
            .unwrap();
    assert_eq!(status.mode, DirectoryMode::Saas);
    assert_eq!(
        status.api_url.as_deref(),
        Some("https://api.agent-directory.outshift.com/")
    );
    assert!(status.logged_in);
    assert_eq!(status.user.as_deref(), Some("ada"));
}

#[test]
fn test_status_for_local_directory_ignores_sessions() {
    let mut config = AgentdirConfig::default();
    config.directory.url = "localhost:8888".to_string();
    let status = directory_status(&config, &FakeStore::Broken, NOW_MS).unwrap();
    assert_eq!(status.mode, DirectoryMode::Local);
    assert!(status.api_url.is_none());
    assert!(!status.logged_in);
}
