//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AgentdirConfig, SelectedOrganization};

/// Validate and persist one `key = value` setting.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AgentdirConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}

/// Persist the organization that scopes SaaS searches. `None` clears it.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn select_organization(
    store: &impl ConfigStore,
    organization: Option<SelectedOrganization>,
) -> Result<()> {
    let mut config = store.load()?;
    config.organization = organization;
    store.save(&config)
}
