//! Domain types and validators for agentdir configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::{ConfigError, DirectoryError};
use crate::domain::hub::ListingGeneration;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_DIRECTORY_URL: &str = "https://agent-directory.outshift.com";
pub const DEFAULT_DIRCTL_BINARY: &str = "~/.agntcy/bin/dirctl";
pub const DEFAULT_SESSION_FILE: &str = "~/.dirctl/session.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "directory.url",
    "directory.api-url",
    "directory.listing",
    "dirctl.binary",
    "session.file",
    "http.timeout-secs",
    "organization.id",
    "organization.name",
];

/// Deployments whose REST API does not live at `api.<host>`.
const KNOWN_API_ENDPOINTS: &[(&str, &str)] = &[
    (
        "https://phoenix.dev.outshift.ai",
        "https://saas.agent-directory.dev.outshift.ai",
    ),
    (
        "https://phoenix.staging.outshift.ai",
        "https://saas.phoenix.staging.outshift.ai/rest",
    ),
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.agentdir/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentdirConfig {
    pub directory: DirectorySettings,
    pub dirctl: DirctlSettings,
    pub session: SessionSettings,
    pub http: HttpSettings,
    /// Organization selected with `agentdir org select`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<SelectedOrganization>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySettings {
    /// Registry address: an `http(s)://` URL selects SaaS mode, anything
    /// else (e.g. `localhost:8888`) selects the local `dirctl` backend.
    pub url: String,
    /// REST API base; derived from `url` when unset.
    #[serde(rename = "api-url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Hub listing used by SaaS searches.
    pub listing: ListingGeneration,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DIRECTORY_URL.to_string(),
            api_url: None,
            listing: ListingGeneration::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirctlSettings {
    pub binary: String,
}

impl Default for DirctlSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_DIRCTL_BINARY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub file: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            file: DEFAULT_SESSION_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedOrganization {
    pub id: String,
    pub name: String,
}

impl AgentdirConfig {
    /// The configured registry address.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] when the address is blank.
    pub fn directory_url(&self) -> Result<&str, DirectoryError> {
        let url = self.directory.url.trim();
        if url.is_empty() {
            return Err(DirectoryError::Config(
                "directoryURL is not configured.".to_string(),
            ));
        }
        Ok(url)
    }

    /// The `dirctl` binary with `~` expanded against `home`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] when the binary path is blank.
    pub fn dirctl_binary(&self, home: Option<&Path>) -> Result<PathBuf, DirectoryError> {
        let binary = self.dirctl.binary.trim();
        if binary.is_empty() {
            return Err(DirectoryError::Config(
                "dirctlBinary is not configured.".to_string(),
            ));
        }
        Ok(expand_home(binary, home))
    }

    #[must_use]
    pub fn session_file(&self, home: Option<&Path>) -> PathBuf {
        expand_home(&self.session.file, home)
    }

    /// REST API base for SaaS mode: the explicit override, or one derived
    /// from the directory URL.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] when no API URL can be derived.
    pub fn api_url(&self) -> Result<String, DirectoryError> {
        match self.directory.api_url.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => Ok(explicit.to_string()),
            _ => api_url_for(self.directory_url()?),
        }
    }

    /// Selected organization id, if one is set.
    #[must_use]
    pub fn organization_id(&self) -> Option<&str> {
        self.organization
            .as_ref()
            .map(|o| o.id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Apply one validated `key = value` setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "directory.url" => self.directory.url = value.to_string(),
            "directory.api-url" => {
                self.directory.api_url = (!value.is_empty()).then(|| value.to_string());
            }
            "directory.listing" => {
                self.directory.listing = ListingGeneration::parse(value)
                    .ok_or_else(|| anyhow::anyhow!("Unknown listing: {value}"))?;
            }
            "dirctl.binary" => self.dirctl.binary = value.to_string(),
            "session.file" => self.session.file = value.to_string(),
            "http.timeout-secs" => self.http.timeout_secs = value.parse()?,
            "organization.id" => {
                self.organization.get_or_insert_with(SelectedOrganization::default).id =
                    value.to_string();
            }
            "organization.name" => {
                self.organization.get_or_insert_with(SelectedOrganization::default).name =
                    value.to_string();
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Directory mode ───────────────────────────────────────────────────────────

/// Which backend a registry address selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryMode {
    /// A `dirctl`-managed registry addressed as `host:port`.
    Local,
    /// The hosted directory, addressed by an `http(s)://` URL.
    Saas,
}

impl DirectoryMode {
    /// SaaS iff `url` parses as an absolute `http` or `https` URL.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        match Url::parse(url.trim()) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Self::Saas,
            _ => Self::Local,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Saas => "saas",
        }
    }
}

/// Derive the REST API base from a SaaS directory URL.
///
/// Known deployments map to fixed endpoints; any other host gains an `api.`
/// prefix, keeping scheme, port and path.
///
/// # Errors
///
/// Returns [`DirectoryError::Config`] if `directory_url` has no host.
pub fn api_url_for(directory_url: &str) -> Result<String, DirectoryError> {
    if let Some((_, api)) = KNOWN_API_ENDPOINTS
        .iter()
        .find(|(prefix, _)| directory_url.starts_with(prefix))
    {
        return Ok((*api).to_string());
    }

    let invalid = || DirectoryError::Config(format!("cannot derive API URL from {directory_url}"));
    let mut parsed = Url::parse(directory_url).map_err(|_| invalid())?;
    let host = parsed.host_str().ok_or_else(invalid)?.to_string();
    parsed
        .set_host(Some(&format!("api.{host}")))
        .map_err(|_| invalid())?;
    Ok(parsed.to_string())
}

/// Expand a leading `~` against `home`. Paths without one are returned as is.
#[must_use]
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches(['/', '\\'])),
        _ => PathBuf::from(path),
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    match key {
        "directory.url" | "dirctl.binary" | "session.file" if value.trim().is_empty() => {
            Err(invalid("Value must not be empty.").into())
        }
        "directory.api-url" if !value.is_empty() && DirectoryMode::detect(value) != DirectoryMode::Saas => {
            Err(invalid("Expected an http:// or https:// URL.").into())
        }
        "directory.listing" if ListingGeneration::parse(value).is_none() => {
            Err(invalid("Expected repositories or records.").into())
        }
        "http.timeout-secs" if !value.parse::<u64>().is_ok_and(|secs| secs > 0) => {
            Err(invalid("Expected a positive number of seconds.").into())
        }
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
