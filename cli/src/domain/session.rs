//! Hub session state written by `dirctl hub login`.
//!
//! Pure functions only. Reading the file lives in `infra::session`.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Contents of `~/.dirctl/session.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFile {
    /// Sessions keyed by the directory URL they were opened against.
    #[serde(default)]
    pub hub_sessions: HashMap<String, HubSession>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubSession {
    #[serde(default)]
    pub tokens: SessionTokens,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub auth_config: Option<AuthConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTokens {
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub client_id: String,
    pub product_id: String,
    pub idp_frontend: String,
    pub idp_backend: String,
    pub idp_issuer: String,
    pub hub_backend: String,
    pub api_key_client_id: String,
}

impl SessionFile {
    /// The session stored for `directory_url`, if any.
    #[must_use]
    pub fn session_for(&self, directory_url: &str) -> Option<&HubSession> {
        self.hub_sessions.get(directory_url)
    }
}

/// Expiry (`exp`, seconds since the epoch) carried in a JWT payload.
///
/// Only the second dot-separated segment is read. Returns `None` unless it is
/// base64url JSON holding a numeric `exp`; fractional NumericDates count.
#[must_use]
pub fn token_expiry(token: &str) -> Option<f64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_f64()
}

/// Whether `token` is still valid at `now_ms` (milliseconds since the epoch).
#[must_use]
#[allow(clippy::cast_precision_loss)] // epoch milliseconds fit an f64 mantissa
pub fn is_token_live(token: &str, now_ms: i64) -> bool {
    token_expiry(token).is_some_and(|exp| exp * 1000.0 > now_ms as f64)
}

/// Snapshot of the caller's hub credentials for one directory URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<String>,
    pub access_token: Option<String>,
    pub logged_in: bool,
}

impl Session {
    /// No credentials at all.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolve the session for `directory_url` from a parsed session file.
    #[must_use]
    pub fn resolve(file: Option<&SessionFile>, directory_url: &str, now_ms: i64) -> Self {
        let Some(hub) = file.and_then(|f| f.session_for(directory_url)) else {
            return Self::anonymous();
        };
        let token = hub.tokens.access_token.trim();
        if token.is_empty() {
            return Self::anonymous();
        }
        Self {
            user: (!hub.user.is_empty()).then(|| hub.user.clone()),
            access_token: Some(token.to_string()),
            logged_in: is_token_live(token, now_ms),
        }
    }

    /// The token to send as a bearer credential. Expired tokens are withheld.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        if self.logged_in {
            self.access_token.as_deref()
        } else {
            None
        }
    }
}
