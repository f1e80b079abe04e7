//! HTTP client for the hub REST API.

use std::time::Duration;

use reqwest::{Client, Response, header};
use serde::de::DeserializeOwned;

use crate::domain::error::DirectoryError;
use crate::domain::hub::{
    HubRecord, ListingQuery, OrganizationsResponse, RecordsResponse, RepositoriesResponse,
    Repository, organizations_endpoint,
};

/// Read-only client for record, repository and organization listings.
#[derive(Debug, Clone)]
pub struct HubClient {
    api_base: String,
    client: Client,
}

impl HubClient {
    /// Create a client for `api_base` (a trailing `/` is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if the HTTP client cannot be built.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, DirectoryError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// List records, newest first unless `query.oldest_first`. Backs SaaS
    /// searches when `directory.listing` is `records`.
    pub async fn list_records(
        &self,
        query: &ListingQuery,
        token: Option<&str>,
    ) -> Result<Vec<HubRecord>, DirectoryError> {
        let response: RecordsResponse = self
            .get(&query.records_endpoint(), &query.record_params(), token)
            .await?;
        Ok(response.records)
    }

    /// List repositories, each carrying its records newest first.
    pub async fn list_repositories(
        &self,
        query: &ListingQuery,
        token: Option<&str>,
    ) -> Result<Vec<Repository>, DirectoryError> {
        let response: RepositoriesResponse = self
            .get(&query.repositories_endpoint(), &query.repository_params(), token)
            .await?;
        Ok(response.repositories)
    }

    /// List the organizations the caller belongs to.
    pub async fn list_organizations(
        &self,
        token: Option<&str>,
    ) -> Result<OrganizationsResponse, DirectoryError> {
        if token.is_none() {
            tracing::warn!("listing organizations without a live session; run `agentdir login`");
        }
        self.get(&organizations_endpoint(), &[], token).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        token: Option<&str>,
    ) -> Result<T, DirectoryError> {
        let url = format!("{}{endpoint}", self.api_base);
        tracing::debug!(%url, ?params, authenticated = token.is_some(), "hub request");

        let mut request = self.client.get(&url).query(params);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| DirectoryError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        Self::handle_response(&url, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        url: &str,
        response: Response,
    ) -> Result<T, DirectoryError> {
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.map_err(|e| DirectoryError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(error = %e, "hub response is not the expected JSON");
            DirectoryError::Api {
                status: status.as_u16(),
                status_text,
                body,
            }
        })
    }
}
