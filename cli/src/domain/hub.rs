//! Hub REST API wire types and listing queries.
//!
//! Everything here is camelCase on the wire. A missing or `null` field
//! reads as its default. Transport lives in `infra::hub_client`.

use agentdir_common::{Locator, LocatorType, Module, Record, null_as_default};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API version prefix shared by every endpoint.
pub const API_PREFIX: &str = "/v1alpha1";

/// Records requested per listing call. Only the first page is fetched.
pub const PAGE_SIZE: u32 = 100;

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HubLocator {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub locator_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// A record summary as listed by the hub.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HubRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub digest: String,
    /// Module names only; the hub does not list module data.
    #[serde(deserialize_with = "null_as_default")]
    pub extensions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub locators: Vec<HubLocator>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repository_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organization_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub private: bool,
    /// Newest first.
    #[serde(deserialize_with = "null_as_default")]
    pub records: Vec<HubRecord>,
    #[serde(deserialize_with = "null_as_default")]
    pub repo_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginatedResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub records: Vec<HubRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoriesResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationMembership {
    #[serde(deserialize_with = "null_as_default")]
    pub organization: Organization,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub paginated_response: PaginatedResponse,
    #[serde(deserialize_with = "null_as_default")]
    pub organizations: Vec<OrganizationMembership>,
}

// ── Translation ──────────────────────────────────────────────────────────────

impl From<&HubRecord> for Record {
    fn from(hub: &HubRecord) -> Self {
        let created_at = DateTime::parse_from_rfc3339(&hub.created_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default();
        let mut record = Record::new(hub.name.clone(), hub.version.clone());
        record.authors.clone_from(&hub.authors);
        record.created_at = created_at;
        record.description.clone_from(&hub.description);
        record.locators = hub
            .locators
            .iter()
            .map(|l| Locator::new(LocatorType::from_alias(&l.locator_type), l.url.clone()))
            .collect();
        record.modules = hub
            .extensions
            .iter()
            .map(|name| Module::from_parts(name.clone(), Value::Null))
            .collect();
        record
    }
}

// ── Listing queries ──────────────────────────────────────────────────────────

/// Record-type filter for repository listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordFilter {
    #[default]
    All,
    Mcps,
    Agents,
}

impl RecordFilter {
    /// Value of `filters.repoType`, or `None` for no filter.
    #[must_use]
    pub fn repo_type(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Mcps => Some("mcp"),
            Self::Agents => Some("agent"),
        }
    }
}

/// Which hub listing backs a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingGeneration {
    /// `/repositories`: the newest record of each repository, with the
    /// owned-only and record-type filters.
    #[default]
    Repositories,
    /// `/records`: every record, with no owned-only or type filter.
    Records,
}

impl ListingGeneration {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "repositories" => Some(Self::Repositories),
            "records" => Some(Self::Records),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Repositories => "repositories",
            Self::Records => "records",
        }
    }
}

/// Arguments shared by the record and repository listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Free text sent as `filters.searchQuery`; omitted when empty.
    pub search_term: String,
    pub oldest_first: bool,
    pub owned_only: bool,
    pub filter: RecordFilter,
    /// Scopes the listing to one organization when set.
    pub organization_id: Option<String>,
}

impl ListingQuery {
    /// Whether this listing must be sent with credentials.
    #[must_use]
    pub fn is_scoped(&self) -> bool {
        self.organization_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    fn scoped_endpoint(&self, collection: &str) -> String {
        match self.organization_id.as_deref().filter(|id| !id.is_empty()) {
            Some(org) => format!("{API_PREFIX}/organizations/{org}/{collection}"),
            None => format!("{API_PREFIX}/{collection}"),
        }
    }

    #[must_use]
    pub fn records_endpoint(&self) -> String {
        self.scoped_endpoint("records")
    }

    #[must_use]
    pub fn repositories_endpoint(&self) -> String {
        self.scoped_endpoint("repositories")
    }

    /// Query parameters for the records listing.
    #[must_use]
    pub fn record_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("pagination.pageSize".to_string(), PAGE_SIZE.to_string()),
            ("order.orderBy".to_string(), "createdAt".to_string()),
        ];
        if !self.search_term.is_empty() {
            params.push(("filters.searchQuery".to_string(), self.search_term.clone()));
        }
        if self.oldest_first {
            params.push(("order.order".to_string(), "ORDER_ASC".to_string()));
        }
        params
    }

    /// Query parameters for the repositories listing.
    #[must_use]
    pub fn repository_params(&self) -> Vec<(String, String)> {
        let mut params = self.record_params();
        if self.owned_only {
            params.push(("filters.ownedOnly".to_string(), "true".to_string()));
        }
        if let Some(repo_type) = self.filter.repo_type() {
            params.push(("filters.repoType".to_string(), repo_type.to_string()));
        }
        params
    }
}

/// Endpoint listing the caller's organizations.
#[must_use]
pub fn organizations_endpoint() -> String {
    format!("{API_PREFIX}/organizations")
}
