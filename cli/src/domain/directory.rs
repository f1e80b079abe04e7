//! Backend-neutral values passed to and returned by a directory.

use agentdir_common::Record;
use serde::Serialize;

use crate::domain::config::{DirectoryMode, SelectedOrganization};
use crate::domain::hub::RecordFilter;
use crate::domain::session::Session;

/// Caller state a directory call may need. Built fresh per command.
#[derive(Debug, Clone, Default)]
pub struct DirectoryContext {
    pub organization: Option<SelectedOrganization>,
    pub session: Session,
}

impl DirectoryContext {
    #[must_use]
    pub fn organization_id(&self) -> Option<&str> {
        self.organization
            .as_ref()
            .map(|o| o.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// What `agentdir status` reports about the configured directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStatus {
    pub mode: DirectoryMode,
    pub directory_url: String,
    /// REST API base; SaaS mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<SelectedOrganization>,
}

/// How to find a stored record again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordRef {
    /// Content identifier (local CID or hub digest).
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl RecordRef {
    #[must_use]
    pub fn digest(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query micro-language for the local backend, free text for SaaS.
    pub term: String,
    pub filter: RecordFilter,
    pub oldest_first: bool,
    pub owned_only: bool,
}

impl SearchRequest {
    #[must_use]
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }
}

/// Records and their references, index-aligned.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    records: Vec<Record>,
    refs: Vec<RecordRef>,
}

impl SearchResults {
    pub fn push(&mut self, record: Record, reference: RecordRef) {
        self.records.push(record);
        self.refs.push(reference);
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn refs(&self) -> &[RecordRef] {
        &self.refs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Record, &RecordRef)> {
        self.records.iter().zip(&self.refs)
    }
}

impl FromIterator<(Record, RecordRef)> for SearchResults {
    fn from_iter<I: IntoIterator<Item = (Record, RecordRef)>>(iter: I) -> Self {
        let mut results = Self::default();
        for (record, reference) in iter {
            results.push(record, reference);
        }
        results
    }
}
