//! Revision-aware record reading.

use serde_json::Value;
use thiserror::Error;

use crate::legacy::LegacyRecord;
use crate::record::Record;

/// Errors raised while reading a record document.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported record schema_version {0:?}")]
    UnsupportedSchema(String),

    #[error("record document must be a JSON object")]
    NotAnObject,
}

/// Schema revisions this crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRevision {
    /// `v0.6.0`, blocks named `extensions`.
    V060,
    /// `0.7.0`, blocks named `modules`. The canonical revision.
    V070,
}

impl SchemaRevision {
    /// Detect the revision of a raw document.
    ///
    /// The `schema_version` tag decides when present (a leading `v` is
    /// ignored). Without a tag, a document with an `extensions` field is
    /// treated as `v0.6.0`.
    pub fn detect(document: &Value) -> Result<Self, RecordError> {
        let object = document.as_object().ok_or(RecordError::NotAnObject)?;
        match object.get("schema_version").and_then(Value::as_str) {
            Some(tag) => match tag.trim_start_matches('v') {
                "0.6.0" => Ok(Self::V060),
                "0.7.0" => Ok(Self::V070),
                _ => Err(RecordError::UnsupportedSchema(tag.to_string())),
            },
            None if object.contains_key("extensions") => Ok(Self::V060),
            None => Ok(Self::V070),
        }
    }
}

/// A record as read from a backend, in whichever revision it was written.
#[derive(Debug, Clone)]
pub enum RecordDocument {
    Current(Record),
    Legacy(LegacyRecord),
}

impl RecordDocument {
    pub fn from_value(document: Value) -> Result<Self, RecordError> {
        match SchemaRevision::detect(&document)? {
            SchemaRevision::V060 => Ok(Self::Legacy(serde_json::from_value(document)?)),
            SchemaRevision::V070 => Ok(Self::Current(serde_json::from_value(document)?)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn revision(&self) -> SchemaRevision {
        match self {
            Self::Current(_) => SchemaRevision::V070,
            Self::Legacy(_) => SchemaRevision::V060,
        }
    }

    /// Normalize into the canonical revision.
    #[must_use]
    pub fn into_record(self) -> Record {
        match self {
            Self::Current(record) => record,
            Self::Legacy(legacy) => legacy.into(),
        }
    }
}

/// Read a record document of any supported revision as a canonical [`Record`].
pub fn normalize(json: &str) -> Result<Record, RecordError> {
    RecordDocument::from_json(json).map(RecordDocument::into_record)
}
