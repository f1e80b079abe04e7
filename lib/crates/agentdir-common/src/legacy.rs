//! Schema revision `v0.6.0`: read path only.
//!
//! This revision calls module blocks `extensions` and requires every
//! signature field. It is converted into a canonical [`Record`] on read and
//! is never serialized back.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::module::Module;
use crate::record::{
    CanonicalSchema, Domain, Locator, LocatorType, Record, Signature, Skill, StringMap,
};
use crate::serde_util::null_as_default;

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: StringMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<Domain>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extensions: Vec<LegacyExtension>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locators: Vec<LegacyLocator>,
    pub name: String,
    #[serde(default)]
    pub previous_record_cid: Option<String>,
    #[serde(default)]
    pub schema_url: Option<String>,
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub signature: Option<LegacySignature>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyExtension {
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: StringMap,
    #[serde(default)]
    pub data: Value,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyLocator {
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: StringMap,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "type", default)]
    pub locator_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacySignature {
    pub algorithm: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: StringMap,
    pub certificate: String,
    pub content_bundle: String,
    pub content_type: String,
    pub signature: String,
    pub signed_at: String,
}

impl From<LegacyRecord> for Record {
    fn from(legacy: LegacyRecord) -> Self {
        Self {
            annotations: legacy.annotations,
            authors: legacy.authors,
            created_at: legacy.created_at,
            description: legacy.description,
            domains: legacy.domains,
            locators: legacy.locators.into_iter().map(Locator::from).collect(),
            modules: legacy.extensions.into_iter().map(Module::from).collect(),
            name: legacy.name,
            previous_record_cid: legacy.previous_record_cid,
            schema_version: CanonicalSchema,
            signature: legacy.signature.map(Signature::from),
            skills: legacy.skills,
            version: legacy.version,
        }
    }
}

// The extension `version` has no counterpart on canonical modules and is dropped.
impl From<LegacyExtension> for Module {
    fn from(extension: LegacyExtension) -> Self {
        let mut module = Module::from_parts(extension.name, extension.data);
        module.annotations = extension.annotations;
        module
    }
}

impl From<LegacyLocator> for Locator {
    fn from(locator: LegacyLocator) -> Self {
        let locator_type = if locator.locator_type.is_empty() {
            LocatorType::Unspecified
        } else {
            LocatorType::from_alias(&locator.locator_type)
        };
        Self {
            annotations: locator.annotations,
            digest: locator.digest,
            size: locator.size,
            locator_type,
            url: locator.url,
        }
    }
}

impl From<LegacySignature> for Signature {
    fn from(sig: LegacySignature) -> Self {
        Self {
            algorithm: Some(sig.algorithm),
            annotations: sig.annotations,
            certificate: Some(sig.certificate),
            content_bundle: Some(sig.content_bundle),
            content_type: Some(sig.content_type),
            signature: sig.signature,
            signed_at: Some(sig.signed_at),
        }
    }
}
