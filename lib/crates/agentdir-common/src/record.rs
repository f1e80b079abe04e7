//! Canonical record, schema revision `0.7.0`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::module::{
    LLM_TOOLS_MODULE_NAME, LlmToolsData, MCP_MODULE_NAME, MODEL_MODULE_NAME, McpData, ModelData,
    Module, ModulePayload, PROMPT_MODULE_NAME, PromptData,
};
use crate::serde_util::null_as_default;

/// Schema revision every [`Record`] is normalized to.
pub const OASF_RECORD_SCHEMA_VERSION: &str = "0.7.0";

/// Free-form string annotations carried by most OASF objects.
pub type StringMap = BTreeMap<String, String>;

// ── Schema tag ────────────────────────────────────────────────────────────────

/// The `schema_version` tag of a canonical record.
///
/// Serializes as `"0.7.0"` and refuses any other revision on input, so a
/// `Record` value can never claim to be something it is not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CanonicalSchema;

impl Serialize for CanonicalSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(OASF_RECORD_SCHEMA_VERSION)
    }
}

impl<'de> Deserialize<'de> for CanonicalSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag.trim_start_matches('v') == OASF_RECORD_SCHEMA_VERSION {
            Ok(Self)
        } else {
            Err(serde::de::Error::custom(format!(
                "unsupported schema_version {tag:?}, expected {OASF_RECORD_SCHEMA_VERSION:?}"
            )))
        }
    }
}

impl fmt::Display for CanonicalSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(OASF_RECORD_SCHEMA_VERSION)
    }
}

// ── Record ────────────────────────────────────────────────────────────────────

/// A canonical agent/service description record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
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
    pub locators: Vec<Locator>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modules: Vec<Module>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_record_cid: Option<String>,
    #[serde(default)]
    pub schema_version: CanonicalSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
}

impl Record {
    /// Create an empty record stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            annotations: StringMap::new(),
            authors: Vec::new(),
            created_at: Utc::now(),
            description: String::new(),
            domains: Vec::new(),
            locators: Vec::new(),
            modules: Vec::new(),
            name: name.into(),
            previous_record_cid: None,
            schema_version: CanonicalSchema,
            signature: None,
            skills: Vec::new(),
            version: version.into(),
        }
    }

    /// First module carrying `name`.
    ///
    /// Duplicates are not rejected: when a backend returns the same module
    /// twice, the earlier one wins.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }

    /// Whether a module named `name` is present, typed or not.
    #[must_use]
    pub fn has_module(&self, name: &str) -> bool {
        self.module(name).is_some()
    }

    /// Typed `runtime/mcp` payload of the first MCP module.
    #[must_use]
    pub fn mcp(&self) -> Option<&McpData> {
        match &self.module(MCP_MODULE_NAME)?.payload {
            ModulePayload::Mcp(data) => Some(data),
            _ => None,
        }
    }

    /// Typed `runtime/prompt` payload of the first prompt module.
    #[must_use]
    pub fn prompts(&self) -> Option<&PromptData> {
        match &self.module(PROMPT_MODULE_NAME)?.payload {
            ModulePayload::Prompt(data) => Some(data),
            _ => None,
        }
    }

    /// Typed `runtime/model` payload of the first model module.
    #[must_use]
    pub fn models(&self) -> Option<&ModelData> {
        match &self.module(MODEL_MODULE_NAME)?.payload {
            ModulePayload::Model(data) => Some(data),
            _ => None,
        }
    }

    /// Typed `runtime/llm_tools` payload of the first LLM-tools module.
    #[must_use]
    pub fn llm_tools(&self) -> Option<&LlmToolsData> {
        match &self.module(LLM_TOOLS_MODULE_NAME)?.payload {
            ModulePayload::LlmTools(data) => Some(data),
            _ => None,
        }
    }

    /// Serialize as the JSON payload handed to the registry tool.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Entry of the `domains` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: StringMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Domain {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Entry of the `skills` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: StringMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ── Locators ──────────────────────────────────────────────────────────────────

/// Where the artifact content described by a record lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: StringMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "type", default)]
    pub locator_type: LocatorType,
    pub url: String,
}

impl Locator {
    #[must_use]
    pub fn new(locator_type: LocatorType, url: impl Into<String>) -> Self {
        Self {
            annotations: StringMap::new(),
            digest: None,
            size: None,
            locator_type,
            url: url.into(),
        }
    }
}

/// Canonical locator type.
///
/// Unknown names are kept verbatim in [`LocatorType::Other`] so they survive a
/// round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LocatorType {
    Binary,
    DockerImage,
    HelmChart,
    PythonPackage,
    SourceCode,
    #[default]
    Unspecified,
    Other(String),
}

impl LocatorType {
    /// Canonical wire name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Binary => "binary",
            Self::DockerImage => "docker_image",
            Self::HelmChart => "helm_chart",
            Self::PythonPackage => "python_package",
            Self::SourceCode => "source_code",
            Self::Unspecified => "unspecified",
            Self::Other(name) => name,
        }
    }

    /// Parse a canonical name exactly. Anything else becomes `Other`.
    #[must_use]
    pub fn from_canonical(name: &str) -> Self {
        match name {
            "binary" => Self::Binary,
            "docker_image" => Self::DockerImage,
            "helm_chart" => Self::HelmChart,
            "python_package" => Self::PythonPackage,
            "source_code" => Self::SourceCode,
            "unspecified" => Self::Unspecified,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse any known spelling: canonical, kebab-case, or the enum style
    /// `LOCATOR_TYPE_DOCKER_IMAGE` used by older schema revisions.
    #[must_use]
    pub fn from_alias(name: &str) -> Self {
        let stripped = name.strip_prefix("LOCATOR_TYPE_").unwrap_or(name);
        let folded = stripped.to_ascii_lowercase().replace('-', "_");
        match Self::from_canonical(&folded) {
            Self::Other(_) => Self::Other(name.to_string()),
            known => known,
        }
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LocatorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LocatorType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_canonical(&name))
    }
}

// ── Signature ─────────────────────────────────────────────────────────────────

/// Detached signature attached by `sign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: StringMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_bundle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<String>,
}

// ── Unit tests ────────────────────────────────────────────────────────────────
