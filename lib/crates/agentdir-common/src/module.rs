//! Record modules: named capability blocks attached to a record.
//!
//! Well-known names get a typed payload. Anything else, including a
//! well-known name whose data does not fit the typed shape, is carried as
//! [`ModulePayload::Opaque`] so that translation never fails on a module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::StringMap;
use crate::serde_util::null_as_default;

pub const MCP_MODULE_NAME: &str = "runtime/mcp";
pub const PROMPT_MODULE_NAME: &str = "runtime/prompt";
pub const MODEL_MODULE_NAME: &str = "runtime/model";
pub const LLM_TOOLS_MODULE_NAME: &str = "runtime/llm_tools";

// ── Module ────────────────────────────────────────────────────────────────────

/// A module block of a canonical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawModule", into = "RawModule")]
pub struct Module {
    pub id: Option<u64>,
    pub annotations: StringMap,
    pub payload: ModulePayload,
}

impl Module {
    #[must_use]
    pub fn new(payload: ModulePayload) -> Self {
        Self {
            id: None,
            annotations: StringMap::new(),
            payload,
        }
    }

    /// Build a module from its wire name and data, typing the payload when
    /// the name is well known and the data fits.
    #[must_use]
    pub fn from_parts(name: String, data: Value) -> Self {
        Self::new(ModulePayload::from_parts(name, data))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.payload.name()
    }
}

/// Payload of a module, keyed by its well-known name.
#[derive(Debug, Clone, PartialEq)]
pub enum ModulePayload {
    Mcp(McpData),
    Prompt(PromptData),
    Model(ModelData),
    LlmTools(LlmToolsData),
    Opaque { name: String, data: Value },
}

impl ModulePayload {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Mcp(_) => MCP_MODULE_NAME,
            Self::Prompt(_) => PROMPT_MODULE_NAME,
            Self::Model(_) => MODEL_MODULE_NAME,
            Self::LlmTools(_) => LLM_TOOLS_MODULE_NAME,
            Self::Opaque { name, .. } => name,
        }
    }

    #[must_use]
    pub fn from_parts(name: String, data: Value) -> Self {
        let typed = match name.as_str() {
            MCP_MODULE_NAME => serde_json::from_value(data.clone()).map(Self::Mcp),
            PROMPT_MODULE_NAME => serde_json::from_value(data.clone()).map(Self::Prompt),
            MODEL_MODULE_NAME => serde_json::from_value(data.clone()).map(Self::Model),
            LLM_TOOLS_MODULE_NAME => serde_json::from_value(data.clone()).map(Self::LlmTools),
            _ => return Self::Opaque { name, data },
        };
        typed.unwrap_or(Self::Opaque { name, data })
    }

    /// Wire representation of the payload's data.
    #[must_use]
    pub fn data(&self) -> Value {
        let value = match self {
            Self::Mcp(data) => serde_json::to_value(data),
            Self::Prompt(data) => serde_json::to_value(data),
            Self::Model(data) => serde_json::to_value(data),
            Self::LlmTools(data) => serde_json::to_value(data),
            Self::Opaque { data, .. } => return data.clone(),
        };
        value.unwrap_or_default()
    }
}

/// Wire shape shared by every module.
#[derive(Serialize, Deserialize)]
struct RawModule {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    annotations: StringMap,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    name: String,
}

impl From<RawModule> for Module {
    fn from(raw: RawModule) -> Self {
        Self {
            id: raw.id,
            annotations: raw.annotations,
            payload: ModulePayload::from_parts(raw.name, raw.data),
        }
    }
}

impl From<Module> for RawModule {
    fn from(module: Module) -> Self {
        Self {
            annotations: module.annotations,
            data: module.payload.data(),
            id: module.id,
            name: module.payload.name().to_string(),
        }
    }
}

// ── runtime/mcp ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct McpData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub servers: Vec<McpServer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpServerType {
    Local,
    Http,
    Sse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServer {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<EnvironmentVariable>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: StringMap,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<McpServerPrompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<McpServerResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<McpServerTool>,
    #[serde(rename = "type")]
    pub server_type: McpServerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub description: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerPrompt {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    pub command: String,
    #[serde(default)]
    pub description: String,
    pub name: String,
}

/// Resource exposed by an MCP server; exactly one of `uri` and `uri_template`
/// is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServerResource {
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerTool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

// ── runtime/prompt ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompts: Vec<LlmPrompt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmPrompt {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: String,
}

// ── runtime/model ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<LlmModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmModel {
    #[serde(default)]
    pub api_base: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    #[serde(default)]
    pub provider: String,
}

// ── runtime/llm_tools ─────────────────────────────────────────────────────────

/// Binds a prompt, an optional model and tool lists together by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmToolsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mcp_server_tools: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompts: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<String>,
}

// ── Unit tests ────────────────────────────────────────────────────────────────
