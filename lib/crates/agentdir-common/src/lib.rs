//! Canonical OASF record model.
//!
//! Every backend normalizes into [`Record`] (schema revision `0.7.0`).
//! Older documents are read through [`RecordDocument`] and never written back.

pub mod document;
pub mod legacy;
pub mod module;
pub mod record;

mod serde_util;

pub use document::{RecordDocument, RecordError, SchemaRevision, normalize};
pub use legacy::LegacyRecord;
pub use module::{
    EnvironmentVariable, LLM_TOOLS_MODULE_NAME, LlmModel, LlmPrompt, LlmToolsData,
    MCP_MODULE_NAME, MODEL_MODULE_NAME, McpData, McpServer, McpServerPrompt, McpServerResource,
    McpServerTool, McpServerType, ModelData, Module, ModulePayload, PROMPT_MODULE_NAME,
    PromptData,
};
pub use serde_util::null_as_default;
pub use record::{
    CanonicalSchema, Domain, Locator, LocatorType, OASF_RECORD_SCHEMA_VERSION, Record, Signature,
    Skill, StringMap,
};
