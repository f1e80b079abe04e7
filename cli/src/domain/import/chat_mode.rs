//! Chat mode files: a YAML front matter block followed by the prompt body.
//!
//! ```text
//! ---
//! description: Reviews pull requests
//! tools:
//! - search
//! model: gpt-4o
//! ---
//!
//! You are a meticulous reviewer...
//! ```

use agentdir_common::{
    Domain, LLM_TOOLS_MODULE_NAME, LlmModel, LlmPrompt, LlmToolsData, MODEL_MODULE_NAME,
    MCP_MODULE_NAME, ModelData, Module, ModulePayload, PROMPT_MODULE_NAME, PromptData, Record,
};
use serde::{Deserialize, Serialize};

use crate::domain::error::ImportError;

pub const CHAT_MODE_EXTENSION: &str = ".chatmode.md";
pub const CHAT_MODE_DOMAIN: &str = "technology/software_engineering";
pub const CHAT_MODE_RECORD_VERSION: &str = "1.0.0";

/// Placeholder for model fields a chat mode does not carry.
const UNUSED_FIELD: &str = "NOTUSED";

const FRONT_MATTER_FENCE: &str = "---";

/// An editor chat mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMode {
    pub description: String,
    pub tools: Vec<String>,
    /// Empty when the chat mode does not pin a model.
    pub model: String,
    /// Prompt body, written after the front matter.
    #[serde(skip)]
    pub prompt: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    description: Option<String>,
    tools: Option<Vec<String>>,
    model: Option<String>,
}

/// Record names as used in file names: `.` and `-` become `_`.
#[must_use]
pub fn safe_record_name(name: &str) -> String {
    name.replace(['.', '-'], "_")
}

/// Default file name for a record exported as a chat mode.
#[must_use]
pub fn chat_mode_file_name(record: &Record) -> String {
    format!(
        "{}-{}{CHAT_MODE_EXTENSION}",
        safe_record_name(&record.name),
        record.version
    )
}

/// Build a chat mode from the record's `runtime/llm_tools` binding.
///
/// The first prompt named by the binding must exist in `runtime/prompt`.
/// A model, when named, must exist in `runtime/model`. `runtime/mcp` is only
/// required when the binding lists MCP server tools.
///
/// # Errors
///
/// Returns an [`ImportError`] naming the first reference that does not
/// resolve.
pub fn chat_mode_from_record(record: &Record) -> Result<ChatMode, ImportError> {
    let tools = record
        .llm_tools()
        .ok_or(ImportError::MissingModule(LLM_TOOLS_MODULE_NAME))?;
    let prompts = record
        .prompts()
        .ok_or(ImportError::MissingModule(PROMPT_MODULE_NAME))?;

    let prompt_name = tools.prompts.first().ok_or(ImportError::NoPromptReference)?;
    let prompt = prompts
        .prompts
        .iter()
        .find(|p| &p.name == prompt_name)
        .ok_or_else(|| ImportError::PromptNotFound(prompt_name.clone()))?;

    let model = match tools.models.first() {
        Some(model_name) => {
            let models = record
                .models()
                .ok_or(ImportError::MissingModule(MODEL_MODULE_NAME))?;
            models
                .models
                .iter()
                .find(|m| &m.model == model_name)
                .ok_or_else(|| ImportError::ModelNotFound(model_name.clone()))?
                .model
                .clone()
        }
        None => String::new(),
    };

    if !tools.mcp_server_tools.is_empty() && !record.has_module(MCP_MODULE_NAME) {
        return Err(ImportError::MissingModule(MCP_MODULE_NAME));
    }

    Ok(ChatMode {
        description: prompt.description.clone(),
        tools: tools
            .tools
            .iter()
            .chain(&tools.mcp_server_tools)
            .cloned()
            .collect(),
        model,
        prompt: prompt.command.clone(),
    })
}

/// Build a record describing `chat_mode` under the name `name`.
#[must_use]
pub fn record_from_chat_mode(name: &str, chat_mode: &ChatMode, authors: Vec<String>) -> Record {
    let mut modules = vec![
        Module::new(ModulePayload::LlmTools(LlmToolsData {
            mcp_server_tools: Vec::new(),
            models: if chat_mode.model.is_empty() {
                Vec::new()
            } else {
                vec![chat_mode.model.clone()]
            },
            prompts: vec![name.to_string()],
            tools: chat_mode.tools.clone(),
        })),
        Module::new(ModulePayload::Prompt(PromptData {
            prompts: vec![LlmPrompt {
                name: name.to_string(),
                description: chat_mode.description.clone(),
                command: chat_mode.prompt.clone(),
            }],
        })),
    ];
    if !chat_mode.model.is_empty() {
        modules.push(Module::new(ModulePayload::Model(ModelData {
            models: vec![LlmModel {
                api_base: UNUSED_FIELD.to_string(),
                api_key: UNUSED_FIELD.to_string(),
                model: chat_mode.model.clone(),
                provider: UNUSED_FIELD.to_string(),
            }],
        })));
    }

    let mut record = Record::new(name, CHAT_MODE_RECORD_VERSION);
    record.authors = authors;
    record.description.clone_from(&chat_mode.description);
    record.domains = vec![Domain::named(CHAT_MODE_DOMAIN)];
    record.modules = modules;
    record
}

/// Render a chat mode file.
///
/// # Errors
///
/// Returns an error if the front matter cannot be serialized.
pub fn render_chat_mode(chat_mode: &ChatMode) -> Result<String, serde_yaml::Error> {
    let front_matter = serde_yaml::to_string(chat_mode)?;
    Ok(format!(
        "{FRONT_MATTER_FENCE}\n{front_matter}{FRONT_MATTER_FENCE}\n\n{}",
        chat_mode.prompt
    ))
}

/// Parse a chat mode file.
///
/// The body is everything after the second `---` fence, trimmed; a `---`
/// inside the body is kept.
///
/// # Errors
///
/// Returns [`ImportError::InvalidChatMode`] when there is no front matter
/// block or it is not YAML.
pub fn parse_chat_mode(content: &str) -> Result<ChatMode, ImportError> {
    let parts: Vec<&str> = content.split(FRONT_MATTER_FENCE).collect();
    if parts.len() < 3 {
        return Err(ImportError::InvalidChatMode(
            "expected a front matter block between --- lines".to_string(),
        ));
    }
    let front: FrontMatter = if parts[1].trim().is_empty() {
        FrontMatter::default()
    } else {
        serde_yaml::from_str(parts[1]).map_err(|e| ImportError::InvalidChatMode(e.to_string()))?
    };
    Ok(ChatMode {
        description: front.description.unwrap_or_default(),
        tools: front.tools.unwrap_or_default(),
        model: front.model.unwrap_or_default(),
        prompt: parts[2..].join(FRONT_MATTER_FENCE).trim().to_string(),
    })
}
