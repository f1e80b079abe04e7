//! MCP server install configuration derived from a record.

use std::collections::BTreeMap;

use agentdir_common::{MCP_MODULE_NAME, McpServerType, Record};
use serde::Serialize;

use crate::domain::error::ImportError;

/// Editor-facing configuration for one MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpServerConfig {
    Stdio {
        name: String,
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    Http {
        name: String,
        url: String,
        headers: BTreeMap<String, String>,
    },
    Sse {
        name: String,
        url: String,
        headers: BTreeMap<String, String>,
    },
}

impl McpServerConfig {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Stdio { name, .. } | Self::Http { name, .. } | Self::Sse { name, .. } => name,
        }
    }
}

/// Build the install configuration for the first server of the record's
/// `runtime/mcp` module.
///
/// # Errors
///
/// Returns an [`ImportError`] when the module is missing or untyped, lists
/// no servers, or its first server is neither a local command nor a remote
/// URL.
pub fn mcp_server_config(record: &Record) -> Result<McpServerConfig, ImportError> {
    let mcp = record
        .mcp()
        .ok_or(ImportError::MissingModule(MCP_MODULE_NAME))?;
    let server = mcp.servers.first().ok_or(ImportError::NoServers)?;

    match (&server.server_type, &server.command, &server.url) {
        (McpServerType::Local, Some(command), _) => Ok(McpServerConfig::Stdio {
            name: server.name.clone(),
            command: command.clone(),
            args: server.args.clone(),
            env: server
                .env_vars
                .iter()
                .map(|var| (var.name.clone(), var.default_value.clone().unwrap_or_default()))
                .collect(),
        }),
        (McpServerType::Http, _, Some(url)) => Ok(McpServerConfig::Http {
            name: server.name.clone(),
            url: url.clone(),
            headers: server.headers.clone(),
        }),
        (McpServerType::Sse, _, Some(url)) => Ok(McpServerConfig::Sse {
            name: server.name.clone(),
            url: url.clone(),
            headers: server.headers.clone(),
        }),
        _ => Err(ImportError::UnsupportedServer(server.name.clone())),
    }
}
