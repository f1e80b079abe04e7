//! Converting records into editor artifacts and back.
//!
//! Conversions that hit a gap in the record (a module or reference that is
//! not there) return an [`ImportError`](crate::domain::error::ImportError)
//! rather than a partial artifact.

pub mod chat_mode;
pub mod mcp;

pub use chat_mode::{
    CHAT_MODE_EXTENSION, ChatMode, chat_mode_file_name, chat_mode_from_record, parse_chat_mode,
    record_from_chat_mode, render_chat_mode, safe_record_name,
};
pub use mcp::{McpServerConfig, mcp_server_config};
