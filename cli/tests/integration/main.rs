//! Integration tests for agentdir CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! They never touch `~/.agentdir` or a real directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod cli_tests;
mod config_command;
