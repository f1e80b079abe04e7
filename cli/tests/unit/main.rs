//! Unit tests for agentdir CLI
//!
//! These tests use mocked dependencies and run fast without external I/O,
//! apart from a local `wiremock` server standing in for the hub.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod architecture;
mod dirctl;
mod helpers;
mod local_directory;
mod record_service;
mod session_service;
