//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;

use agentdir_common::Record;
use anyhow::Result;

use crate::domain::config::AgentdirConfig;
use crate::domain::directory::{DirectoryContext, SearchRequest, SearchResults};
use crate::domain::error::DirectoryError;
use crate::domain::session::SessionFile;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with stdin piped from `stdin`. The pipe is closed once
    /// `stdin` has been written.
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output>;
}

// ── Directory Port ────────────────────────────────────────────────────────────

/// Operations every registry backend offers.
///
/// Calls are independent: a backend holds no per-caller state, so the
/// organization scope and session travel in `ctx`.
#[allow(async_fn_in_trait)]
pub trait Directory {
    /// Start a session; returns the backend's message for the user.
    async fn login(&self, ctx: &DirectoryContext) -> Result<String, DirectoryError>;
    /// End the session; returns the backend's message for the user.
    async fn logout(&self, ctx: &DirectoryContext) -> Result<String, DirectoryError>;
    /// Find records. A term the backend cannot express yields no results.
    async fn search(
        &self,
        ctx: &DirectoryContext,
        request: &SearchRequest,
    ) -> Result<SearchResults, DirectoryError>;
    /// Store a record; returns its identifier.
    async fn push(&self, ctx: &DirectoryContext, record: &Record) -> Result<String, DirectoryError>;
    /// Sign the record stored under `digest`; returns the tool's output.
    async fn sign(&self, ctx: &DirectoryContext, digest: &str) -> Result<String, DirectoryError>;
    /// Fetch the record stored under `digest`, normalized.
    async fn pull(&self, ctx: &DirectoryContext, digest: &str) -> Result<Record, DirectoryError>;
}

// ── Configuration and Session Ports ───────────────────────────────────────────

/// Abstracts configuration persistence so commands can be tested without
/// touching the real config file.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<AgentdirConfig>;
    /// Persist the configuration.
    fn save(&self, config: &AgentdirConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

/// Read access to the session file `dirctl hub login` maintains.
pub trait SessionStore {
    /// Load the session file; `None` when it does not exist.
    fn load(&self) -> Result<Option<SessionFile>>;
}
