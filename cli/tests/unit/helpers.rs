//! Shared test helpers: a scripted `CommandRunner`, output constructors and
//! record fixtures.

#![allow(dead_code, clippy::expect_used)]

use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use agentdir_cli::application::ports::CommandRunner;
use agentdir_cli::domain::directory::DirectoryContext;
use agentdir_cli::domain::session::Session;
use agentdir_common::Record;
use anyhow::Result;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

pub const DIRCTL: &str = "/opt/agntcy/bin/dirctl";
pub const LOCAL_ADDR: &str = "localhost:8888";

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Scripted runner ──────────────────────────────────────────────────────────

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
}

impl Call {
    pub fn stdin_json(&self) -> serde_json::Value {
        serde_json::from_slice(self.stdin.as_deref().expect("stdin was piped"))
            .expect("stdin is JSON")
    }
}

#[derive(Default)]
struct Script {
    /// Canned outputs keyed by an argument prefix; first match wins.
    responses: Vec<(Vec<String>, Output)>,
    spawn_error: Option<String>,
    calls: Vec<Call>,
}

/// `CommandRunner` that answers from a script and records every call.
/// Clones share state, so a test can keep a handle after moving one into
/// a backend.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls whose arguments start with `prefix`.
    #[must_use]
    pub fn on(self, prefix: &[&str], output: Output) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .responses
            .push((prefix.iter().map(ToString::to_string).collect(), output));
        self
    }

    /// Fail every call as if the binary could not be started.
    #[must_use]
    pub fn failing_spawn(self, message: &str) -> Self {
        self.script.lock().expect("script lock").spawn_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().expect("script lock").calls.clone()
    }

    fn answer(&self, program: &str, args: &[&str], stdin: Option<&[u8]>) -> Result<Output> {
        let mut script = self.script.lock().expect("script lock");
        script.calls.push(Call {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            stdin: stdin.map(<[u8]>::to_vec),
        });
        if let Some(message) = &script.spawn_error {
            anyhow::bail!("failed to run {program}: {message}");
        }
        script
            .responses
            .iter()
            .find(|(prefix, _)| {
                prefix.len() <= args.len() && prefix.iter().zip(args).all(|(p, a)| p == a)
            })
            .map(|(_, output)| output.clone())
            .ok_or_else(|| anyhow::anyhow!("unexpected call: {program} {}", args.join(" ")))
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.answer(program, args, None)
    }

    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output> {
        self.answer(program, args, Some(stdin))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Canonical record document as `dirctl pull --json` prints it.
pub fn record_json(name: &str, version: &str) -> String {
    serde_json::json!({
        "name": name,
        "version": version,
        "schema_version": "0.7.0",
        "created_at": "2025-06-01T12:00:00Z",
        "description": format!("{name} record"),
        "authors": ["ada"],
        "modules": [{
            "name": "runtime/mcp",
            "data": {"servers": [{"name": name, "type": "local", "command": "npx", "args": ["-y", name]}]}
        }]
    })
    .to_string()
}

pub fn record(name: &str, version: &str) -> Record {
    agentdir_common::normalize(&record_json(name, version)).expect("fixture record")
}

/// Unsigned JWT whose `exp` is `exp_secs`.
pub fn jwt_expiring_at(exp_secs: i64) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp_secs}}}"#).as_bytes())
    )
}

pub fn anonymous_ctx() -> DirectoryContext {
    DirectoryContext::default()
}

pub fn logged_in_session(token: &str) -> Session {
    Session {
        user: Some("ada".to_string()),
        access_token: Some(token.to_string()),
        logged_in: true,
    }
}
