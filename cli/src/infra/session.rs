//! Reads the session file written by `dirctl hub login`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::SessionStore;
use crate::domain::session::SessionFile;

/// `SessionStore` backed by a JSON file.
#[derive(Debug, Clone)]
pub struct SessionFileStore {
    path: PathBuf,
}

impl SessionFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for SessionFileStore {
    fn load(&self) -> Result<Option<SessionFile>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read {}", self.path.display()));
            }
        };
        let file = serde_json::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        Ok(Some(file))
    }
}
