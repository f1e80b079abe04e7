//! Command implementations

pub mod auth;
pub mod config;
pub mod convert;
pub mod import;
pub mod org;
pub mod record;
pub mod search;
pub mod status;
pub mod version;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::output::progress;

/// Await `fut` behind a spinner, cleared once it resolves. No spinner in
/// JSON or quiet mode, or when stdout is not a terminal.
pub(crate) async fn with_spinner<T, E>(
    app: &AppContext,
    msg: &str,
    fut: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let pb = if app.is_json() {
        None
    } else {
        app.output.spinner(msg)
    };
    let result = fut.await;
    if let Some(pb) = pb {
        if result.is_ok() {
            pb.finish_and_clear();
        } else {
            progress::finish_err(&pb, msg.trim_end_matches("..."));
        }
    }
    result
}

/// Write `contents` to `dir/file_name`, asking before replacing a file.
///
/// Returns `None` when the user declined to overwrite.
pub(crate) fn write_artifact(
    app: &AppContext,
    dir: &Path,
    file_name: &str,
    contents: &str,
) -> Result<Option<std::path::PathBuf>> {
    let path = dir.join(file_name);
    if path.exists() && !app.confirm(&format!("Overwrite {}?", path.display()), true)? {
        return Ok(None);
    }
    std::fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    std::fs::write(&path, contents).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(Some(path))
}
