//! `agentdir status`: which directory is configured and whether you are
//! logged in to it.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::{AppContext, now_ms};
use crate::application::services::session_service;

/// Run the status command.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let status = session_service::directory_status(&app.config, &app.session_store, now_ms())?;
    app.renderer().render_status(&status)?;
    Ok(ExitCode::SUCCESS)
}
