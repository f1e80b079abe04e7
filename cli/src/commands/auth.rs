//! `agentdir login` and `agentdir logout`.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::Directory;

/// Run `login`.
pub async fn login(app: &AppContext) -> Result<ExitCode> {
    let directory = app.directory()?;
    let ctx = app.context();
    let message = directory.login(&ctx).await?;
    app.renderer().render_message(&message)?;
    Ok(ExitCode::SUCCESS)
}

/// Run `logout`.
pub async fn logout(app: &AppContext) -> Result<ExitCode> {
    let directory = app.directory()?;
    let ctx = app.context();
    let message = directory.logout(&ctx).await?;
    app.renderer().render_message(&message)?;
    Ok(ExitCode::SUCCESS)
}
