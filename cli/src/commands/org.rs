//! `agentdir org`: list and select hub organizations.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::commands::with_spinner;
use crate::domain::config::SelectedOrganization;
use crate::domain::hub::OrganizationsResponse;
use crate::output::human::organization_label;

/// Organization subcommands.
#[derive(Subcommand)]
pub enum OrgCommand {
    /// List your organizations
    List,
    /// Select the organization that scopes searches
    Select {
        /// Organization id or name; prompts when omitted
        id: Option<String>,
    },
    /// Clear the selected organization
    Clear,
}

/// Run the org command.
pub async fn run(app: &AppContext, cmd: OrgCommand) -> Result<ExitCode> {
    match cmd {
        OrgCommand::List => {
            let response = fetch(app).await?;
            app.renderer()
                .render_organizations(&response, app.config.organization_id())?;
        }
        OrgCommand::Select { id } => {
            let response = fetch(app).await?;
            let selected = choose(app, &response, id.as_deref())?;
            let label = organization_label(&selected.name, &selected.id);
            config_service::select_organization(&app.config_store, Some(selected))?;
            app.renderer()
                .render_message(&format!("Selected organization {label}"))?;
        }
        OrgCommand::Clear => {
            config_service::select_organization(&app.config_store, None)?;
            app.renderer().render_message("Cleared organization")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn fetch(app: &AppContext) -> Result<OrganizationsResponse> {
    let directory = app.directory()?;
    let ctx = app.context();
    Ok(with_spinner(app, "Fetching organizations...", directory.organizations(&ctx)).await?)
}

/// Pick an organization by id, or interactively when no id is given.
fn choose(
    app: &AppContext,
    response: &OrganizationsResponse,
    id: Option<&str>,
) -> Result<SelectedOrganization> {
    let organizations: Vec<_> = response
        .organizations
        .iter()
        .map(|m| SelectedOrganization {
            id: m.organization.id.clone(),
            name: m.organization.name.clone(),
        })
        .collect();

    if let Some(id) = id {
        return find_organization(&organizations, id)
            .cloned()
            .with_context(|| format!("you are not a member of organization {id}"));
    }
    if organizations.is_empty() {
        anyhow::bail!("you are not a member of any organization");
    }
    if app.non_interactive {
        anyhow::bail!("no organization id given; pass one when running non-interactively");
    }

    let labels: Vec<String> = organizations
        .iter()
        .map(|o| organization_label(&o.name, &o.id))
        .collect();
    let default = app
        .config
        .organization_id()
        .and_then(|current| organizations.iter().position(|o| o.id == current))
        .unwrap_or(0);
    let index = dialoguer::Select::new()
        .with_prompt("Organization")
        .items(&labels)
        .default(default)
        .interact()?;
    organizations
        .get(index)
        .cloned()
        .context("no organization selected")
}

/// Find an organization by id, falling back to an exact name match.
#[must_use]
pub fn find_organization<'a>(
    organizations: &'a [SelectedOrganization],
    id_or_name: &str,
) -> Option<&'a SelectedOrganization> {
    organizations
        .iter()
        .find(|o| o.id == id_or_name)
        .or_else(|| organizations.iter().find(|o| o.name == id_or_name))
}
