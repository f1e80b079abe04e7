//! `agentdir search`: find records.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::app::AppContext;
use crate::application::ports::Directory;
use crate::commands::with_spinner;
use crate::domain::directory::SearchRequest;
use crate::domain::hub::RecordFilter;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Local: `key=value[,key=value...]` with keys locator, module, name,
    /// skill, skill-id, version. SaaS: free text.
    #[arg(default_value = "")]
    pub term: String,

    /// Restrict hub results to one repository type
    #[arg(long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,

    /// List oldest records first (hub only)
    #[arg(long)]
    pub oldest_first: bool,

    /// Only records owned by the caller (hub only)
    #[arg(long)]
    pub owned_only: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Mcps,
    Agents,
}

impl From<FilterArg> for RecordFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Mcps => Self::Mcps,
            FilterArg::Agents => Self::Agents,
        }
    }
}

impl SearchArgs {
    #[must_use]
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            term: self.term.clone(),
            filter: self.filter.into(),
            oldest_first: self.oldest_first,
            owned_only: self.owned_only,
        }
    }
}

/// Run the search command.
pub async fn run(app: &AppContext, args: &SearchArgs) -> Result<ExitCode> {
    let directory = app.directory()?;
    let ctx = app.context();
    let request = args.to_request();
    let results = with_spinner(app, "Searching...", directory.search(&ctx, &request)).await?;
    app.renderer().render_search(&results)?;
    Ok(ExitCode::SUCCESS)
}
