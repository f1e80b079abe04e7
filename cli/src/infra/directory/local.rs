//! Directory backed by a `dirctl`-managed registry.

use agentdir_common::{Record, normalize};

use crate::application::ports::{CommandRunner, Directory};
use crate::domain::directory::{DirectoryContext, RecordRef, SearchRequest, SearchResults};
use crate::domain::error::DirectoryError;
use crate::domain::query;
use crate::infra::dirctl::Dirctl;

/// What `dirctl search` prints instead of an empty array.
const NO_RESULTS_SENTINEL: &str = "No record CIDs found";

pub const LOGIN_MESSAGE: &str = "No login required for local directory";
pub const LOGOUT_MESSAGE: &str = "No logout available for local directory";

pub struct LocalDirectory<R: CommandRunner> {
    dirctl: Dirctl<R>,
}

impl<R: CommandRunner> LocalDirectory<R> {
    pub fn new(dirctl: Dirctl<R>) -> Self {
        Self { dirctl }
    }

    #[must_use]
    pub fn dirctl(&self) -> &Dirctl<R> {
        &self.dirctl
    }
}

impl<R: CommandRunner> Directory for LocalDirectory<R> {
    async fn login(&self, _ctx: &DirectoryContext) -> Result<String, DirectoryError> {
        Ok(LOGIN_MESSAGE.to_string())
    }

    async fn logout(&self, _ctx: &DirectoryContext) -> Result<String, DirectoryError> {
        Ok(LOGOUT_MESSAGE.to_string())
    }

    async fn search(
        &self,
        ctx: &DirectoryContext,
        request: &SearchRequest,
    ) -> Result<SearchResults, DirectoryError> {
        let parsed = match query::parse(&request.term) {
            Ok(parsed) => parsed,
            Err(rejection) => {
                tracing::debug!(term = %request.term, %rejection, "search term rejected");
                return Ok(SearchResults::default());
            }
        };

        let flags = parsed.to_flags();
        let mut args = vec!["search", "--json"];
        args.extend(flags.iter().map(String::as_str));
        let stdout = self.dirctl.exec(&args).await?;

        let mut results = SearchResults::default();
        for cid in parse_cids(&stdout)? {
            match self.pull(ctx, &cid).await {
                Ok(record) => results.push(record, RecordRef::digest(cid)),
                Err(e) => tracing::warn!(%cid, error = %e, "skipping record that failed to pull"),
            }
        }
        Ok(results)
    }

    async fn push(&self, _ctx: &DirectoryContext, record: &Record) -> Result<String, DirectoryError> {
        let payload = record_payload(record)?;
        let output = self.dirctl.exec_with_stdin(&["push"], &payload).await?;
        Ok(output.trim().to_string())
    }

    async fn sign(&self, _ctx: &DirectoryContext, digest: &str) -> Result<String, DirectoryError> {
        let output = self.dirctl.exec(&["sign", digest]).await?;
        Ok(output.trim().to_string())
    }

    async fn pull(&self, _ctx: &DirectoryContext, digest: &str) -> Result<Record, DirectoryError> {
        let output = self.dirctl.exec(&["pull", "--json", digest]).await?;
        decode_record(&output, digest)
    }
}

/// Record identifiers printed by `dirctl search --json`: a JSON array of
/// strings, or whitespace-separated tokens from older releases.
pub(crate) fn parse_cids(stdout: &str) -> Result<Vec<String>, DirectoryError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() || trimmed == NO_RESULTS_SENTINEL {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| DirectoryError::Decode {
            context: "dirctl search output".to_string(),
            message: e.to_string(),
        });
    }
    Ok(trimmed.split_whitespace().map(ToString::to_string).collect())
}

pub(crate) fn record_payload(record: &Record) -> Result<Vec<u8>, DirectoryError> {
    serde_json::to_vec(record).map_err(|e| DirectoryError::Decode {
        context: format!("record '{}'", record.name),
        message: e.to_string(),
    })
}

pub(crate) fn decode_record(output: &str, digest: &str) -> Result<Record, DirectoryError> {
    normalize(output).map_err(|e| DirectoryError::Decode {
        context: format!("record {digest}"),
        message: e.to_string(),
    })
}
