//! Directory backed by the hosted hub.
//!
//! Searches go over REST; everything that changes state, and pulls, go
//! through `dirctl hub`.

use agentdir_common::Record;

use crate::application::ports::{CommandRunner, Directory};
use crate::domain::directory::{DirectoryContext, RecordRef, SearchRequest, SearchResults};
use crate::domain::error::DirectoryError;
use crate::domain::hub::{HubRecord, ListingGeneration, ListingQuery, OrganizationsResponse};
use crate::infra::dirctl::Dirctl;
use crate::infra::directory::local::{decode_record, record_payload};
use crate::infra::hub_client::HubClient;

pub struct SaasDirectory<R: CommandRunner> {
    dirctl: Dirctl<R>,
    hub: HubClient,
    listing: ListingGeneration,
}

impl<R: CommandRunner> SaasDirectory<R> {
    pub fn new(dirctl: Dirctl<R>, hub: HubClient) -> Self {
        Self {
            dirctl,
            hub,
            listing: ListingGeneration::default(),
        }
    }

    /// Search through `listing` instead of the repositories listing.
    #[must_use]
    pub fn with_listing(mut self, listing: ListingGeneration) -> Self {
        self.listing = listing;
        self
    }

    #[must_use]
    pub fn listing(&self) -> ListingGeneration {
        self.listing
    }

    #[must_use]
    pub fn hub(&self) -> &HubClient {
        &self.hub
    }

    /// Organizations the logged-in user belongs to.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] if the listing fails.
    pub async fn organizations(
        &self,
        ctx: &DirectoryContext,
    ) -> Result<OrganizationsResponse, DirectoryError> {
        self.hub.list_organizations(ctx.session.bearer()).await
    }
}

impl<R: CommandRunner> Directory for SaasDirectory<R> {
    async fn login(&self, _ctx: &DirectoryContext) -> Result<String, DirectoryError> {
        let output = self.dirctl.exec(&["hub", "login"]).await?;
        Ok(output.trim().to_string())
    }

    async fn logout(&self, _ctx: &DirectoryContext) -> Result<String, DirectoryError> {
        let output = self.dirctl.exec(&["hub", "logout"]).await?;
        Ok(output.trim().to_string())
    }

    async fn search(
        &self,
        ctx: &DirectoryContext,
        request: &SearchRequest,
    ) -> Result<SearchResults, DirectoryError> {
        let query = ListingQuery {
            search_term: request.term.trim().to_string(),
            oldest_first: request.oldest_first,
            owned_only: request.owned_only,
            filter: request.filter,
            organization_id: ctx.organization_id().map(ToString::to_string),
        };
        let token = if query.is_scoped() {
            ctx.session.bearer()
        } else {
            None
        };

        let mut results = SearchResults::default();
        match self.listing {
            ListingGeneration::Repositories => {
                for repository in self.hub.list_repositories(&query, token).await? {
                    let Some(latest) = repository.records.first() else {
                        tracing::debug!(repository = %repository.id, "skipping repository without records");
                        continue;
                    };
                    push_hub_record(&mut results, latest, &repository.id);
                }
            }
            ListingGeneration::Records => {
                for record in self.hub.list_records(&query, token).await? {
                    push_hub_record(&mut results, &record, "");
                }
            }
        }
        Ok(results)
    }

    async fn push(&self, _ctx: &DirectoryContext, record: &Record) -> Result<String, DirectoryError> {
        let payload = record_payload(record)?;
        let output = self
            .dirctl
            .exec_with_stdin(&["hub", "push", &record.name], &payload)
            .await?;
        Ok(output.trim().to_string())
    }

    async fn sign(&self, ctx: &DirectoryContext, digest: &str) -> Result<String, DirectoryError> {
        let record = self.pull(ctx, digest).await?;
        let payload = record_payload(&record)?;
        let output = self.dirctl.exec_with_stdin(&["hub", "sign"], &payload).await?;
        Ok(output.trim().to_string())
    }

    async fn pull(&self, _ctx: &DirectoryContext, digest: &str) -> Result<Record, DirectoryError> {
        let output = self.dirctl.exec(&["hub", "pull", digest]).await?;
        decode_record(&output, digest)
    }
}

/// Append `hub` with a reference naming its repository, falling back to
/// `repository_id` when the record does not carry one.
fn push_hub_record(results: &mut SearchResults, hub: &HubRecord, repository_id: &str) {
    let repository_id = if hub.repository_id.is_empty() {
        repository_id
    } else {
        hub.repository_id.as_str()
    };
    results.push(
        Record::from(hub),
        RecordRef {
            digest: hub.digest.clone(),
            repository_id: (!repository_id.is_empty()).then(|| repository_id.to_string()),
            record_id: Some(hub.id.clone()),
        },
    );
}
