use std::sync::Arc;

use super::domain::{Guest, GuestDraft, GuestId, OwnerId, ValidationError};
use super::export::{build_export_table, ExportTable};
use super::listing::{CategoryFilter, GuestListing, SortKey};
use super::report::views::StatisticsSummary;
use super::report::{aggregate_statistics, StatisticsError};
use super::repository::{GuestRepository, RepositoryError};

/// Gateway boundary: validates drafts, keeps grades derived, and scopes every
/// call to the authenticated owner.
pub struct GuestService<R> {
    repository: Arc<R>,
}

impl<R> GuestService<R>
where
    R: GuestRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self, owner: Option<&OwnerId>) -> Result<Vec<Guest>, GuestServiceError> {
        let owner = require_owner(owner)?;
        Ok(self.repository.list(owner)?)
    }

    pub fn get(
        &self,
        owner: Option<&OwnerId>,
        id: &GuestId,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        let guest = self
            .repository
            .fetch(owner, id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(guest)
    }

    /// Validate and store a new guest; the repository assigns the id.
    pub fn create(
        &self,
        owner: Option<&OwnerId>,
        draft: GuestDraft,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        let draft = draft.validate()?;
        Ok(self.repository.insert(owner, draft)?)
    }

    /// Replace the editable fields of an existing guest and re-derive its grade.
    pub fn update(
        &self,
        owner: Option<&OwnerId>,
        id: &GuestId,
        draft: GuestDraft,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        let draft = draft.validate()?;
        self.modify(owner, id, |guest| guest.apply_update(draft))
    }

    pub fn set_confirmation(
        &self,
        owner: Option<&OwnerId>,
        id: &GuestId,
        confirmation: bool,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        self.modify(owner, id, |guest| guest.set_confirmation(confirmation))
    }

    pub fn set_invite_sent(
        &self,
        owner: Option<&OwnerId>,
        id: &GuestId,
        invite_sent: bool,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        self.modify(owner, id, |guest| guest.set_invite_sent(invite_sent))
    }

    pub fn toggle_confirmation(
        &self,
        owner: Option<&OwnerId>,
        id: &GuestId,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        self.modify(owner, id, |guest| {
            let flipped = !guest.confirmation();
            guest.set_confirmation(flipped);
        })
    }

    pub fn toggle_invite_sent(
        &self,
        owner: Option<&OwnerId>,
        id: &GuestId,
    ) -> Result<Guest, GuestServiceError> {
        let owner = require_owner(owner)?;
        self.modify(owner, id, |guest| {
            let flipped = !guest.invite_sent();
            guest.set_invite_sent(flipped);
        })
    }

    pub fn delete(&self, owner: Option<&OwnerId>, id: &GuestId) -> Result<(), GuestServiceError> {
        let owner = require_owner(owner)?;
        Ok(self.repository.remove(owner, id)?)
    }

    pub fn listing(
        &self,
        owner: Option<&OwnerId>,
        filter: CategoryFilter,
        search: &str,
        sort: SortKey,
    ) -> Result<GuestListing, GuestServiceError> {
        let guests = self.list(owner)?;
        Ok(GuestListing::build(&guests, filter, search, sort))
    }

    pub fn statistics(
        &self,
        owner: Option<&OwnerId>,
    ) -> Result<StatisticsSummary, GuestServiceError> {
        let guests = self.list(owner)?;
        let statistics = aggregate_statistics(&guests)?;
        Ok(statistics.summary())
    }

    /// Export table over the full, unfiltered collection in fetch order.
    pub fn export_table(&self, owner: Option<&OwnerId>) -> Result<ExportTable, GuestServiceError> {
        let guests = self.list(owner)?;
        Ok(build_export_table(&guests))
    }

    fn modify<F>(&self, owner: &OwnerId, id: &GuestId, change: F) -> Result<Guest, GuestServiceError>
    where
        F: FnOnce(&mut Guest),
    {
        let mut guest = self
            .repository
            .fetch(owner, id)?
            .ok_or(RepositoryError::NotFound)?;
        change(&mut guest);
        Ok(self.repository.update(owner, guest)?)
    }
}

fn require_owner(owner: Option<&OwnerId>) -> Result<&OwnerId, GuestServiceError> {
    match owner {
        Some(owner) if !owner.0.trim().is_empty() => Ok(owner),
        _ => Err(GuestServiceError::Unauthenticated),
    }
}

/// Error raised by the guest service.
#[derive(Debug, thiserror::Error)]
pub enum GuestServiceError {
    #[error("user not authenticated")]
    Unauthenticated,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}
