use super::domain::{Guest, GuestDraft, GuestId, OwnerId};

/// Owner-scoped storage so the service can run against any managed store.
///
/// Implementations treat each call as atomic and must never touch records
/// belonging to another owner: a foreign id behaves exactly like a missing one.
pub trait GuestRepository: Send + Sync {
    /// Every guest of `owner` in the store's stable fetch order.
    fn list(&self, owner: &OwnerId) -> Result<Vec<Guest>, RepositoryError>;
    fn fetch(&self, owner: &OwnerId, id: &GuestId) -> Result<Option<Guest>, RepositoryError>;
    /// Assign an id and store the guest built from a validated draft.
    fn insert(&self, owner: &OwnerId, draft: GuestDraft) -> Result<Guest, RepositoryError>;
    /// Replace an existing guest with the same id.
    fn update(&self, owner: &OwnerId, guest: Guest) -> Result<Guest, RepositoryError>;
    fn remove(&self, owner: &OwnerId, id: &GuestId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("guest already exists")]
    Conflict,
    #[error("guest not found")]
    NotFound,
    #[error("guest store unavailable: {0}")]
    Unavailable(String),
}
