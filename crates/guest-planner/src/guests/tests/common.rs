use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::guests::domain::{Guest, GuestCategory, GuestDraft, GuestId, OwnerId};
use crate::guests::repository::{GuestRepository, RepositoryError};
use crate::guests::{guest_router, GuestService};

pub(super) fn owner() -> OwnerId {
    OwnerId("owner-1".to_string())
}

pub(super) fn other_owner() -> OwnerId {
    OwnerId("owner-2".to_string())
}

pub(super) fn draft(
    name: &str,
    category: GuestCategory,
    groom: u8,
    bridesmaid: u8,
    attendance: u8,
) -> GuestDraft {
    GuestDraft::new(name, category, groom, bridesmaid, attendance)
}

pub(super) fn guest(
    id: &str,
    name: &str,
    category: GuestCategory,
    groom: u8,
    bridesmaid: u8,
    attendance: u8,
) -> Guest {
    Guest::new(
        GuestId(id.to_string()),
        draft(name, category, groom, bridesmaid, attendance),
    )
}

/// Small mixed collection in a fixed fetch order.
pub(super) fn party() -> Vec<Guest> {
    let mut aunt = guest("g1", "Margaret Wilson", GuestCategory::GroomsFamily, 9, 6, 8);
    aunt.apply_update(aunt.to_draft().with_notes("Aunt from Denver"));
    vec![
        aunt,
        guest("g2", "alex Johnson", GuestCategory::CloseFriends, 9, 9, 9),
        guest("g3", "Brian Miller", GuestCategory::Friends, 7, 6, 7),
        guest("g4", "Photographer Team", GuestCategory::Vendors, 3, 3, 10),
        guest("g5", "Rachel Green", GuestCategory::Friends, 6, 7, 7),
        guest("g6", "Emma Thompson", GuestCategory::CloseFriends, 10, 10, 10),
    ]
}

pub(super) fn build_service() -> (GuestService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = GuestService::new(repository.clone());
    (service, repository)
}

pub(super) fn guest_router_with_service(service: GuestService<MemoryRepository>) -> axum::Router {
    guest_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    sequence: AtomicU64,
    records: Mutex<HashMap<OwnerId, Vec<Guest>>>,
}

impl GuestRepository for MemoryRepository {
    fn list(&self, owner: &OwnerId) -> Result<Vec<Guest>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(owner).cloned().unwrap_or_default())
    }

    fn fetch(&self, owner: &OwnerId, id: &GuestId) -> Result<Option<Guest>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(owner)
            .and_then(|guests| guests.iter().find(|guest| guest.id() == id))
            .cloned())
    }

    fn insert(&self, owner: &OwnerId, draft: GuestDraft) -> Result<Guest, RepositoryError> {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let guest = Guest::new(GuestId(format!("guest-{next}")), draft);
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.entry(owner.clone()).or_default().push(guest.clone());
        Ok(guest)
    }

    fn update(&self, owner: &OwnerId, guest: Guest) -> Result<Guest, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let slot = guard
            .get_mut(owner)
            .and_then(|guests| guests.iter_mut().find(|stored| stored.id() == guest.id()))
            .ok_or(RepositoryError::NotFound)?;
        *slot = guest.clone();
        Ok(guest)
    }

    fn remove(&self, owner: &OwnerId, id: &GuestId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let guests = guard.get_mut(owner).ok_or(RepositoryError::NotFound)?;
        let before = guests.len();
        guests.retain(|guest| guest.id() != id);
        if guests.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl GuestRepository for UnavailableRepository {
    fn list(&self, _owner: &OwnerId) -> Result<Vec<Guest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _owner: &OwnerId, _id: &GuestId) -> Result<Option<Guest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _owner: &OwnerId, _draft: GuestDraft) -> Result<Guest, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _owner: &OwnerId, _guest: Guest) -> Result<Guest, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _owner: &OwnerId, _id: &GuestId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
