use chrono::NaiveDate;
use guest_planner::guests::{
    Guest, GuestDraft, GuestId, GuestRepository, OwnerId, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local guest store. Guests come back in insertion order per owner.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGuestRepository {
    sequence: Arc<AtomicU64>,
    records: Arc<Mutex<HashMap<OwnerId, Vec<Guest>>>>,
}

impl InMemoryGuestRepository {
    /// Store each draft for `owner` as-is; drafts are expected to be valid.
    pub(crate) fn seed<I>(&self, owner: &OwnerId, drafts: I) -> Result<usize, RepositoryError>
    where
        I: IntoIterator<Item = GuestDraft>,
    {
        let mut seeded = 0;
        for draft in drafts {
            self.insert(owner, draft)?;
            seeded += 1;
        }
        Ok(seeded)
    }

    fn next_id(&self) -> GuestId {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        GuestId(format!("guest-{next:06}"))
    }
}

impl GuestRepository for InMemoryGuestRepository {
    fn list(&self, owner: &OwnerId) -> Result<Vec<Guest>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(owner).cloned().unwrap_or_default())
    }

    fn fetch(&self, owner: &OwnerId, id: &GuestId) -> Result<Option<Guest>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard
            .get(owner)
            .and_then(|guests| guests.iter().find(|guest| guest.id() == id))
            .cloned())
    }

    fn insert(&self, owner: &OwnerId, draft: GuestDraft) -> Result<Guest, RepositoryError> {
        let guest = Guest::new(self.next_id(), draft);
        let mut guard = self.records.lock().map_err(poisoned)?;
        let guests = guard.entry(owner.clone()).or_default();
        if guests.iter().any(|stored| stored.id() == guest.id()) {
            return Err(RepositoryError::Conflict);
        }
        guests.push(guest.clone());
        Ok(guest)
    }

    fn update(&self, owner: &OwnerId, guest: Guest) -> Result<Guest, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let slot = guard
            .get_mut(owner)
            .and_then(|guests| guests.iter_mut().find(|stored| stored.id() == guest.id()))
            .ok_or(RepositoryError::NotFound)?;
        *slot = guest.clone();
        Ok(guest)
    }

    fn remove(&self, owner: &OwnerId, id: &GuestId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        let guests = guard.get_mut(owner).ok_or(RepositoryError::NotFound)?;
        let position = guests
            .iter()
            .position(|guest| guest.id() == id)
            .ok_or(RepositoryError::NotFound)?;
        guests.remove(position);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("guest store mutex poisoned".to_string())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
