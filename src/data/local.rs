//! In-memory reservation source for tests, demos and development hosts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{QueryFilters, Reservation, ReservationId, Venue};
use crate::data::error::SourceResult;
use crate::data::seed::SeedCatalog;
use crate::data::source::ReservationSource;

#[derive(Default)]
struct Store {
    venues: Vec<Venue>,
    reservations: Vec<Reservation>,
}

/// A [`ReservationSource`] backed by plain vectors.
///
/// Mutation helpers go through interior locks so a directory can keep being
/// seeded after it has been handed to a board as `Arc<dyn
/// ReservationSource>`. The fetch counter and injectable latency exist for
/// cache and race testing.
#[derive(Default)]
pub struct LocalDirectory {
    store: RwLock<Store>,
    fetches: AtomicUsize,
    latency: RwLock<Option<Duration>>,
}

impl LocalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-populated with a seed catalog.
    pub fn from_catalog(catalog: SeedCatalog) -> Self {
        let directory = Self::new();
        {
            let mut store = directory.store.write();
            store.venues = catalog.venues;
            store.reservations = catalog.reservations;
        }
        directory
    }

    pub fn add_venue(&self, venue: Venue) {
        self.store.write().venues.push(venue);
    }

    /// Inserts a reservation, replacing any stored one with the same id.
    pub fn upsert_reservation(&self, reservation: Reservation) {
        let mut store = self.store.write();
        store.reservations.retain(|r| r.id != reservation.id);
        store.reservations.push(reservation);
    }

    pub fn remove_reservation(&self, id: ReservationId) -> bool {
        let mut store = self.store.write();
        let before = store.reservations.len();
        store.reservations.retain(|r| r.id != id);
        store.reservations.len() < before
    }

    /// How many times `fetch_reservations` has run.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Delay applied to every subsequent fetch; `None` answers immediately.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }
}

#[async_trait]
impl ReservationSource for LocalDirectory {
    async fn list_venues(&self) -> SourceResult<Vec<Venue>> {
        Ok(self.store.read().venues.clone())
    }

    async fn fetch_reservations(&self, filters: &QueryFilters) -> SourceResult<Vec<Reservation>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let latency = *self.latency.read();
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        let store = self.store.read();
        Ok(store
            .reservations
            .iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect())
    }
}
