//! The async seam between the scheduling core and reservation backends.

use async_trait::async_trait;

use crate::api::{QueryFilters, Reservation, Venue};
use crate::data::error::SourceResult;

/// Read access to the platform's venue roster and reservation store.
///
/// Implementations are expected to be cheap to share (`Arc<dyn
/// ReservationSource>`) and safe to call concurrently. The core only ever
/// reads through this trait; reservation writes go through the platform's
/// booking forms, outside this crate.
#[async_trait]
pub trait ReservationSource: Send + Sync {
    /// Fetches every bookable venue.
    async fn list_venues(&self) -> SourceResult<Vec<Venue>>;

    /// Fetches the reservations matching `filters`.
    ///
    /// # Arguments
    ///
    /// * `filters` - Day period plus optional venue restriction, as derived
    ///   from the current view
    ///
    /// # Returns
    ///
    /// Every reservation whose date falls in the period and whose venue
    /// passes the restriction, in no particular order. Cancelled
    /// reservations are included; the core decides what blocks a slot.
    async fn fetch_reservations(&self, filters: &QueryFilters) -> SourceResult<Vec<Reservation>>;
}
