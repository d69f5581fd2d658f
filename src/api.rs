//! Identifier newtypes and reservation/venue data types.
//!
//! These are the types the platform frontends exchange with the scheduling
//! core. Identifiers wrap the platform's numeric keys so venue, reservation
//! and client ids cannot be mixed up at compile time.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{TimeOfDay, TimeWindow};

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier of a bookable venue (court, field or room).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub i64);

impl VenueId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VenueId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub i64);

impl ReservationId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ReservationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier of the client holding a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub i64);

impl ClientId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClientId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

// ============================================================================
// Venues
// ============================================================================

/// A bookable venue with optional overrides of the platform defaults.
///
/// Venues missing an operating window or slot interval inherit the defaults
/// configured on the board (see `VenueRegistry`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    /// Display color tag used by the frontends.
    #[serde(default)]
    pub color: Option<String>,
    /// Operating window override; `None` inherits the default.
    #[serde(default)]
    pub operating: Option<TimeWindow>,
    /// Slot interval override in minutes; `None` inherits the default.
    #[serde(default)]
    pub slot_interval_minutes: Option<u16>,
}

impl Venue {
    pub fn new(id: VenueId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
            operating: None,
            slot_interval_minutes: None,
        }
    }

    pub fn with_operating(mut self, window: TimeWindow) -> Self {
        self.operating = Some(window);
        self
    }

    pub fn with_interval(mut self, minutes: u16) -> Self {
        self.slot_interval_minutes = Some(minutes);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

// ============================================================================
// Reservations
// ============================================================================

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl ReservationStatus {
    /// Whether a reservation in this state occupies its time window.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }
}

/// A single venue booking on one calendar day.
///
/// `start_time`/`end_time` are stored raw as they arrive from the backend;
/// the `start < end` invariant is enforced at every ingestion edge and
/// [`Reservation::window`] reports violations as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub venue_id: VenueId,
    pub client_id: ClientId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: ReservationStatus,
    /// Display color override; falls back to the venue color.
    #[serde(default)]
    pub color: Option<String>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReservationId,
        venue_id: VenueId,
        client_id: ClientId,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id,
            venue_id,
            client_id,
            date,
            start_time,
            end_time,
            status,
            color: None,
        }
    }

    /// The reservation's validated time window, `None` when `end <= start`.
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.start_time, self.end_time)
    }

    /// Whether this reservation occupies its window.
    pub fn blocks_slot(&self) -> bool {
        self.status.blocks_slot()
    }
}

// ============================================================================
// Query filters
// ============================================================================

/// Inclusive `[start, end]` span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatePeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DatePeriod {
    /// Builds a period, rejecting inverted bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Single-day period.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The reservation query a view resolves to.
///
/// `venues: None` means no venue restriction. A `Some` list is always sorted
/// and deduplicated so equal filters serialize to equal cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub period: DatePeriod,
    pub venues: Option<Vec<VenueId>>,
}

impl QueryFilters {
    /// Filters covering every venue over `period`.
    pub fn for_period(period: DatePeriod) -> Self {
        Self {
            period,
            venues: None,
        }
    }

    /// Filters restricted to the given venues; ids are sorted and deduped.
    pub fn with_venues(period: DatePeriod, venues: impl IntoIterator<Item = VenueId>) -> Self {
        let mut ids: Vec<VenueId> = venues.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self {
            period,
            venues: Some(ids),
        }
    }

    /// Whether a reservation falls inside the filtered period and venue set.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        if !self.period.contains(reservation.date) {
            return false;
        }
        match &self.venues {
            None => true,
            Some(ids) => ids.contains(&reservation.venue_id),
        }
    }

    /// Canonical cache-key serialization of the filters.
    pub fn cache_key(&self) -> String {
        match &self.venues {
            None => format!("{}|all", self.period),
            Some(ids) => {
                let joined = ids
                    .iter()
                    .map(|id| id.value().to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}|v{}", self.period, joined)
            }
        }
    }
}
