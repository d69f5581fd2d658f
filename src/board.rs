//! The per-session scheduling board.
//!
//! A [`ScheduleBoard`] owns everything one user session looks at: the
//! current view state, the working set of reservations, the query cache and
//! the edit/drag state machines. Boards are cheap-`Clone` handles over one
//! shared interior, so a host can hand clones to event handlers and
//! background tasks; all methods take `&self`.
//!
//! The board is read-only toward the backend. Optimistic mutations
//! (inserts, deletes, committed drops) change the working set only; cache
//! entries are deliberately left untouched, so a cache hit inside the TTL
//! can resurface pre-mutation data. Hosts that persist a mutation through
//! the platform's booking forms call [`ScheduleBoard::synchronize`] to drop
//! the stale entries.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use parking_lot::RwLock;
use thiserror::Error;

use crate::api::{Reservation, ReservationId, Venue, VenueId};
use crate::cache::QueryCache;
use crate::config::BoardConfig;
use crate::data::{ReservationSource, SourceError, SourceResult};
use crate::models::{TimeOfDay, TimeWindow, ViewKind, ViewState};
use crate::services::availability::first_conflict;
use crate::services::occupancy::{occupancy_for_day, VenueOccupancy};
use crate::services::registry::VenueRegistry;
use crate::services::slots::slot_window;
use crate::services::timeline::TimelineScale;
use crate::services::view_query::derive_filters;

/// How a [`ScheduleBoard::refresh`] call was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fresh cache entry covered the query; no fetch was issued.
    FromCache,
    /// The source was fetched and the result applied and cached.
    Fetched,
    /// The fetch completed but a newer request had taken over; nothing was
    /// applied.
    Superseded,
}

impl RefreshOutcome {
    pub fn served_from_cache(&self) -> bool {
        matches!(self, RefreshOutcome::FromCache)
    }
}

/// Result of dropping a dragged reservation on a target slot.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The move passed the conflict check and the working copy was updated.
    Committed {
        reservation: ReservationId,
        date: NaiveDate,
        window: TimeWindow,
    },
    /// The target overlaps another reservation; nothing was changed.
    RejectedConflict { conflicting: ReservationId },
    /// The reservation's duration does not fit before midnight at the
    /// target start; nothing was changed.
    RejectedOutOfDay,
    /// No drag was in progress (or the dragged reservation no longer
    /// exists).
    NoActiveDrag,
}

impl DropOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, DropOutcome::Committed { .. })
    }
}

/// What one slot on the grid currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Nothing blocks the slot. Free slots stay actionable even while an
    /// edit session is open.
    Free,
    /// A reservation overlaps the slot. While an edit session targets a
    /// different reservation, occupied slots are not actionable.
    Occupied {
        reservation: ReservationId,
        actionable: bool,
    },
}

/// Rejection reasons for [`ScheduleBoard::insert_reservation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("reservation {id} has an empty or inverted time window")]
    InvalidWindow { id: ReservationId },
    #[error("reservation {id} overlaps reservation {conflicting}")]
    Conflict {
        id: ReservationId,
        conflicting: ReservationId,
    },
    #[error("reservation {id} already exists")]
    DuplicateId { id: ReservationId },
}

struct BoardState {
    view: ViewState,
    registry: VenueRegistry,
    reservations: Vec<Reservation>,
    cache: QueryCache,
    editing: Option<ReservationId>,
    dragging: Option<ReservationId>,
    loading: bool,
    fetch_seq: u64,
}

/// Session coordinator over one injected [`ReservationSource`].
#[derive(Clone)]
pub struct ScheduleBoard {
    source: Arc<dyn ReservationSource>,
    config: BoardConfig,
    state: Arc<RwLock<BoardState>>,
}

impl ScheduleBoard {
    /// Builds a board over an already-known venue roster.
    pub fn new(
        source: Arc<dyn ReservationSource>,
        config: BoardConfig,
        venues: Vec<Venue>,
        initial: ViewState,
    ) -> Self {
        let registry = VenueRegistry::new(venues, config.slot_defaults());
        let cache = QueryCache::new(config.cache());
        Self {
            source,
            config,
            state: Arc::new(RwLock::new(BoardState {
                view: initial,
                registry,
                reservations: Vec::new(),
                cache,
                editing: None,
                dragging: None,
                loading: false,
                fetch_seq: 0,
            })),
        }
    }

    /// Builds a board, fetching the venue roster from the source first.
    pub async fn connect(
        source: Arc<dyn ReservationSource>,
        config: BoardConfig,
        initial: ViewState,
    ) -> SourceResult<Self> {
        let venues = source.list_venues().await?;
        Ok(Self::new(source, config, venues, initial))
    }

    // ========================================================================
    // Query orchestration
    // ========================================================================

    /// Brings the working set in line with the current view.
    ///
    /// Serves from the cache when a fresh entry covers the derived query;
    /// otherwise fetches, caches and applies. Every call stamps a new fetch
    /// generation, so a slower fetch that was in flight when a newer request
    /// started resolves as [`RefreshOutcome::Superseded`] and changes
    /// nothing. Fetch errors keep the previous working set and are neither
    /// cached nor retried.
    pub async fn refresh(&self) -> Result<RefreshOutcome, SourceError> {
        let (filters, seq) = {
            let mut state = self.state.write();
            let filters = derive_filters(&state.view);
            state.fetch_seq += 1;
            let seq = state.fetch_seq;
            if let Some(cached) = state.cache.lookup(&filters) {
                state.reservations = cached;
                state.loading = false;
                return Ok(RefreshOutcome::FromCache);
            }
            state.loading = true;
            (filters, seq)
        };

        debug!(
            "fetching reservations for {} (request {seq})",
            filters.cache_key()
        );
        match self.source.fetch_reservations(&filters).await {
            Ok(fetched) => {
                let mut state = self.state.write();
                if state.fetch_seq != seq {
                    debug!("discarding superseded fetch result (request {seq})");
                    return Ok(RefreshOutcome::Superseded);
                }
                state.cache.insert(&filters, fetched.clone());
                state.reservations = fetched;
                state.loading = false;
                Ok(RefreshOutcome::Fetched)
            }
            Err(err) => {
                let mut state = self.state.write();
                if state.fetch_seq != seq {
                    debug!("ignoring error from superseded fetch (request {seq}): {err}");
                    return Ok(RefreshOutcome::Superseded);
                }
                state.loading = false;
                warn!(
                    "reservation fetch failed for {}: {err}",
                    filters.cache_key()
                );
                Err(err)
            }
        }
    }

    /// Drops every cache entry and refetches the current view.
    pub async fn synchronize(&self) -> Result<RefreshOutcome, SourceError> {
        self.state.write().cache.invalidate_all();
        self.refresh().await
    }

    /// Refetches the venue roster and rebuilds the registry.
    pub async fn reload_venues(&self) -> SourceResult<()> {
        let venues = self.source.list_venues().await?;
        let mut state = self.state.write();
        state.registry = VenueRegistry::new(venues, self.config.slot_defaults());
        Ok(())
    }

    /// Whether a fetch for the current view is in flight.
    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Cached query count, for host-side diagnostics.
    pub fn cache_len(&self) -> usize {
        self.state.read().cache.len()
    }

    // ========================================================================
    // View state
    // ========================================================================
    //
    // Mutators only update the view; they take effect at the next refresh.

    pub fn view_state(&self) -> ViewState {
        self.state.read().view.clone()
    }

    pub fn set_view(&self, view: ViewKind) {
        self.state.write().view.set_view(view);
    }

    pub fn go_to(&self, date: NaiveDate) {
        self.state.write().view.go_to(date);
    }

    pub fn step(&self, n: i32) {
        self.state.write().view.step(n);
    }

    pub fn toggle_venue(&self, id: VenueId) {
        self.state.write().view.toggle_venue(id);
    }

    pub fn select_all_venues(&self) {
        self.state.write().view.select_all_venues();
    }

    // ========================================================================
    // Working set reads
    // ========================================================================

    /// Snapshot of the working set.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.state.read().reservations.clone()
    }

    /// Reservations on `date`, ordered by start time then venue.
    pub fn reservations_for_day(&self, date: NaiveDate) -> Vec<Reservation> {
        let state = self.state.read();
        let mut day: Vec<Reservation> = state
            .reservations
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect();
        day.sort_by_key(|r| (r.start_time, r.venue_id));
        day
    }

    /// Roster snapshot, sorted by id.
    pub fn venues(&self) -> Vec<Venue> {
        self.state.read().registry.venues().to_vec()
    }

    /// Slot grid for a venue (or the default grid for `None`).
    pub fn slots(&self, venue: Option<VenueId>) -> Vec<TimeOfDay> {
        self.state.read().registry.slots(venue)
    }

    /// Pixel scale matching a venue's slot interval.
    pub fn timeline(&self, venue: Option<VenueId>) -> TimelineScale {
        let state = self.state.read();
        self.config.timeline(state.registry.interval_minutes(venue))
    }

    /// Operating window for a venue (or the default for `None`).
    pub fn operating_window(&self, venue: Option<VenueId>) -> TimeWindow {
        self.state.read().registry.window(venue)
    }

    /// Per-venue utilization of the working set on `date`.
    pub fn occupancy(&self, date: NaiveDate) -> Vec<VenueOccupancy> {
        let state = self.state.read();
        occupancy_for_day(&state.reservations, &state.registry, date)
    }

    // ========================================================================
    // Slot interaction
    // ========================================================================

    /// Classifies the slot starting at `slot_start`, `None` when no whole
    /// slot starts there (it would run past midnight).
    pub fn slot_status(
        &self,
        venue: VenueId,
        date: NaiveDate,
        slot_start: TimeOfDay,
    ) -> Option<SlotStatus> {
        let state = self.state.read();
        let interval = state.registry.interval_minutes(Some(venue));
        let window = slot_window(slot_start, interval)?;
        let status = match first_conflict(&state.reservations, venue, date, window, None) {
            Some(occupant) => SlotStatus::Occupied {
                reservation: occupant.id,
                actionable: state.editing.is_none() || state.editing == Some(occupant.id),
            },
            None => SlotStatus::Free,
        };
        Some(status)
    }

    /// The one-interval window a booking started at `slot_start` would
    /// occupy, `None` when the slot is unavailable.
    pub fn propose_booking(
        &self,
        venue: VenueId,
        date: NaiveDate,
        slot_start: TimeOfDay,
    ) -> Option<TimeWindow> {
        let state = self.state.read();
        let interval = state.registry.interval_minutes(Some(venue));
        let window = slot_window(slot_start, interval)?;
        if first_conflict(&state.reservations, venue, date, window, None).is_some() {
            return None;
        }
        Some(window)
    }

    /// Admits a reservation into the working set after validating its
    /// window and checking for conflicts.
    pub fn insert_reservation(&self, reservation: Reservation) -> Result<(), BookingError> {
        let mut state = self.state.write();
        let Some(window) = reservation.window() else {
            return Err(BookingError::InvalidWindow { id: reservation.id });
        };
        if state.reservations.iter().any(|r| r.id == reservation.id) {
            return Err(BookingError::DuplicateId { id: reservation.id });
        }
        if reservation.blocks_slot() {
            if let Some(conflict) = first_conflict(
                &state.reservations,
                reservation.venue_id,
                reservation.date,
                window,
                None,
            ) {
                return Err(BookingError::Conflict {
                    id: reservation.id,
                    conflicting: conflict.id,
                });
            }
        }
        debug!("inserted reservation {} at {window}", reservation.id);
        state.reservations.push(reservation);
        Ok(())
    }

    /// Removes a reservation from the working set. Terminal; there is no
    /// undo. Clears edit or drag state that targeted it.
    pub fn delete_reservation(&self, id: ReservationId) -> bool {
        let mut state = self.state.write();
        let before = state.reservations.len();
        state.reservations.retain(|r| r.id != id);
        let removed = state.reservations.len() < before;
        if removed {
            if state.editing == Some(id) {
                state.editing = None;
            }
            if state.dragging == Some(id) {
                state.dragging = None;
            }
            debug!("deleted reservation {id}");
        }
        removed
    }

    // ========================================================================
    // Edit session
    // ========================================================================

    /// Opens an edit session on `id`, closes it when `id` is already under
    /// edit, or switches to `id` from another reservation. Unknown ids are
    /// ignored.
    pub fn toggle_edit(&self, id: ReservationId) {
        let mut state = self.state.write();
        if !state.reservations.iter().any(|r| r.id == id) {
            debug!("ignoring edit toggle for unknown reservation {id}");
            return;
        }
        state.editing = match state.editing {
            Some(current) if current == id => None,
            _ => Some(id),
        };
    }

    pub fn cancel_edit(&self) {
        self.state.write().editing = None;
    }

    pub fn editing(&self) -> Option<ReservationId> {
        self.state.read().editing
    }

    // ========================================================================
    // Drag lifecycle
    // ========================================================================

    /// Starts dragging `id`; returns `false` (and stays idle) for unknown
    /// ids.
    pub fn begin_drag(&self, id: ReservationId) -> bool {
        let mut state = self.state.write();
        if state.reservations.iter().any(|r| r.id == id) {
            state.dragging = Some(id);
            true
        } else {
            debug!("ignoring drag of unknown reservation {id}");
            false
        }
    }

    pub fn dragging(&self) -> Option<ReservationId> {
        self.state.read().dragging
    }

    /// Abandons the drag without touching any reservation.
    pub fn cancel_drag(&self) {
        self.state.write().dragging = None;
    }

    /// Ends the drag by dropping on `date` at `start`.
    ///
    /// The proposed placement keeps the reservation's duration and venue;
    /// only date and start time come from the drop target. The conflict
    /// check runs against the working set with the dragged reservation
    /// excluded, so dropping a reservation on its own slot commits
    /// trivially. Whatever the outcome, the drag state returns to idle.
    pub fn drop_on(&self, date: NaiveDate, start: TimeOfDay) -> DropOutcome {
        let mut state = self.state.write();
        let Some(drag_id) = state.dragging.take() else {
            return DropOutcome::NoActiveDrag;
        };
        let Some(idx) = state.reservations.iter().position(|r| r.id == drag_id) else {
            return DropOutcome::NoActiveDrag;
        };
        let Some(current) = state.reservations[idx].window() else {
            return DropOutcome::RejectedOutOfDay;
        };
        let Some(proposed) = current.slide_to(start) else {
            return DropOutcome::RejectedOutOfDay;
        };
        let venue = state.reservations[idx].venue_id;
        if let Some(conflict) =
            first_conflict(&state.reservations, venue, date, proposed, Some(drag_id))
        {
            warn!(
                "rejecting drop of reservation {drag_id}: overlaps reservation {}",
                conflict.id
            );
            return DropOutcome::RejectedConflict {
                conflicting: conflict.id,
            };
        }
        let reservation = &mut state.reservations[idx];
        reservation.date = date;
        reservation.start_time = proposed.start();
        reservation.end_time = proposed.end();
        debug!("moved reservation {drag_id} to {date} {proposed}");
        DropOutcome::Committed {
            reservation: drag_id,
            date,
            window: proposed,
        }
    }
}

#[cfg(all(test, feature = "local-source"))]
#[path = "board_tests.rs"]
mod board_tests;
