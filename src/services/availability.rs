//! Conflict detection for venue reservations.
//!
//! All checks use half-open `[start, end)` semantics: a reservation ending
//! at 09:00 never conflicts with one starting at 09:00. Cancelled
//! reservations are transparent. The optional `exclude` id lets edit and
//! reschedule flows test a candidate placement against everything except the
//! reservation being moved.

use chrono::NaiveDate;

use crate::api::{Reservation, ReservationId, VenueId};
use crate::models::{TimeOfDay, TimeWindow};
use crate::services::slots::slot_window;

/// First blocking reservation on `venue`/`date` that overlaps `candidate`,
/// skipping `exclude`.
///
/// An `exclude` id absent from the collection behaves as no exclusion.
/// Reservations whose stored times are invalid cannot overlap anything.
pub fn first_conflict<'a>(
    reservations: &'a [Reservation],
    venue: VenueId,
    date: NaiveDate,
    candidate: TimeWindow,
    exclude: Option<ReservationId>,
) -> Option<&'a Reservation> {
    reservations.iter().find(|r| {
        if exclude == Some(r.id) {
            return false;
        }
        if r.venue_id != venue || r.date != date || !r.blocks_slot() {
            return false;
        }
        match r.window() {
            Some(window) => window.overlaps(&candidate),
            None => false,
        }
    })
}

/// Whether any blocking reservation overlaps `candidate` on `venue`/`date`.
pub fn conflicts_with(
    reservations: &[Reservation],
    venue: VenueId,
    date: NaiveDate,
    candidate: TimeWindow,
    exclude: Option<ReservationId>,
) -> bool {
    first_conflict(reservations, venue, date, candidate, exclude).is_some()
}

/// Whether the one-interval slot starting at `slot_start` is free.
///
/// A slot that cannot fit before midnight is never free.
pub fn is_slot_free(
    reservations: &[Reservation],
    venue: VenueId,
    date: NaiveDate,
    slot_start: TimeOfDay,
    interval_minutes: u16,
) -> bool {
    match slot_window(slot_start, interval_minutes) {
        Some(window) => !conflicts_with(reservations, venue, date, window, None),
        None => false,
    }
}
