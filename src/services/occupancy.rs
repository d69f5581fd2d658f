//! Per-venue utilization summaries for the platform's reporting surfaces.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::{Reservation, VenueId};
use crate::models::TimeWindow;
use crate::services::registry::VenueRegistry;

/// How heavily one venue is booked on a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueOccupancy {
    pub venue_id: VenueId,
    pub reservation_count: usize,
    /// Booked minutes clipped to the operating window.
    pub reserved_minutes: u32,
    /// Length of the operating window in minutes.
    pub open_minutes: u32,
    /// `reserved_minutes / open_minutes` in `0.0..=1.0`.
    pub utilization: f64,
}

/// Summarizes every registered venue for `date`.
///
/// Cancelled reservations and minutes outside the operating window do not
/// count. Overlapping reservations each contribute their own clipped
/// minutes, so heavy double-booking can drive utilization toward 1.0 fast.
pub fn occupancy_for_day(
    reservations: &[Reservation],
    registry: &VenueRegistry,
    date: NaiveDate,
) -> Vec<VenueOccupancy> {
    registry
        .venues()
        .iter()
        .map(|venue| {
            let window = registry.window(Some(venue.id));
            let open_minutes = u32::from(window.duration_minutes());
            let mut reserved_minutes = 0u32;
            let mut reservation_count = 0usize;
            for r in reservations {
                if r.venue_id != venue.id || r.date != date || !r.blocks_slot() {
                    continue;
                }
                let Some(booked) = r.window() else { continue };
                reservation_count += 1;
                reserved_minutes += clipped_minutes(&booked, &window);
            }
            let utilization = if open_minutes == 0 {
                0.0
            } else {
                f64::from(reserved_minutes.min(open_minutes)) / f64::from(open_minutes)
            };
            VenueOccupancy {
                venue_id: venue.id,
                reservation_count,
                reserved_minutes,
                open_minutes,
                utilization,
            }
        })
        .collect()
}

fn clipped_minutes(booked: &TimeWindow, open: &TimeWindow) -> u32 {
    let start = booked.start().max(open.start());
    let end = booked.end().min(open.end());
    u32::from(end.minutes().saturating_sub(start.minutes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ClientId, ReservationId, ReservationStatus, Venue};
    use crate::models::TimeOfDay;
    use crate::services::registry::SlotDefaults;

    fn t(h: u16, m: u16) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> VenueRegistry {
        VenueRegistry::new(
            vec![Venue::new(VenueId::new(1), "Court 1")
                .with_operating(TimeWindow::new(t(8, 0), t(20, 0)).unwrap())],
            SlotDefaults {
                window: TimeWindow::new(t(7, 0), t(23, 0)).unwrap(),
                interval_minutes: 60,
            },
        )
    }

    fn reservation(id: i64, start: TimeOfDay, end: TimeOfDay) -> Reservation {
        Reservation::new(
            ReservationId::new(id),
            VenueId::new(1),
            ClientId::new(id),
            date(2024, 6, 15),
            start,
            end,
            ReservationStatus::Confirmed,
        )
    }

    #[test]
    fn test_sums_booked_minutes() {
        let reservations = vec![
            reservation(1, t(9, 0), t(10, 0)),
            reservation(2, t(14, 0), t(15, 30)),
        ];
        let summary = occupancy_for_day(&reservations, &registry(), date(2024, 6, 15));
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].reservation_count, 2);
        assert_eq!(summary[0].reserved_minutes, 150);
        assert_eq!(summary[0].open_minutes, 720);
        assert!((summary[0].utilization - 150.0 / 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_and_other_days_do_not_count() {
        let mut cancelled = reservation(1, t(9, 0), t(10, 0));
        cancelled.status = ReservationStatus::Cancelled;
        let mut other_day = reservation(2, t(9, 0), t(10, 0));
        other_day.date = date(2024, 6, 16);
        let summary =
            occupancy_for_day(&[cancelled, other_day], &registry(), date(2024, 6, 15));
        assert_eq!(summary[0].reservation_count, 0);
        assert_eq!(summary[0].reserved_minutes, 0);
        assert_eq!(summary[0].utilization, 0.0);
    }

    #[test]
    fn test_minutes_outside_the_window_are_clipped() {
        // Booked 07:00-09:00 against an 08:00 opening: one hour counts.
        let summary = occupancy_for_day(
            &[reservation(1, t(7, 0), t(9, 0))],
            &registry(),
            date(2024, 6, 15),
        );
        assert_eq!(summary[0].reserved_minutes, 60);
    }
}
