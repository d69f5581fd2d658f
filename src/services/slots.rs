//! Slot grid generation.
//!
//! A venue's bookable day is divided into fixed-length slots starting at the
//! operating window's opening time. Only slots that fit entirely inside the
//! window are produced; a trailing remainder shorter than the interval is
//! dropped.

use crate::models::{TimeOfDay, TimeWindow};

/// Start times of every whole slot inside `window`.
///
/// A zero interval yields an empty grid.
pub fn slot_starts(window: TimeWindow, interval_minutes: u16) -> Vec<TimeOfDay> {
    if interval_minutes == 0 {
        return Vec::new();
    }
    let mut starts =
        Vec::with_capacity(usize::from(window.duration_minutes() / interval_minutes));
    let mut cursor = window.start();
    while let Some(slot_end) = cursor.checked_add_minutes(interval_minutes) {
        if slot_end > window.end() {
            break;
        }
        starts.push(cursor);
        cursor = slot_end;
    }
    starts
}

/// The window a slot starting at `start` occupies, `None` when it would run
/// past midnight or the interval is zero.
pub fn slot_window(start: TimeOfDay, interval_minutes: u16) -> Option<TimeWindow> {
    let end = start.checked_add_minutes(interval_minutes)?;
    TimeWindow::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u16, m: u16) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    fn w(sh: u16, sm: u16, eh: u16, em: u16) -> TimeWindow {
        TimeWindow::new(t(sh, sm), t(eh, em)).unwrap()
    }

    #[test]
    fn test_thirty_minute_grid_over_fifteen_hours() {
        let starts = slot_starts(w(7, 0, 22, 0), 30);
        assert_eq!(starts.len(), 30);
        assert_eq!(starts.first().copied(), Some(t(7, 0)));
        assert_eq!(starts.last().copied(), Some(t(21, 30)));
    }

    #[test]
    fn test_partial_trailing_slot_is_dropped() {
        let starts = slot_starts(w(8, 0, 20, 30), 60);
        assert_eq!(starts.len(), 12);
        assert_eq!(starts.last().copied(), Some(t(19, 0)));
    }

    #[test]
    fn test_zero_interval_yields_nothing() {
        assert!(slot_starts(w(8, 0, 20, 0), 0).is_empty());
    }

    #[test]
    fn test_interval_longer_than_window_yields_nothing() {
        assert!(slot_starts(w(8, 0, 9, 0), 90).is_empty());
    }

    #[test]
    fn test_grid_reaches_end_of_day() {
        let starts = slot_starts(
            TimeWindow::new(t(23, 0), TimeOfDay::END_OF_DAY).unwrap(),
            30,
        );
        assert_eq!(starts, vec![t(23, 0), t(23, 30)]);
    }

    #[test]
    fn test_slot_window_spans_one_interval() {
        assert_eq!(slot_window(t(16, 0), 60), TimeWindow::new(t(16, 0), t(17, 0)));
        assert!(slot_window(t(23, 30), 60).is_none());
    }
}
