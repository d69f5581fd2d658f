//! Property-based checks of the interval and slot arithmetic using proptest.
//!
//! These verify invariants that must hold for *any* valid window, not just
//! the handful of cases the unit tests pick.

use proptest::prelude::*;

use arena_scheduling::models::time::MINUTES_PER_DAY;
use arena_scheduling::models::{TimeOfDay, TimeWindow};
use arena_scheduling::services::slot_starts;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn minutes(m: u16) -> TimeOfDay {
    TimeOfDay::from_minutes(m).unwrap()
}

fn arb_window() -> impl Strategy<Value = TimeWindow> {
    (0u16..MINUTES_PER_DAY)
        .prop_flat_map(|start| (Just(start), 1u16..=(MINUTES_PER_DAY - start)))
        .prop_map(|(start, len)| {
            TimeWindow::new(minutes(start), minutes(start + len)).unwrap()
        })
}

fn arb_interval() -> impl Strategy<Value = u16> {
    1u16..=180
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_window(), b in arb_window()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn every_window_overlaps_itself(a in arb_window()) {
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn touching_windows_never_overlap(a in arb_window(), len in 1u16..=120) {
        // Build b immediately after a whenever it still fits in the day.
        if let Some(b_end) = a.end().checked_add_minutes(len) {
            let b = TimeWindow::new(a.end(), b_end).unwrap();
            prop_assert!(!a.overlaps(&b));
            prop_assert!(!b.overlaps(&a));
        }
    }

    #[test]
    fn contained_windows_always_overlap(a in arb_window()) {
        // Shrink a by one minute on each side where it stays non-empty.
        if a.duration_minutes() >= 3 {
            let inner = TimeWindow::new(
                minutes(a.start().minutes() + 1),
                minutes(a.end().minutes() - 1),
            )
            .unwrap();
            prop_assert!(a.overlaps(&inner));
            prop_assert!(inner.overlaps(&a));
        }
    }

    #[test]
    fn slots_fit_and_are_evenly_spaced(window in arb_window(), interval in arb_interval()) {
        let starts = slot_starts(window, interval);
        prop_assert_eq!(
            starts.len(),
            usize::from(window.duration_minutes() / interval)
        );
        for pair in starts.windows(2) {
            prop_assert_eq!(pair[1].minutes_since(pair[0]), i32::from(interval));
        }
        if let Some(last) = starts.last() {
            let last_end = last.checked_add_minutes(interval).unwrap();
            prop_assert!(last_end <= window.end());
        }
        if let Some(first) = starts.first() {
            prop_assert_eq!(*first, window.start());
        }
    }

    #[test]
    fn slide_preserves_duration(a in arb_window(), target in 0u16..MINUTES_PER_DAY) {
        if let Some(moved) = a.slide_to(minutes(target)) {
            prop_assert_eq!(moved.duration_minutes(), a.duration_minutes());
            prop_assert_eq!(moved.start(), minutes(target));
        }
    }
}
