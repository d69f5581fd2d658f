//! Venue roster lookup with configured fallbacks.

use crate::api::{Venue, VenueId};
use crate::models::{TimeOfDay, TimeWindow};
use crate::services::slots::slot_starts;

/// Fallback operating window and slot interval for venues without overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDefaults {
    pub window: TimeWindow,
    pub interval_minutes: u16,
}

/// The known venues plus the defaults applied when a venue carries no
/// override or a lookup names no (or an unknown) venue.
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    venues: Vec<Venue>,
    defaults: SlotDefaults,
}

impl VenueRegistry {
    pub fn new(mut venues: Vec<Venue>, defaults: SlotDefaults) -> Self {
        venues.sort_by_key(|v| v.id);
        venues.dedup_by_key(|v| v.id);
        Self { venues, defaults }
    }

    /// Roster sorted by id.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|idx| &self.venues[idx])
    }

    pub fn defaults(&self) -> SlotDefaults {
        self.defaults
    }

    /// Operating window for `venue`; `None` or an unknown id yields the
    /// default window.
    pub fn window(&self, venue: Option<VenueId>) -> TimeWindow {
        venue
            .and_then(|id| self.venue(id))
            .and_then(|v| v.operating)
            .unwrap_or(self.defaults.window)
    }

    /// Slot interval for `venue` with the same fallback scheme as
    /// [`VenueRegistry::window`].
    pub fn interval_minutes(&self, venue: Option<VenueId>) -> u16 {
        venue
            .and_then(|id| self.venue(id))
            .and_then(|v| v.slot_interval_minutes)
            .unwrap_or(self.defaults.interval_minutes)
    }

    /// Slot grid for `venue`, combining its window and interval.
    pub fn slots(&self, venue: Option<VenueId>) -> Vec<TimeOfDay> {
        slot_starts(self.window(venue), self.interval_minutes(venue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u16, m: u16) -> TimeOfDay {
        TimeOfDay::from_hm(h, m).unwrap()
    }

    fn defaults() -> SlotDefaults {
        SlotDefaults {
            window: TimeWindow::new(t(7, 0), t(23, 0)).unwrap(),
            interval_minutes: 60,
        }
    }

    fn registry() -> VenueRegistry {
        let clay = Venue::new(VenueId::new(2), "Clay Court")
            .with_operating(TimeWindow::new(t(8, 0), t(20, 0)).unwrap())
            .with_interval(90);
        let hall = Venue::new(VenueId::new(1), "Main Hall");
        VenueRegistry::new(vec![clay, hall], defaults())
    }

    #[test]
    fn test_roster_is_sorted_and_deduped() {
        let reg = VenueRegistry::new(
            vec![
                Venue::new(VenueId::new(2), "B"),
                Venue::new(VenueId::new(1), "A"),
                Venue::new(VenueId::new(2), "B again"),
            ],
            defaults(),
        );
        let ids: Vec<i64> = reg.venues().iter().map(|v| v.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let reg = registry();
        let id = Some(VenueId::new(2));
        assert_eq!(reg.window(id).start(), t(8, 0));
        assert_eq!(reg.interval_minutes(id), 90);
    }

    #[test]
    fn test_venue_without_override_inherits_defaults() {
        let reg = registry();
        let id = Some(VenueId::new(1));
        assert_eq!(reg.window(id).end(), t(23, 0));
        assert_eq!(reg.interval_minutes(id), 60);
    }

    #[test]
    fn test_unknown_and_absent_venues_fall_back() {
        let reg = registry();
        assert_eq!(reg.window(Some(VenueId::new(99))), reg.defaults().window);
        assert_eq!(reg.interval_minutes(None), 60);
        assert!(reg.venue(VenueId::new(99)).is_none());
    }

    #[test]
    fn test_slots_respect_per_venue_settings() {
        let reg = registry();
        // 08:00-20:00 at 90 minutes: 8 whole slots.
        let starts = reg.slots(Some(VenueId::new(2)));
        assert_eq!(starts.len(), 8);
        assert_eq!(starts.first().copied(), Some(t(8, 0)));
        assert_eq!(starts.last().copied(), Some(t(18, 30)));
    }
}
