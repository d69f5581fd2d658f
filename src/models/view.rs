//! Presentation state the booking frontends drive.

use std::collections::BTreeSet;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::api::VenueId;

/// Calendar presentation the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Month,
    Week,
    Day,
    List,
}

/// Which venues the current view is restricted to.
///
/// `All` carries no ids; a restriction is always a non-empty set. Toggling
/// the last selected venue off returns to `All`, so an empty restriction is
/// unreachable through the public operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueSelection {
    All,
    Only(BTreeSet<VenueId>),
}

impl VenueSelection {
    /// Restriction to the given venues; an empty iterator yields `All`.
    pub fn only(ids: impl IntoIterator<Item = VenueId>) -> Self {
        let set: BTreeSet<VenueId> = ids.into_iter().collect();
        if set.is_empty() {
            VenueSelection::All
        } else {
            VenueSelection::Only(set)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, VenueSelection::All)
    }

    /// Whether the selection admits `id`.
    pub fn includes(&self, id: VenueId) -> bool {
        match self {
            VenueSelection::All => true,
            VenueSelection::Only(set) => set.contains(&id),
        }
    }

    /// Sorted id list for query filters; `None` when unrestricted.
    pub fn ids(&self) -> Option<Vec<VenueId>> {
        match self {
            VenueSelection::All => None,
            VenueSelection::Only(set) => Some(set.iter().copied().collect()),
        }
    }

    /// Flips `id` in or out of the selection.
    ///
    /// From `All` this narrows to just `id`; removing the last selected
    /// venue widens back to `All`.
    pub fn toggle(&mut self, id: VenueId) {
        match self {
            VenueSelection::All => {
                *self = VenueSelection::Only(BTreeSet::from([id]));
            }
            VenueSelection::Only(set) => {
                if set.contains(&id) {
                    set.remove(&id);
                    if set.is_empty() {
                        *self = VenueSelection::All;
                    }
                } else {
                    set.insert(id);
                }
            }
        }
    }

    pub fn select_all(&mut self) {
        *self = VenueSelection::All;
    }
}

impl Default for VenueSelection {
    fn default() -> Self {
        VenueSelection::All
    }
}

/// The view, anchor date and venue restriction a session is showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub view: ViewKind,
    pub anchor: NaiveDate,
    pub venues: VenueSelection,
}

impl ViewState {
    pub fn new(view: ViewKind, anchor: NaiveDate) -> Self {
        Self {
            view,
            anchor,
            venues: VenueSelection::All,
        }
    }

    /// Switches the presentation, keeping anchor and venue selection.
    pub fn set_view(&mut self, view: ViewKind) {
        self.view = view;
    }

    /// Jumps the anchor to an arbitrary date.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.anchor = date;
    }

    /// Moves the anchor by `n` view-sized steps (negative steps go back).
    ///
    /// Month and list views step whole months, week views step seven days,
    /// day views a single day. Steps that would leave chrono's date range
    /// leave the anchor untouched.
    pub fn step(&mut self, n: i32) {
        let moved = match self.view {
            ViewKind::Month | ViewKind::List => {
                if n >= 0 {
                    self.anchor.checked_add_months(Months::new(n as u32))
                } else {
                    self.anchor.checked_sub_months(Months::new(n.unsigned_abs()))
                }
            }
            ViewKind::Week => self.anchor.checked_add_signed(Duration::days(7 * i64::from(n))),
            ViewKind::Day => self.anchor.checked_add_signed(Duration::days(i64::from(n))),
        };
        if let Some(anchor) = moved {
            self.anchor = anchor;
        }
    }

    pub fn toggle_venue(&mut self, id: VenueId) {
        self.venues.toggle(id);
    }

    pub fn select_all_venues(&mut self) {
        self.venues.select_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_toggle_narrows_then_widens() {
        let mut sel = VenueSelection::All;
        sel.toggle(VenueId::new(3));
        assert_eq!(sel, VenueSelection::only([VenueId::new(3)]));
        sel.toggle(VenueId::new(7));
        assert_eq!(sel, VenueSelection::only([VenueId::new(3), VenueId::new(7)]));
        sel.toggle(VenueId::new(3));
        assert_eq!(sel, VenueSelection::only([VenueId::new(7)]));
        sel.toggle(VenueId::new(7));
        assert_eq!(sel, VenueSelection::All);
    }

    #[test]
    fn test_selection_never_becomes_empty() {
        assert_eq!(VenueSelection::only(Vec::new()), VenueSelection::All);
        let mut sel = VenueSelection::only([VenueId::new(1)]);
        sel.toggle(VenueId::new(1));
        assert!(sel.is_all());
        assert!(sel.ids().is_none());
    }

    #[test]
    fn test_ids_come_out_sorted() {
        let sel = VenueSelection::only([VenueId::new(9), VenueId::new(2), VenueId::new(5)]);
        assert_eq!(
            sel.ids().unwrap(),
            vec![VenueId::new(2), VenueId::new(5), VenueId::new(9)]
        );
    }

    #[test]
    fn test_all_includes_everything() {
        assert!(VenueSelection::All.includes(VenueId::new(42)));
        let sel = VenueSelection::only([VenueId::new(1)]);
        assert!(sel.includes(VenueId::new(1)));
        assert!(!sel.includes(VenueId::new(2)));
    }

    #[test]
    fn test_month_step_crosses_year_end() {
        let mut state = ViewState::new(ViewKind::Month, date(2024, 12, 15));
        state.step(1);
        assert_eq!(state.anchor, date(2025, 1, 15));
        state.step(-2);
        assert_eq!(state.anchor, date(2024, 11, 15));
    }

    #[test]
    fn test_month_step_clamps_short_months() {
        let mut state = ViewState::new(ViewKind::Month, date(2024, 1, 31));
        state.step(1);
        assert_eq!(state.anchor, date(2024, 2, 29));
    }

    #[test]
    fn test_week_and_day_steps() {
        let mut state = ViewState::new(ViewKind::Week, date(2024, 6, 15));
        state.step(1);
        assert_eq!(state.anchor, date(2024, 6, 22));
        state.set_view(ViewKind::Day);
        state.step(-1);
        assert_eq!(state.anchor, date(2024, 6, 21));
    }

    #[test]
    fn test_set_view_keeps_anchor_and_selection() {
        let mut state = ViewState::new(ViewKind::Month, date(2024, 6, 15));
        state.toggle_venue(VenueId::new(4));
        state.set_view(ViewKind::Day);
        assert_eq!(state.anchor, date(2024, 6, 15));
        assert_eq!(state.venues, VenueSelection::only([VenueId::new(4)]));
    }
}
