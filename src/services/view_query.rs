//! Derivation of reservation queries from presentation state.
//!
//! Every view resolves to one inclusive day period: month and list views
//! cover the anchor's calendar month, week views the Sunday-to-Saturday week
//! containing the anchor, day views the anchor itself. The derived
//! [`QueryFilters`] are what the cache keys on and the source fetches by.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::api::{DatePeriod, QueryFilters};
use crate::models::{ViewKind, ViewState};

/// The day period a view anchored at `anchor` spans.
pub fn period_bounds(view: ViewKind, anchor: NaiveDate) -> DatePeriod {
    match view {
        ViewKind::Month | ViewKind::List => month_bounds(anchor),
        ViewKind::Week => week_bounds(anchor),
        ViewKind::Day => DatePeriod::single(anchor),
    }
}

/// Resolves the full query for the given presentation state.
pub fn derive_filters(state: &ViewState) -> QueryFilters {
    let period = period_bounds(state.view, state.anchor);
    match state.venues.ids() {
        None => QueryFilters::for_period(period),
        Some(ids) => QueryFilters::with_venues(period, ids),
    }
}

/// Whether two anchors resolve to the same period under `view`.
pub fn same_period(view: ViewKind, a: NaiveDate, b: NaiveDate) -> bool {
    period_bounds(view, a) == period_bounds(view, b)
}

fn month_bounds(anchor: NaiveDate) -> DatePeriod {
    let start = anchor.with_day(1).unwrap_or(anchor);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(anchor);
    DatePeriod { start, end }
}

fn week_bounds(anchor: NaiveDate) -> DatePeriod {
    let week = anchor.week(Weekday::Sun);
    DatePeriod {
        start: week.first_day(),
        end: week.last_day(),
    }
}
