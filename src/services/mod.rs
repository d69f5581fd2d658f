//! Scheduling logic built on the value types in [`crate::models`].
//!
//! Everything in here is pure: functions take reservation slices and value
//! types and return values, leaving state handling to [`crate::board`].

pub mod availability;
pub mod occupancy;
pub mod registry;
pub mod slots;
pub mod timeline;
pub mod view_query;

pub use availability::{conflicts_with, first_conflict, is_slot_free};
pub use occupancy::{occupancy_for_day, VenueOccupancy};
pub use registry::{SlotDefaults, VenueRegistry};
pub use slots::{slot_starts, slot_window};
pub use timeline::{TimelineBlock, TimelineScale};
pub use view_query::{derive_filters, period_bounds, same_period};
