//! Core value types shared across the scheduling services.

pub mod time;
pub mod view;

pub use time::{ParseTimeError, TimeOfDay, TimeWindow};
pub use view::{VenueSelection, ViewKind, ViewState};
