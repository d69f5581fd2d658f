//! Time-to-pixel mapping for day and week timeline renderers.

use serde::Serialize;

use crate::api::Reservation;
use crate::models::TimeOfDay;

/// Vertical geometry of one rendered reservation block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineBlock {
    pub top_px: f64,
    pub height_px: f64,
}

/// Converts times and durations into vertical pixel coordinates.
///
/// One slot interval maps to `slot_height_px`; durations scale linearly and
/// are floored at `min_block_height_px` so very short reservations stay
/// clickable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    interval_minutes: u16,
    slot_height_px: f64,
    min_block_height_px: f64,
}

impl TimelineScale {
    /// Builds a scale. A zero interval is stored as one minute so the scale
    /// stays finite.
    pub fn new(interval_minutes: u16, slot_height_px: f64, min_block_height_px: f64) -> Self {
        Self {
            interval_minutes: interval_minutes.max(1),
            slot_height_px,
            min_block_height_px,
        }
    }

    /// Pixel offset of `t` from the top of a column starting at `day_start`.
    ///
    /// Times before `day_start` clamp to the top of the column.
    pub fn offset_px(&self, t: TimeOfDay, day_start: TimeOfDay) -> f64 {
        let minutes = t.minutes_since(day_start).max(0);
        f64::from(minutes) * self.slot_height_px / f64::from(self.interval_minutes)
    }

    /// Rendered height of a block spanning `duration_minutes`.
    pub fn height_px(&self, duration_minutes: u16) -> f64 {
        let raw =
            f64::from(duration_minutes) * self.slot_height_px / f64::from(self.interval_minutes);
        raw.max(self.min_block_height_px)
    }

    /// Geometry for a reservation in a column starting at `day_start`;
    /// `None` when the stored times are invalid.
    pub fn block_for(&self, reservation: &Reservation, day_start: TimeOfDay) -> Option<TimelineBlock> {
        let window = reservation.window()?;
        Some(TimelineBlock {
            top_px: self.offset_px(window.start(), day_start),
            height_px: self.height_px(window.duration_minutes()),
        })
    }
}
