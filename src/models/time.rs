//! Wall-clock time handling for venue schedules.
//!
//! Reservations never span midnight, so all slot arithmetic happens on a
//! minutes-since-midnight scale. [`TimeOfDay`] is that scalar and
//! [`TimeWindow`] is a half-open `[start, end)` pair of them. Both types
//! serialize in the `"HH:MM"` form the booking frontends and seed catalogs
//! use.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Minutes in a full day; also the exclusive upper bound of [`TimeOfDay`].
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error raised when parsing an `"HH:MM"` time string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    /// The input did not have the `HH:MM` shape.
    #[error("malformed time of day `{input}`, expected HH:MM")]
    Malformed { input: String },
    /// The input parsed but names a moment outside the day.
    #[error("time of day `{input}` is outside 00:00..=24:00")]
    OutOfRange { input: String },
}

/// A moment within a single day, measured in minutes since midnight.
///
/// The value `24:00` (1440 minutes) is allowed so operating windows may end
/// exactly at midnight; it is only meaningful as an exclusive window end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Start of day, `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Exclusive end of day, `24:00`.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Builds a time from minutes since midnight.
    ///
    /// Returns `None` when `minutes` exceeds a full day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes <= MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Builds a time from an hour/minute pair.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Hour component (0..=24).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0..=59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Adds `minutes`, returning `None` if the result would leave the day.
    pub fn checked_add_minutes(&self, minutes: u16) -> Option<Self> {
        Self::from_minutes(self.0.checked_add(minutes)?)
    }

    /// Signed minute distance from `earlier` to `self`.
    pub fn minutes_since(&self, earlier: TimeOfDay) -> i32 {
        i32::from(self.0) - i32::from(earlier.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseTimeError::Malformed {
            input: s.to_string(),
        };
        let (hh, mm) = s.split_once(':').ok_or_else(malformed)?;
        let hour: u16 = hh.trim().parse().map_err(|_| malformed())?;
        let minute: u16 = mm.trim().parse().map_err(|_| malformed())?;
        Self::from_hm(hour, minute).ok_or_else(|| ParseTimeError::OutOfRange {
            input: s.to_string(),
        })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Half-open `[start, end)` window within a single day.
///
/// Construction through [`TimeWindow::new`] guarantees `start < end`, so an
/// existing window always has positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    /// The whole day, `00:00-24:00`.
    pub const FULL_DAY: TimeWindow = TimeWindow {
        start: TimeOfDay::MIDNIGHT,
        end: TimeOfDay::END_OF_DAY,
    };

    /// Builds a window, rejecting empty or inverted pairs.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Window length in minutes; always positive.
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether `t` falls inside the window (`start <= t < end`).
    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.start <= t && t < self.end
    }

    /// Half-open overlap test. Windows that merely touch do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The same-duration window starting at `start`, or `None` when it would
    /// run past midnight.
    pub fn slide_to(&self, start: TimeOfDay) -> Option<TimeWindow> {
        let end = start.checked_add_minutes(self.duration_minutes())?;
        TimeWindow::new(start, end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for TimeWindow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawWindow {
            start: self.start,
            end: self.end,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawWindow::deserialize(deserializer)?;
        TimeWindow::new(raw.start, raw.end).ok_or_else(|| {
            D::Error::custom(format!("empty time window {}-{}", raw.start, raw.end))
        })
    }
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
    fn test_parses_plain_times() {
        assert_eq!("07:30".parse::<TimeOfDay>().unwrap(), t(7, 30));
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap(), TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn test_parses_end_of_day() {
        assert_eq!(
            "24:00".parse::<TimeOfDay>().unwrap(),
            TimeOfDay::END_OF_DAY
        );
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            "0730".parse::<TimeOfDay>(),
            Err(ParseTimeError::Malformed { .. })
        ));
        assert!(matches!(
            "seven:30".parse::<TimeOfDay>(),
            Err(ParseTimeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_input() {
        assert!(matches!(
            "24:01".parse::<TimeOfDay>(),
            Err(ParseTimeError::OutOfRange { .. })
        ));
        assert!(matches!(
            "12:60".parse::<TimeOfDay>(),
            Err(ParseTimeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_huge_hours_without_wrapping() {
        // 1100 * 60 exceeds u16::MAX; the parse must fail, not alias 07:44.
        assert!(matches!(
            "1100:00".parse::<TimeOfDay>(),
            Err(ParseTimeError::OutOfRange { .. })
        ));
        assert!(matches!(
            "2000:00".parse::<TimeOfDay>(),
            Err(ParseTimeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_displays_zero_padded() {
        assert_eq!(t(8, 5).to_string(), "08:05");
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
    }

    #[test]
    fn test_times_are_ordered() {
        assert!(t(8, 0) < t(8, 30));
        assert!(t(23, 59) < TimeOfDay::END_OF_DAY);
    }

    #[test]
    fn test_checked_add_stops_at_midnight() {
        assert_eq!(t(23, 0).checked_add_minutes(60), Some(TimeOfDay::END_OF_DAY));
        assert_eq!(t(23, 0).checked_add_minutes(61), None);
    }

    #[test]
    fn test_minutes_since_is_signed() {
        assert_eq!(t(9, 0).minutes_since(t(7, 0)), 120);
        assert_eq!(t(7, 0).minutes_since(t(9, 0)), -120);
    }

    #[test]
    fn test_window_rejects_inverted_and_empty() {
        assert!(TimeWindow::new(t(9, 0), t(9, 0)).is_none());
        assert!(TimeWindow::new(t(10, 0), t(9, 0)).is_none());
    }

    #[test]
    fn test_window_duration_and_contains() {
        let win = w(8, 0, 9, 30);
        assert_eq!(win.duration_minutes(), 90);
        assert!(win.contains(t(8, 0)));
        assert!(win.contains(t(9, 29)));
        assert!(!win.contains(t(9, 30)));
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        assert!(!w(8, 0, 9, 0).overlaps(&w(9, 0, 10, 0)));
        assert!(!w(9, 0, 10, 0).overlaps(&w(8, 0, 9, 0)));
    }

    #[test]
    fn test_partial_overlap_detected_both_ways() {
        let a = w(8, 0, 9, 30);
        let b = w(9, 0, 10, 0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_identical_windows_overlap() {
        let a = w(14, 0, 15, 0);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_slide_keeps_duration() {
        let moved = w(14, 0, 15, 30).slide_to(t(16, 0)).unwrap();
        assert_eq!(moved, w(16, 0, 17, 30));
    }

    #[test]
    fn test_slide_past_midnight_fails() {
        assert!(w(14, 0, 15, 30).slide_to(t(23, 0)).is_none());
    }

    #[test]
    fn test_serde_round_trip_uses_hhmm_strings() {
        let json = serde_json::to_string(&t(7, 30)).unwrap();
        assert_eq!(json, "\"07:30\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t(7, 30));
    }

    #[test]
    fn test_window_deserialization_rejects_empty() {
        let err = serde_json::from_str::<TimeWindow>(r#"{"start":"09:00","end":"09:00"}"#);
        assert!(err.is_err());
    }
}
