//! Board tuning knobs, loadable from TOML.
//!
//! Every field has a sensible default, so an empty file (or no file at all)
//! yields a working configuration. Hosts typically ship a `board.toml` like:
//!
//! ```toml
//! default_open = "07:00"
//! default_close = "23:00"
//! default_interval_minutes = 60
//! slot_height_px = 48.0
//! min_block_height_px = 16.0
//! cache_max_entries = 10
//! cache_ttl_secs = 30
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cache::CacheConfig;
use crate::models::{TimeOfDay, TimeWindow};
use crate::services::registry::SlotDefaults;
use crate::services::timeline::TimelineScale;

/// Configuration for a [`crate::board::ScheduleBoard`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Opening time applied to venues without an operating override.
    #[serde(default = "default_open")]
    pub default_open: TimeOfDay,
    /// Closing time applied to venues without an operating override.
    #[serde(default = "default_close")]
    pub default_close: TimeOfDay,
    /// Slot interval applied to venues without an interval override.
    #[serde(default = "default_interval_minutes")]
    pub default_interval_minutes: u16,
    /// Rendered height of one slot interval.
    #[serde(default = "default_slot_height_px")]
    pub slot_height_px: f64,
    /// Height floor that keeps very short reservations clickable.
    #[serde(default = "default_min_block_height_px")]
    pub min_block_height_px: f64,
    /// Query cache capacity.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    /// Query cache entry lifetime in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn hm(hour: u16, minute: u16) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap_or(TimeOfDay::MIDNIGHT)
}

fn default_open() -> TimeOfDay {
    hm(7, 0)
}

fn default_close() -> TimeOfDay {
    hm(23, 0)
}

fn default_interval_minutes() -> u16 {
    60
}

fn default_slot_height_px() -> f64 {
    48.0
}

fn default_min_block_height_px() -> f64 {
    16.0
}

fn default_cache_max_entries() -> usize {
    10
}

fn default_cache_ttl_secs() -> u64 {
    30
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_open: default_open(),
            default_close: default_close(),
            default_interval_minutes: default_interval_minutes(),
            slot_height_px: default_slot_height_px(),
            min_block_height_px: default_min_block_height_px(),
            cache_max_entries: default_cache_max_entries(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl BoardConfig {
    /// Loads and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading board config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing board config {}", path.display()))
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("invalid board config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.default_close <= self.default_open {
            anyhow::bail!(
                "default operating window {}-{} is empty",
                self.default_open,
                self.default_close
            );
        }
        if self.default_interval_minutes == 0 {
            anyhow::bail!("default slot interval must be positive");
        }
        Ok(())
    }

    /// The registry fallbacks this configuration encodes.
    pub fn slot_defaults(&self) -> SlotDefaults {
        let window = TimeWindow::new(self.default_open, self.default_close)
            .unwrap_or(TimeWindow::FULL_DAY);
        SlotDefaults {
            window,
            interval_minutes: self.default_interval_minutes,
        }
    }

    /// Cache tuning derived from the flat fields.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            max_entries: self.cache_max_entries,
            ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }

    /// Pixel scale for a column rendered at the given slot interval.
    pub fn timeline(&self, interval_minutes: u16) -> TimelineScale {
        TimelineScale::new(
            interval_minutes,
            self.slot_height_px,
            self.min_block_height_px,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = BoardConfig::default();
        assert_eq!(config.default_open.to_string(), "07:00");
        assert_eq!(config.default_close.to_string(), "23:00");
        assert_eq!(config.default_interval_minutes, 60);
        assert_eq!(config.cache().max_entries, 10);
        assert_eq!(config.cache().ttl, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_selected_fields() {
        let config = BoardConfig::from_toml_str(
            "default_interval_minutes = 30\ncache_ttl_secs = 5\n",
        )
        .unwrap();
        assert_eq!(config.default_interval_minutes, 30);
        assert_eq!(config.cache_ttl_secs, 5);
        assert_eq!(config.default_open, default_open());
    }

    #[test]
    fn test_times_parse_from_strings() {
        let config =
            BoardConfig::from_toml_str("default_open = \"08:30\"\ndefault_close = \"22:00\"\n")
                .unwrap();
        assert_eq!(config.slot_defaults().window.start().to_string(), "08:30");
        assert_eq!(config.slot_defaults().window.duration_minutes(), 810);
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let err = BoardConfig::from_toml_str(
            "default_open = \"20:00\"\ndefault_close = \"08:00\"\n",
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        assert!(BoardConfig::from_toml_str("default_interval_minutes = 0\n").is_err());
    }
}
