//! Bounded reuse of fetched reservation queries.
//!
//! The cache keys on the canonical serialization of [`QueryFilters`]. Two
//! probes hit the same entry exactly when they resolve to the same period
//! and venue set, which also covers the same-period rule for nearby anchors:
//! a month view anchored on the 15th and one anchored on the 20th derive
//! identical filters and therefore share an entry (month and list views do
//! too).
//!
//! Entries expire a fixed time after their fetch and the store keeps only
//! the most recently fetched entries. Invalidation is all-or-nothing; there
//! is deliberately no per-entry invalidation surface.

use std::time::{Duration, Instant};

use log::debug;

use crate::api::{QueryFilters, Reservation};

/// Tuning knobs for [`QueryCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries kept beyond this count are evicted oldest-first.
    pub max_entries: usize,
    /// Entries older than this at lookup time are misses.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10,
            ttl: Duration::from_secs(30),
        }
    }
}

struct CacheEntry {
    key: String,
    reservations: Vec<Reservation>,
    fetched_at: Instant,
}

/// TTL and capacity bounded store of fetched reservation sets.
///
/// One instance belongs to one [`crate::board::ScheduleBoard`]; nothing in
/// here is shared or global.
pub struct QueryCache {
    entries: Vec<CacheEntry>,
    config: CacheConfig,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// The cached reservations for `filters`, if a fresh entry exists.
    ///
    /// Expired entries encountered by the probe are removed rather than
    /// left to linger.
    pub fn lookup(&mut self, filters: &QueryFilters) -> Option<Vec<Reservation>> {
        let key = filters.cache_key();
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|e| now.duration_since(e.fetched_at) <= self.config.ttl);
        if self.entries.len() < before {
            debug!(
                "query cache expired {} entries at lookup",
                before - self.entries.len()
            );
        }
        match self.entries.iter().find(|e| e.key == key) {
            Some(entry) => {
                debug!("query cache hit for {key}");
                Some(entry.reservations.clone())
            }
            None => {
                debug!("query cache miss for {key}");
                None
            }
        }
    }

    /// Stores a fetched result, replacing any entry with the same key and
    /// evicting the oldest entries beyond capacity.
    pub fn insert(&mut self, filters: &QueryFilters, reservations: Vec<Reservation>) {
        let key = filters.cache_key();
        self.entries.retain(|e| e.key != key);
        self.entries.push(CacheEntry {
            key,
            reservations,
            fetched_at: Instant::now(),
        });
        while self.entries.len() > self.config.max_entries {
            let oldest = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.fetched_at)
                .map(|(idx, _)| idx);
            match oldest {
                Some(idx) => {
                    let dropped = self.entries.remove(idx);
                    debug!("query cache evicted {}", dropped.key);
                }
                None => break,
            }
        }
    }

    /// Drops every entry. The only invalidation the cache offers.
    pub fn invalidate_all(&mut self) {
        debug!("query cache invalidated ({} entries)", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
