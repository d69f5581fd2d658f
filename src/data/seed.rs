//! Seed catalog loading.
//!
//! Development hosts and the demo binary populate a [`LocalDirectory`] from
//! a JSON catalog of venues and reservations:
//!
//! ```json
//! {
//!   "venues": [
//!     { "id": 1, "name": "Center Court",
//!       "operating": { "start": "08:00", "end": "20:00" },
//!       "slot_interval_minutes": 60 }
//!   ],
//!   "reservations": [
//!     { "id": 10, "venue_id": 1, "client_id": 7, "date": "2024-06-15",
//!       "start_time": "14:00", "end_time": "15:30", "status": "confirmed" }
//!   ]
//! }
//! ```
//!
//! Loading validates what deserialization alone cannot: unique ids, valid
//! time windows and resolvable venue references.
//!
//! [`LocalDirectory`]: crate::data::LocalDirectory

use std::collections::HashSet;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::api::{Reservation, Venue};

/// A parsed and validated seed data set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// Parses a JSON seed catalog and validates its cross references.
pub fn load_catalog_json(content: &str) -> anyhow::Result<SeedCatalog> {
    let catalog: SeedCatalog =
        serde_json::from_str(content).context("parsing seed catalog JSON")?;

    let mut venue_ids = HashSet::new();
    for venue in &catalog.venues {
        if !venue_ids.insert(venue.id) {
            bail!("duplicate venue id {}", venue.id);
        }
    }

    let mut reservation_ids = HashSet::new();
    for reservation in &catalog.reservations {
        if !reservation_ids.insert(reservation.id) {
            bail!("duplicate reservation id {}", reservation.id);
        }
        if reservation.window().is_none() {
            bail!(
                "reservation {} has an empty or inverted time window ({}-{})",
                reservation.id,
                reservation.start_time,
                reservation.end_time
            );
        }
        if !venue_ids.contains(&reservation.venue_id) {
            bail!(
                "reservation {} references unknown venue {}",
                reservation.id,
                reservation.venue_id
            );
        }
    }

    Ok(catalog)
}
