//! Console walkthrough of the scheduling board.
//!
//! Seeds an in-memory reservation source, then drives the board through the
//! flows the booking frontends use: cached fetching, slot availability, a
//! drag reschedule and a day occupancy summary.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin arena-demo
//!
//! # With cache and fetch lifecycle logging
//! RUST_LOG=debug cargo run --bin arena-demo
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use arena_scheduling::api::VenueId;
use arena_scheduling::board::{DropOutcome, ScheduleBoard, SlotStatus};
use arena_scheduling::config::BoardConfig;
use arena_scheduling::data::{load_catalog_json, LocalDirectory};
use arena_scheduling::models::{TimeOfDay, ViewKind, ViewState};

const SEED: &str = r##"{
    "venues": [
        { "id": 1, "name": "Center Court",
          "operating": { "start": "08:00", "end": "20:00" },
          "slot_interval_minutes": 60, "color": "#2f9e44" },
        { "id": 2, "name": "Studio B", "color": "#1971c2" }
    ],
    "reservations": [
        { "id": 10, "venue_id": 1, "client_id": 7, "date": "2024-06-15",
          "start_time": "14:00", "end_time": "15:30", "status": "confirmed" },
        { "id": 11, "venue_id": 1, "client_id": 8, "date": "2024-06-15",
          "start_time": "10:00", "end_time": "11:00", "status": "pending" },
        { "id": 12, "venue_id": 2, "client_id": 9, "date": "2024-06-15",
          "start_time": "18:00", "end_time": "19:00", "status": "confirmed" }
    ]
}"##;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let catalog = load_catalog_json(SEED).context("loading demo seed catalog")?;
    let directory = Arc::new(LocalDirectory::from_catalog(catalog));
    let anchor =
        NaiveDate::from_ymd_opt(2024, 6, 15).context("building the demo anchor date")?;

    let board = ScheduleBoard::connect(
        directory,
        BoardConfig::default(),
        ViewState::new(ViewKind::Day, anchor),
    )
    .await?;
    board.refresh().await?;
    info!(
        "connected: {} venues, {} reservations on {anchor}",
        board.venues().len(),
        board.reservations_for_day(anchor).len()
    );

    let court = VenueId::new(1);
    info!(
        "slot grid for Center Court, open {}, on {anchor}:",
        board.operating_window(Some(court))
    );
    for start in board.slots(Some(court)) {
        match board.slot_status(court, anchor, start) {
            Some(SlotStatus::Free) => info!("  {start}  free"),
            Some(SlotStatus::Occupied { reservation, .. }) => {
                info!("  {start}  reservation {reservation}")
            }
            None => {}
        }
    }

    let afternoon: TimeOfDay = "16:00".parse()?;
    match board.propose_booking(court, anchor, afternoon) {
        Some(window) => info!("a booking at {afternoon} would occupy {window}"),
        None => warn!("slot {afternoon} is not available"),
    }

    if let Some(first) = board.reservations_for_day(anchor).first() {
        board.begin_drag(first.id);
        match board.drop_on(anchor, afternoon) {
            DropOutcome::Committed { reservation, window, .. } => {
                info!("moved reservation {reservation} to {window}")
            }
            DropOutcome::RejectedConflict { conflicting } => {
                warn!("move rejected: overlaps reservation {conflicting}")
            }
            other => warn!("move not applied: {other:?}"),
        }
    }

    // The cache serves the repeat query without touching the source. The
    // optimistic move above is not in the cached rows, so it disappears
    // here until the host persists it and calls synchronize().
    let outcome = board.refresh().await?;
    info!("second refresh for the same day resolved as {outcome:?}");
    info!(
        "working set is back to the cached rows ({} reservations on {anchor})",
        board.reservations_for_day(anchor).len()
    );

    for entry in board.occupancy(anchor) {
        info!(
            "venue {} utilization {:.0}% ({} reservations, {} of {} minutes)",
            entry.venue_id,
            entry.utilization * 100.0,
            entry.reservation_count,
            entry.reserved_minutes,
            entry.open_minutes
        );
    }

    Ok(())
}
