//! # Arena Scheduling Core
//!
//! Venue scheduling and availability engine for the Arena club-management
//! platform.
//!
//! This crate maintains a queryable, cache-accelerated view of court, field
//! and room reservations across month, week, day and list presentations. It
//! computes slot availability, positions reservations on a pixel timeline,
//! and coordinates the optimistic edit and drag-reschedule flows the booking
//! frontends drive. Everything is in-process: the only async boundary is the
//! [`data::ReservationSource`] trait the host injects.
//!
//! ## Features
//!
//! - **Slot grids**: deterministic slot generation from per-venue operating
//!   windows and intervals
//! - **Availability**: half-open interval conflict checks with
//!   self-exclusion for edit flows
//! - **Query caching**: TTL and capacity bounded reuse of fetched periods
//! - **Reschedule coordination**: explicit drag and edit state machines with
//!   conflict validation at the commit edge
//! - **Timeline geometry**: time-to-pixel mapping for day/week renderers
//!
//! ## Architecture
//!
//! - [`api`]: identifier newtypes and reservation/venue data types
//! - [`models`]: time-of-day and view-state value types
//! - [`services`]: pure scheduling logic (slots, availability, timeline,
//!   view queries, occupancy)
//! - [`cache`]: the bounded query cache
//! - [`board`]: the per-session [`board::ScheduleBoard`] coordinator
//! - [`data`]: the async reservation source seam and its local backend
//! - [`config`]: TOML-loadable tunables

pub mod api;

pub mod board;
pub mod cache;
pub mod config;
pub mod data;
pub mod models;

pub mod services;
