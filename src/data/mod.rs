//! Reservation data access.
//!
//! The scheduling core never talks to a backend directly; it consumes the
//! [`ReservationSource`] trait and leaves transport to the host. The crate
//! ships one implementation, the in-memory [`LocalDirectory`] used by tests,
//! demos and development hosts, plus a JSON seed-catalog loader for
//! populating it.

pub mod error;
pub mod seed;
pub mod source;

#[cfg(feature = "local-source")]
pub mod local;

pub use error::{SourceError, SourceResult};
pub use seed::{load_catalog_json, SeedCatalog};
pub use source::ReservationSource;

#[cfg(feature = "local-source")]
pub use local::LocalDirectory;
