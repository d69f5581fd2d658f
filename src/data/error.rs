//! Errors surfaced by reservation sources.

use thiserror::Error;

/// Convenience alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Failure modes of a [`crate::data::ReservationSource`].
///
/// The board reports these to the host unchanged; it never retries on its
/// own and never caches a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backend could not be reached at all.
    #[error("reservation source unreachable: {message}")]
    Connection { message: String },

    /// The backend answered with a failure.
    #[error("reservation source failed: {message}")]
    Backend { message: String },

    /// The backend answered with data the core cannot accept.
    #[error("reservation source returned invalid data: {message}")]
    InvalidData { message: String },

    /// A named entity the request depended on does not exist.
    #[error("{what} not found")]
    NotFound { what: String },
}

impl SourceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}
