//! Error types for feedcache operations
//!
//! Failure taxonomy of the store:
//! - absence of a record is NOT an error (see `CachedFeed::Empty`)
//! - [`BackendError`] covers the backing engine (open / commit / read)
//! - [`DecodeError`] covers records that exist but fail validation
//!
//! All failures are returned to the immediate caller of the operation that
//! hit them; nothing is retried automatically and nothing crosses the
//! store's worker boundary as a panic.

use thiserror::Error;

/// Backing-engine errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The backing store could not be opened (corrupt file, lock
    /// contention, rejected encryption configuration, ...).
    #[error("Failed to open backing store: {reason}")]
    Open { reason: String },

    /// A write or delete transaction failed after the store was opened.
    /// The record set is left exactly as it was before the attempt.
    #[error("Failed to commit transaction: {reason}")]
    Commit { reason: String },

    /// The backing store was open but a record could not be read.
    #[error("Backing store read failed: {reason}")]
    Unreadable { reason: String },
}

/// A stored record exists but fails validation.
///
/// Distinct from absence: a retrieve that hits this error reports a
/// failure, never an empty cache.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A persisted primitive field does not parse back into its domain
    /// type (invalid UUID, malformed URL).
    #[error("Malformed {field} in stored feed: {value:?}")]
    MalformedField { field: String, value: String },

    /// The record envelope itself is unparseable.
    #[error("Unreadable cache record: {reason}")]
    UnreadableRecord { reason: String },
}

/// Top-level error surfaced by store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Backing store failure: {0}")]
    Backend(#[from] BackendError),

    #[error("Stored feed failed validation: {0}")]
    Decode(#[from] DecodeError),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
