//! Error types for progress engine operations.

use thiserror::Error;

use crate::storage::StoreError;

/// Errors surfaced by the progress engine.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Reading or writing persisted state failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// Caller passed negative or non-finite counters or a pre-epoch timestamp.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Out-of-band award for a badge the catalog does not define.
    #[error("unknown badge: {0}")]
    UnknownBadge(String),
}
