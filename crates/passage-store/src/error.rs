//! Storage error type.

use thiserror::Error;

/// Errors surfaced by the storage layer.
///
/// Database errors carry the driver message verbatim; write handlers relay
/// it to the caller unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare database path: {0}")]
    Io(#[from] std::io::Error),
}
