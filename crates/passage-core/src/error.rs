//! Shared error types.

use thiserror::Error;

/// Errors raised while coercing a client payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// A monetary field held a value that is not a number.
    #[error("invalid amount for '{column}': {value}")]
    InvalidAmount { column: &'static str, value: String },
}
