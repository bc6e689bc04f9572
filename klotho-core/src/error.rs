//! Error types and handling for Klotho.

use thiserror::Error;

/// Errors that can occur while timing, generating or traversing data.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KlothoError {
    /// `stop` was called on a chronometer that is not running
    #[error("chronometer not started")]
    NotStarted,
    /// A duration was requested before any interval was completed
    #[error("chronometer has no completed interval")]
    NoCompletedInterval,
    /// A string length below zero was requested
    #[error("invalid string length: {0} (must be non-negative)")]
    InvalidLength(i64),
    /// Configuration was rejected during validation
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A parallel worker panicked before producing its partial result
    #[error("parallel worker panicked")]
    WorkerPanicked,
}

impl KlothoError {
    /// Shorthand for building an [`KlothoError::InvalidConfiguration`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// A result type for Klotho operations.
pub type Result<T> = std::result::Result<T, KlothoError>;

/// Convert a signed length coming from text input into a usable length.
///
/// # Errors
///
/// Returns [`KlothoError::InvalidLength`] when `length` is negative.
pub fn checked_length(length: i64) -> Result<usize> {
    usize::try_from(length).map_err(|_| KlothoError::InvalidLength(length))
}
