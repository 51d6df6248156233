//! Typed enumeration errors.
//!
//! `EnumerationError` covers both pre-flight validation (before any candidate is
//! evaluated) and sink failures during the walk. A sink failure leaves a
//! partially written log that must not be trusted.

use crate::log::LogWriteError;

/// Failure of an enumeration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumerationError {
    /// The bound is zero or exceeds [`serviette_kernel::triple::MAX_BOUND`].
    BoundOutOfRange { bound: u32, max: u32 },
    /// The sink rejected a record or a checkpoint flush.
    SinkFailed(LogWriteError),
}

impl std::fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundOutOfRange { bound, max } => {
                write!(f, "bound {bound} out of range: expected 1..={max}")
            }
            Self::SinkFailed(e) => write!(f, "result log write failed: {e}"),
        }
    }
}

impl std::error::Error for EnumerationError {}

impl From<LogWriteError> for EnumerationError {
    fn from(e: LogWriteError) -> Self {
        Self::SinkFailed(e)
    }
}
