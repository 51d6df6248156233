//! Engine configuration.
//!
//! Every parameter the original puzzle fixed as a constant is a named field
//! here with the puzzle's value as its default.

use std::path::PathBuf;

use serviette_kernel::digits::DigitSet;
use serviette_kernel::triple::MAX_BOUND;
use serviette_search::log_writer::DEFAULT_FLUSH_EVERY_OUTER;
use serviette_search::params::{EnumerationParamsV1, DEFAULT_BOUND, DEFAULT_DIGIT_SET};
use serviette_search::scorer::{DigitOccurrenceScorer, DEFAULT_SCORE_DIGIT};

/// Default run directory, relative to the working directory.
pub const DEFAULT_RUN_DIR: &str = "le_jour_de_la_serviette";

/// Configuration for one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfigV1 {
    /// Directory holding the result log and run manifest.
    pub dir: PathBuf,
    /// Exclusive upper bound for each component.
    pub bound: u32,
    /// Allowed digits for the sum and the product.
    pub digits: DigitSet,
    /// Digit counted by the selection score.
    pub score_digit: char,
    /// Flush the log after this many outer values.
    pub flush_every_outer: u32,
}

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `bound` is zero or above [`MAX_BOUND`].
    BoundOutOfRange { bound: u32 },
    /// `score_digit` is not `0`-`9`.
    InvalidScoreDigit { ch: char },
    /// `flush_every_outer` is zero.
    ZeroFlushInterval,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoundOutOfRange { bound } => {
                write!(f, "bound {bound} out of range: expected 1..={MAX_BOUND}")
            }
            Self::InvalidScoreDigit { ch } => {
                write!(f, "score digit is not a decimal digit: {ch:?}")
            }
            Self::ZeroFlushInterval => write!(f, "flush interval must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfigV1 {
    /// Defaults for everything except the directory.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bound == 0 || self.bound > MAX_BOUND {
            return Err(ConfigError::BoundOutOfRange { bound: self.bound });
        }
        if !self.score_digit.is_ascii_digit() {
            return Err(ConfigError::InvalidScoreDigit {
                ch: self.score_digit,
            });
        }
        if self.flush_every_outer == 0 {
            return Err(ConfigError::ZeroFlushInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn params(&self) -> EnumerationParamsV1 {
        EnumerationParamsV1::new(self.bound, self.digits)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidScoreDigit`] if `score_digit` is not a digit.
    pub fn scorer(&self) -> Result<DigitOccurrenceScorer, ConfigError> {
        DigitOccurrenceScorer::new(self.score_digit).map_err(|_| ConfigError::InvalidScoreDigit {
            ch: self.score_digit,
        })
    }
}

impl Default for EngineConfigV1 {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_RUN_DIR),
            bound: DEFAULT_BOUND,
            digits: DEFAULT_DIGIT_SET,
            score_digit: DEFAULT_SCORE_DIGIT,
            flush_every_outer: DEFAULT_FLUSH_EVERY_OUTER,
        }
    }
}
