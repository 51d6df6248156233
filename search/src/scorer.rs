//! Scoring for best-match selection.

use serviette_kernel::triple::TripleV1;

/// Default scoring digit.
pub const DEFAULT_SCORE_DIGIT: char = '4';

/// Trait for record scoring.
///
/// Scores are integers; higher is better. Implementations must be pure:
/// the same triple always gets the same score.
pub trait TripleScorer {
    fn score(&self, triple: &TripleV1) -> u32;
}

/// Error constructing a [`DigitOccurrenceScorer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorerError {
    /// The scoring character is not `0`-`9`.
    NotADigit { ch: char },
}

impl std::fmt::Display for ScorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADigit { ch } => write!(f, "score digit is not a decimal digit: {ch:?}"),
        }
    }
}

impl std::error::Error for ScorerError {}

/// Scores a triple by how often one digit appears across the decimal
/// renderings of `a`, `b` and `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitOccurrenceScorer {
    digit: char,
}

impl DigitOccurrenceScorer {
    /// # Errors
    ///
    /// Returns [`ScorerError::NotADigit`] unless `digit` is `0`-`9`.
    pub fn new(digit: char) -> Result<Self, ScorerError> {
        if digit.is_ascii_digit() {
            Ok(Self { digit })
        } else {
            Err(ScorerError::NotADigit { ch: digit })
        }
    }

    #[must_use]
    pub fn digit(&self) -> char {
        self.digit
    }
}

impl Default for DigitOccurrenceScorer {
    fn default() -> Self {
        Self {
            digit: DEFAULT_SCORE_DIGIT,
        }
    }
}

impl TripleScorer for DigitOccurrenceScorer {
    fn score(&self, triple: &TripleV1) -> u32 {
        triple.digit_occurrences(self.digit)
    }
}
