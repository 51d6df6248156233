//! Enumeration parameters.

use serviette_kernel::digits::DigitSet;
use serviette_kernel::triple::MAX_BOUND;

use crate::error::EnumerationError;

/// Default exclusive bound for each component.
pub const DEFAULT_BOUND: u32 = 1000;

/// Default digit set, as a string.
pub const DEFAULT_DIGITS: &str = "24";

/// Default digit set.
pub const DEFAULT_DIGIT_SET: DigitSet = DigitSet::from_digit_values(&[2, 4]);

/// What to enumerate: components range over `[1, bound)`, and a triple is
/// accepted iff its sum and product are written with `digits` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationParamsV1 {
    /// Exclusive upper bound for `a`, `b` and `c`.
    pub bound: u32,
    /// Allowed digits for the sum and the product.
    pub digits: DigitSet,
}

impl EnumerationParamsV1 {
    #[must_use]
    pub fn new(bound: u32, digits: DigitSet) -> Self {
        Self { bound, digits }
    }

    /// Validate the bound.
    ///
    /// `bound == 1` is valid and describes an empty candidate space.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::BoundOutOfRange`] if `bound` is zero or above
    /// [`MAX_BOUND`].
    pub fn validate(&self) -> Result<(), EnumerationError> {
        if self.bound == 0 || self.bound > MAX_BOUND {
            return Err(EnumerationError::BoundOutOfRange {
                bound: self.bound,
                max: MAX_BOUND,
            });
        }
        Ok(())
    }

    /// Number of candidates in `[1, bound)^3`.
    #[must_use]
    pub fn candidate_count(&self) -> u64 {
        let side = u64::from(self.bound.saturating_sub(1));
        side * side * side
    }
}

impl Default for EnumerationParamsV1 {
    fn default() -> Self {
        Self {
            bound: DEFAULT_BOUND,
            digits: DEFAULT_DIGIT_SET,
        }
    }
}
