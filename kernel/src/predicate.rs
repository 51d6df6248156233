//! The membership predicate.
//!
//! A triple is accepted iff every decimal digit of `a + b + c` and every
//! decimal digit of `a * b * c` belongs to the digit set. The predicate family
//! is fixed; there is no pluggable predicate.

use crate::digits::DigitSet;
use crate::triple::TripleV1;

/// Whether `triple` satisfies the sum/product membership predicate.
#[must_use]
pub fn accepts(triple: &TripleV1, digits: &DigitSet) -> bool {
    accepts_parts(triple.sum(), triple.product(), digits)
}

/// Predicate over precomputed sum and product.
///
/// The enumerator keeps rolling sums and products across its loops and calls
/// this directly. The sum is checked first since it is the cheaper rejection.
#[must_use]
#[inline]
pub fn accepts_parts(sum: u64, product: u64, digits: &DigitSet) -> bool {
    digits.admits(sum) && digits.admits(product)
}
