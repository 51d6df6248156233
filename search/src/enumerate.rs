//! Exhaustive enumeration of `[1, bound)^3` into a [`TripleSink`].
//!
//! # Order
//!
//! `a` outermost ascending, then `b`, then `c` innermost. The log order is
//! observable (selection tie-breaks depend on it), so this loop nest is part
//! of the contract.
//!
//! # Rolling arithmetic
//!
//! `a + b` and `a * b` are computed once per `(a, b)`. Inside the `c` loop the
//! sum advances by `1` and the product by `a * b`, so the hot loop does two
//! additions and the digit checks.

use serviette_kernel::predicate::accepts_parts;
use serviette_kernel::triple::TripleV1;
use tracing::{debug, info};

use crate::error::EnumerationError;
use crate::log::TripleSink;
use crate::params::EnumerationParamsV1;

/// Counters from a completed enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStatsV1 {
    /// Candidates tested against the predicate.
    pub candidates_evaluated: u64,
    /// Candidates appended to the sink.
    pub accepted: u64,
}

/// Enumerate every candidate and append accepted triples to `sink`.
///
/// Calls `sink.end_outer(a)` after each outer value and `sink.finish()` once
/// at the end. On error the sink may hold a prefix of the result; callers
/// must discard it.
///
/// # Errors
///
/// - [`EnumerationError::BoundOutOfRange`] before any work if the parameters are invalid.
/// - [`EnumerationError::SinkFailed`] if the sink rejects a write or flush.
pub fn enumerate<S>(
    params: &EnumerationParamsV1,
    sink: &mut S,
) -> Result<EnumerationStatsV1, EnumerationError>
where
    S: TripleSink + ?Sized,
{
    params.validate()?;

    let bound = params.bound;
    let digits = params.digits;
    let side = u64::from(bound - 1);
    let per_outer = side * side;
    let mut stats = EnumerationStatsV1::default();

    info!(
        bound,
        digits = %digits,
        candidates = params.candidate_count(),
        "enumeration started"
    );

    for a in 1..bound {
        let a64 = u64::from(a);
        for b in 1..bound {
            let b64 = u64::from(b);
            let step = a64 * b64;
            // Values for c = 0; the first iteration advances them to c = 1.
            let mut sum = a64 + b64;
            let mut product = 0u64;
            for c in 1..bound {
                sum += 1;
                product += step;
                if accepts_parts(sum, product, &digits) {
                    sink.append(TripleV1::new(a, b, c))?;
                    stats.accepted += 1;
                }
            }
        }
        stats.candidates_evaluated += per_outer;
        sink.end_outer(a)?;
        debug!(a, accepted = stats.accepted, "outer value complete");
    }

    sink.finish()?;
    info!(
        candidates_evaluated = stats.candidates_evaluated,
        accepted = stats.accepted,
        "enumeration complete"
    );
    Ok(stats)
}
