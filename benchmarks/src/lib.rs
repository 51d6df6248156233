//! Shared helpers for serviette benchmark suites.

use serviette_kernel::digits::DigitSet;
use serviette_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use serviette_kernel::triple::TripleV1;
use serviette_search::enumerate::enumerate;
use serviette_search::log_writer::ResultLogWriter;
use serviette_search::params::EnumerationParamsV1;

/// Enumerate `[1, bound)^3` for `digits` into memory.
///
/// # Panics
///
/// Panics if `digits` is not a valid digit string or `bound` is out of range.
#[must_use]
pub fn accepted_triples(bound: u32, digits: &str) -> Vec<TripleV1> {
    let params = EnumerationParamsV1::new(bound, DigitSet::parse(digits).expect("digit set"));
    let mut out = Vec::new();
    enumerate(&params, &mut out).expect("enumeration");
    out
}

/// Render `records` in result log format.
///
/// # Panics
///
/// Panics if writing to memory fails.
#[must_use]
pub fn log_bytes(records: &[TripleV1]) -> Vec<u8> {
    use serviette_search::log::TripleSink;

    let mut writer = ResultLogWriter::new(Vec::new(), 1);
    for &t in records {
        writer.append(t).expect("append");
    }
    writer.finish().expect("finish");
    writer.into_inner().expect("into_inner")
}

/// Digest of a rendered log, used to guard that benchmark inputs did not
/// change between runs.
#[must_use]
pub fn input_guard(bytes: &[u8]) -> ContentHash {
    canonical_hash(HashDomain::BenchGuard, bytes)
}
