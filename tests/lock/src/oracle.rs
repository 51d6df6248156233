//! Independent reference implementations used as test oracles.
//!
//! These deliberately avoid the kernel's digit mask and the enumerator's
//! rolling arithmetic: membership is checked on `to_string()` renderings
//! and every candidate is computed from scratch.

use std::collections::BTreeSet;

use serviette_kernel::triple::TripleV1;

/// Every `(a, b, c)` in `[1, bound)^3` whose sum and product are written
/// with `digits` only, in `(a, b, c)` lexicographic order.
#[must_use]
pub fn brute_force(bound: u32, digits: &str) -> Vec<TripleV1> {
    let allowed: BTreeSet<char> = digits.chars().collect();
    let admits = |v: u64| v.to_string().chars().all(|c| allowed.contains(&c));

    let mut out = Vec::new();
    for a in 1..bound {
        for b in 1..bound {
            for c in 1..bound {
                let (a64, b64, c64) = (u64::from(a), u64::from(b), u64::from(c));
                if admits(a64 + b64 + c64) && admits(a64 * b64 * c64) {
                    out.push(TripleV1::new(a, b, c));
                }
            }
        }
    }
    out
}

/// Score by counting `digit` in the string renderings of the components.
#[must_use]
pub fn string_score(t: &TripleV1, digit: char) -> usize {
    [t.a, t.b, t.c]
        .iter()
        .map(|v| v.to_string().matches(digit).count())
        .sum()
}

/// First record with the maximal score, with its index.
#[must_use]
pub fn first_best(records: &[TripleV1], digit: char) -> Option<(usize, TripleV1, usize)> {
    let mut best: Option<(usize, TripleV1, usize)> = None;
    for (i, t) in records.iter().enumerate() {
        let s = string_score(t, digit);
        let improves = match best {
            None => true,
            Some((_, _, bs)) => s > bs,
        };
        if improves {
            best = Some((i, *t, s));
        }
    }
    best
}

/// Render records exactly as the result log stores them.
#[must_use]
pub fn render_log(records: &[TripleV1]) -> String {
    records
        .iter()
        .map(|t| format!("({}, {}, {})\n", t.a, t.b, t.c))
        .collect()
}
