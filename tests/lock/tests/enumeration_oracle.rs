//! Enumeration lock tests: the on-disk result log equals a brute-force
//! oracle, record for record and byte for byte.

use lock_tests::oracle::{brute_force, render_log};
use serviette_harness::engine::{find_best_triple, EngineError};
use serviette_harness::run_dir::{verify_run_dir, LOG_FILENAME};
use serviette_kernel::digits::DigitSet;
use serviette_kernel::triple::TripleV1;
use serviette_search::enumerate::enumerate;
use serviette_search::log_reader::read_log;
use serviette_search::params::EnumerationParamsV1;
use serviette_search::select::SelectError;

fn enumerate_to_vec(bound: u32, digits: &str) -> Vec<TripleV1> {
    let params = EnumerationParamsV1::new(bound, DigitSet::parse(digits).unwrap());
    let mut out = Vec::new();
    enumerate(&params, &mut out).unwrap();
    out
}

// ---------------------------------------------------------------------------
// Brute-force cross-check
// ---------------------------------------------------------------------------

#[test]
fn matches_oracle_at_bound_twenty() {
    for digits in ["24", "01", "0123", "1", "13579", "02468"] {
        assert_eq!(
            enumerate_to_vec(20, digits),
            brute_force(20, digits),
            "digits={digits}"
        );
    }
}

#[test]
fn log_file_is_oracle_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let digits = DigitSet::parse("0123").unwrap();
    find_best_triple(dir.path(), 20, digits, '4').unwrap();

    let on_disk = std::fs::read_to_string(dir.path().join(LOG_FILENAME)).unwrap();
    assert_eq!(on_disk, render_log(&brute_force(20, "0123")));
    assert_eq!(read_log(&dir.path().join(LOG_FILENAME)).unwrap().len(), 231);
}

#[test]
fn log_records_are_strictly_increasing() {
    let dir = tempfile::tempdir().unwrap();
    find_best_triple(dir.path(), 50, DigitSet::parse("24").unwrap(), '4').unwrap();

    let records = read_log(&dir.path().join(LOG_FILENAME)).unwrap();
    assert_eq!(records.len(), 51);
    for pair in records.windows(2) {
        assert!(pair[0] < pair[1], "{} precedes {}", pair[0], pair[1]);
    }
    verify_run_dir(dir.path()).unwrap();
}

#[test]
fn known_prefix_of_default_digit_set() {
    let records = enumerate_to_vec(50, "24");
    assert_eq!(
        records[..6],
        [
            TripleV1::new(1, 1, 2),
            TripleV1::new(1, 1, 22),
            TripleV1::new(1, 1, 42),
            TripleV1::new(1, 2, 1),
            TripleV1::new(1, 2, 21),
            TripleV1::new(1, 6, 37),
        ]
    );
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[test]
fn full_digit_set_accepts_every_candidate() {
    let records = enumerate_to_vec(8, "0123456789");
    assert_eq!(records.len(), 7 * 7 * 7);
    assert_eq!(records.first(), Some(&TripleV1::new(1, 1, 1)));
    assert_eq!(records.last(), Some(&TripleV1::new(7, 7, 7)));
}

#[test]
fn bound_two_has_exactly_one_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let report = find_best_triple(dir.path(), 2, DigitSet::full(), '1').unwrap();
    assert_eq!(report.best.triple, TripleV1::new(1, 1, 1));
    assert_eq!(report.best.score, 3);
    assert_eq!(report.enumeration.unwrap().candidates_evaluated, 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join(LOG_FILENAME)).unwrap(),
        "(1, 1, 1)\n"
    );
}

#[test]
fn bound_one_is_an_empty_space() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_best_triple(dir.path(), 1, DigitSet::full(), '4').unwrap_err();
    assert_eq!(err, EngineError::Select(SelectError::NoCandidatesFound));
    assert!(dir.path().join(LOG_FILENAME).exists());
}

// ---------------------------------------------------------------------------
// End-to-end: bound 10, digits {0, 1}
// ---------------------------------------------------------------------------

#[test]
fn zero_one_digits_at_bound_ten_find_nothing() {
    // Sums range over 3..=27, so only 10 and 11 qualify; no triple below 10
    // has a product of 1, 10, 11, 100, 101, 110 or 111 with such a sum.
    assert!(brute_force(10, "01").is_empty());

    let dir = tempfile::tempdir().unwrap();
    let err = find_best_triple(dir.path(), 10, DigitSet::parse("01").unwrap(), '4').unwrap_err();
    assert_eq!(err, EngineError::Select(SelectError::NoCandidatesFound));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(LOG_FILENAME)).unwrap(),
        ""
    );
    assert_eq!(verify_run_dir(dir.path()).unwrap().record_count, 0);
}
