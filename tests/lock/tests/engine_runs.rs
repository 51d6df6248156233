//! Engine lock tests: state decisions, idempotence, and selection against a
//! real run directory.

use lock_tests::oracle::{brute_force, first_best};
use serviette_harness::config::EngineConfigV1;
use serviette_harness::engine::{find_best_triple, Engine, EngineStateV1};
use serviette_harness::run_dir::{RunDirectory, LOG_FILENAME, MANIFEST_FILENAME};
use serviette_kernel::digits::DigitSet;
use serviette_kernel::triple::TripleV1;
use serviette_search::log_reader::ResultLogReader;
use serviette_search::scorer::DigitOccurrenceScorer;
use serviette_search::select::select_best;

fn digits(s: &str) -> DigitSet {
    DigitSet::parse(s).unwrap()
}

// ---------------------------------------------------------------------------
// Best match
// ---------------------------------------------------------------------------

#[test]
fn best_match_agrees_with_oracle() {
    let dir = tempfile::tempdir().unwrap();
    let report = find_best_triple(dir.path(), 50, digits("24"), '4').unwrap();

    let (position, triple, score) = first_best(&brute_force(50, "24"), '4').unwrap();
    assert_eq!(report.best.triple, triple);
    assert_eq!(report.best.position, position as u64);
    assert_eq!(report.best.score as usize, score);
    assert_eq!(report.best.triple, TripleV1::new(4, 4, 14));
    assert_eq!(report.best.score, 3);
    assert_eq!(report.best.position, 25);
}

#[test]
fn other_score_digits_follow_oracle() {
    let records = brute_force(20, "0123");
    for d in ['0', '1', '2', '3', '4'] {
        let dir = tempfile::tempdir().unwrap();
        let report = find_best_triple(dir.path(), 20, digits("0123"), d).unwrap();
        let (position, triple, _) = first_best(&records, d).unwrap();
        assert_eq!(report.best.triple, triple, "score digit {d}");
        assert_eq!(report.best.position, position as u64, "score digit {d}");
    }
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn second_run_reuses_log_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join(LOG_FILENAME);

    let first = find_best_triple(dir.path(), 40, digits("24"), '4').unwrap();
    assert!(first.enumerated);
    let bytes_before = std::fs::read(&log_path).unwrap();
    let modified_before = std::fs::metadata(&log_path).unwrap().modified().unwrap();

    let second = find_best_triple(dir.path(), 40, digits("24"), '4').unwrap();
    assert!(!second.enumerated);
    assert_eq!(second.enumeration, None);
    assert_eq!(second.best, first.best);

    assert_eq!(std::fs::read(&log_path).unwrap(), bytes_before);
    assert_eq!(
        std::fs::metadata(&log_path).unwrap().modified().unwrap(),
        modified_before
    );
}

#[test]
fn engine_state_follows_log_existence() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfigV1 {
        bound: 12,
        ..EngineConfigV1::in_dir(dir.path())
    };

    let engine = Engine::new(config.clone(), RunDirectory::new(dir.path())).unwrap();
    assert_eq!(engine.initial_state(), EngineStateV1::NeedsEnumeration);

    std::fs::write(dir.path().join(LOG_FILENAME), "(2, 2, 4)\n").unwrap();
    let mut engine = Engine::new(config, RunDirectory::new(dir.path())).unwrap();
    assert_eq!(engine.initial_state(), EngineStateV1::Ready);

    // A pre-existing log is trusted as-is, even one written by hand.
    let report = engine.run().unwrap();
    assert!(!report.enumerated);
    assert_eq!(report.best.triple, TripleV1::new(2, 2, 4));
    assert!(!dir.path().join(MANIFEST_FILENAME).exists());
}

#[test]
fn deleting_log_forces_regeneration() {
    let dir = tempfile::tempdir().unwrap();
    let first = find_best_triple(dir.path(), 30, digits("24"), '4').unwrap();
    std::fs::remove_file(dir.path().join(LOG_FILENAME)).unwrap();

    let again = find_best_triple(dir.path(), 30, digits("24"), '4').unwrap();
    assert!(again.enumerated);
    assert_eq!(again.best, first.best);
}

// ---------------------------------------------------------------------------
// Selector determinism
// ---------------------------------------------------------------------------

#[test]
fn repeated_selection_over_one_log_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    find_best_triple(dir.path(), 50, digits("24"), '4').unwrap();
    let log_path = dir.path().join(LOG_FILENAME);
    let scorer = DigitOccurrenceScorer::default();

    let baseline = select_best(ResultLogReader::open(&log_path).unwrap(), &scorer).unwrap();
    for _ in 0..3 {
        let again = select_best(ResultLogReader::open(&log_path).unwrap(), &scorer).unwrap();
        assert_eq!(again, baseline);
    }
}
