//! Error-path lock tests: empty results, corrupt logs, and I/O failures
//! each surface as their own typed error.

use serviette_harness::config::{ConfigError, EngineConfigV1};
use serviette_harness::engine::{find_best_triple, run_in_dir, EngineError};
use serviette_harness::run_dir::{RunDirError, LOG_FILENAME, MANIFEST_FILENAME};
use serviette_kernel::digits::DigitSet;
use serviette_search::log::{LogReadError, LogWriteError};
use serviette_search::select::SelectError;

#[test]
fn empty_digit_set_writes_empty_log_and_reports_no_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_best_triple(dir.path(), 15, DigitSet::empty(), '4').unwrap_err();
    assert_eq!(err, EngineError::Select(SelectError::NoCandidatesFound));

    let log = dir.path().join(LOG_FILENAME);
    assert!(log.exists(), "an empty log still marks enumeration as done");
    assert_eq!(std::fs::metadata(&log).unwrap().len(), 0);
    assert!(dir.path().join(MANIFEST_FILENAME).exists());

    // The second run does not enumerate again and reports the same outcome.
    let again = find_best_triple(dir.path(), 15, DigitSet::empty(), '4').unwrap_err();
    assert_eq!(again, err);
}

#[test]
fn no_candidates_is_distinct_from_corruption() {
    let no_candidates = EngineError::Select(SelectError::NoCandidatesFound);
    let corrupt = EngineError::Select(SelectError::Read(LogReadError::CorruptLogEntry {
        line_number: 1,
        line: String::new(),
        detail: String::new(),
    }));
    assert_ne!(no_candidates, corrupt);
    assert_ne!(no_candidates.to_string(), corrupt.to_string());
}

#[test]
fn corrupt_line_aborts_selection() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(LOG_FILENAME),
        "(1, 1, 2)\n(4, 4, 44)\n(1, 2\n(44, 44, 44)\n",
    )
    .unwrap();

    let err = find_best_triple(dir.path(), 50, DigitSet::parse("24").unwrap(), '4').unwrap_err();
    match err {
        EngineError::Select(SelectError::Read(LogReadError::CorruptLogEntry {
            line_number,
            line,
            ..
        })) => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "(1, 2");
        }
        other => panic!("expected CorruptLogEntry, got {other:?}"),
    }
}

#[test]
fn invalid_utf8_line_is_corrupt_entry() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(LOG_FILENAME),
        b"(1, 1, 2)\n(\xff, 2, 3)\n",
    )
    .unwrap();

    let err = find_best_triple(dir.path(), 50, DigitSet::parse("24").unwrap(), '4').unwrap_err();
    assert!(
        matches!(
            err,
            EngineError::Select(SelectError::Read(LogReadError::CorruptLogEntry {
                line_number: 2,
                ..
            }))
        ),
        "got {err:?}"
    );
}

#[test]
fn run_directory_blocked_by_file_is_store_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the run directory should be.
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"not a directory").unwrap();

    let err = find_best_triple(&blocked, 10, DigitSet::parse("24").unwrap(), '4').unwrap_err();
    assert!(
        matches!(err, EngineError::Store(RunDirError::Io { .. })),
        "got {err:?}"
    );
}

#[test]
fn log_path_occupied_by_directory_fails_create() {
    let dir = tempfile::tempdir().unwrap();
    // The probe only accepts a regular file, so this directory reads as
    // "no log" and the engine tries to create one over it.
    std::fs::create_dir(dir.path().join(LOG_FILENAME)).unwrap();

    let err = find_best_triple(dir.path(), 10, DigitSet::parse("24").unwrap(), '4').unwrap_err();
    assert!(
        matches!(
            err,
            EngineError::Store(RunDirError::Write(LogWriteError::Create { .. }))
        ),
        "got {err:?}"
    );
}

#[test]
fn invalid_configuration_is_rejected_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let run = dir.path().join("run");
    let config = EngineConfigV1 {
        score_digit: '*',
        ..EngineConfigV1::in_dir(&run)
    };
    let err = run_in_dir(config).unwrap_err();
    assert_eq!(
        err,
        EngineError::Config(ConfigError::InvalidScoreDigit { ch: '*' })
    );
    assert!(!run.exists());
}
