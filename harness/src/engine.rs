//! Engine: decides whether to enumerate, then selects the best match.
//!
//! # State machine
//!
//! ```text
//!            log absent                      enumeration complete
//! probe ───────────────► NeedsEnumeration ───────────────────────► Ready ──► select, report
//!   │                                                               ▲
//!   └────────────────────────── log present ────────────────────────┘
//! ```
//!
//! The initial state comes from a [`LogProbe`]. A log that exists is trusted
//! to be complete; there is no resumption of a partial log. If enumeration
//! fails, the partially written log is discarded so the next run starts over.

use std::path::Path;

use serviette_kernel::digits::DigitSet;
use serviette_kernel::triple::TripleV1;
use serviette_search::enumerate::{enumerate, EnumerationStatsV1};
use serviette_search::error::EnumerationError;
use serviette_search::log::{LogReadError, TripleSink};
use serviette_search::params::EnumerationParamsV1;
use serviette_search::select::{select_best, BestMatchV1, SelectError};
use tracing::{info, warn};

use crate::config::{ConfigError, EngineConfigV1};
use crate::run_dir::{RunDirError, RunDirectory};

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStateV1 {
    /// No result log: the enumerator must run before selection.
    NeedsEnumeration,
    /// A result log exists and is trusted complete.
    Ready,
}

/// Answers "has enumeration already been done?".
pub trait LogProbe {
    fn log_exists(&self) -> bool;
}

/// Storage for the result log.
pub trait ResultStore: LogProbe {
    type Writer: TripleSink;
    type Records: Iterator<Item = Result<TripleV1, LogReadError>>;

    /// Start a fresh log, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RunDirError`] if the log cannot be created.
    fn create_log(&mut self, flush_every_outer: u32) -> Result<Self::Writer, RunDirError>;

    /// Make a completed log durable and record its manifest.
    ///
    /// # Errors
    ///
    /// Returns [`RunDirError`] on any write failure.
    fn commit(
        &mut self,
        writer: Self::Writer,
        params: &EnumerationParamsV1,
        stats: &EnumerationStatsV1,
    ) -> Result<(), RunDirError>;

    /// Open the log for a selection pass.
    ///
    /// # Errors
    ///
    /// Returns [`LogReadError::Io`] if the log cannot be opened.
    fn open_log(&self) -> Result<Self::Records, LogReadError>;

    /// Remove a log that must not be trusted. Removing nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RunDirError::Io`] if removal fails.
    fn discard_log(&mut self) -> Result<(), RunDirError>;
}

/// Outcome of an engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReportV1 {
    pub best: BestMatchV1,
    /// Whether this run performed the enumeration.
    pub enumerated: bool,
    /// Enumeration counters, when `enumerated` is true.
    pub enumeration: Option<EnumerationStatsV1>,
}

/// Error during an engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Configuration failed validation.
    Config(ConfigError),
    /// Enumeration failed; the partial log was discarded.
    Enumeration(EnumerationError),
    /// Creating, committing, or discarding the log failed.
    Store(RunDirError),
    /// Selection failed: empty log or corrupt entry.
    Select(SelectError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Enumeration(e) => write!(f, "enumeration failed: {e}"),
            Self::Store(e) => write!(f, "run directory error: {e}"),
            Self::Select(e) => write!(f, "selection failed: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RunDirError> for EngineError {
    fn from(e: RunDirError) -> Self {
        Self::Store(e)
    }
}

impl From<SelectError> for EngineError {
    fn from(e: SelectError) -> Self {
        Self::Select(e)
    }
}

/// The engine over a result store.
pub struct Engine<S: ResultStore> {
    config: EngineConfigV1,
    store: S,
}

impl<S: ResultStore> Engine<S> {
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `config` is invalid.
    pub fn new(config: EngineConfigV1, store: S) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config, store })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfigV1 {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// State determined by probing the store.
    #[must_use]
    pub fn initial_state(&self) -> EngineStateV1 {
        if self.store.log_exists() {
            EngineStateV1::Ready
        } else {
            EngineStateV1::NeedsEnumeration
        }
    }

    /// Drive the state machine to completion.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] from whichever phase failed.
    pub fn run(&mut self) -> Result<EngineReportV1, EngineError> {
        let mut state = self.initial_state();
        let mut enumeration = None;
        info!(?state, "engine started");

        loop {
            match state {
                EngineStateV1::NeedsEnumeration => {
                    enumeration = Some(self.enumerate()?);
                    state = EngineStateV1::Ready;
                    info!(?state, "enumeration finished");
                }
                EngineStateV1::Ready => {
                    let best = self.select()?;
                    info!(
                        best = %best.triple,
                        score = best.score,
                        position = best.position,
                        "best match selected"
                    );
                    return Ok(EngineReportV1 {
                        best,
                        enumerated: enumeration.is_some(),
                        enumeration,
                    });
                }
            }
        }
    }

    fn enumerate(&mut self) -> Result<EnumerationStatsV1, EngineError> {
        let params = self.config.params();
        let mut writer = self.store.create_log(self.config.flush_every_outer)?;

        let outcome = match enumerate(&params, &mut writer) {
            Ok(stats) => self
                .store
                .commit(writer, &params, &stats)
                .map(|()| stats)
                .map_err(EngineError::Store),
            Err(e) => {
                drop(writer);
                Err(EngineError::Enumeration(e))
            }
        };

        if let Err(e) = &outcome {
            warn!(error = %e, "discarding incomplete result log");
            if let Err(discard) = self.store.discard_log() {
                warn!(error = %discard, "failed to discard incomplete result log");
            }
        }
        outcome
    }

    fn select(&self) -> Result<BestMatchV1, EngineError> {
        let scorer = self.config.scorer()?;
        let records = self
            .store
            .open_log()
            .map_err(|e| EngineError::Select(SelectError::Read(e)))?;
        Ok(select_best(records, &scorer)?)
    }
}

/// Find the best triple for `(bound, digit_set, score_digit)`, using `dir`
/// as the run directory.
///
/// Enumerates only if `dir` holds no result log.
///
/// # Errors
///
/// Returns [`EngineError`]; an empty result is
/// `EngineError::Select(SelectError::NoCandidatesFound)`.
pub fn find_best_triple(
    dir: &Path,
    bound: u32,
    digit_set: DigitSet,
    score_digit: char,
) -> Result<EngineReportV1, EngineError> {
    let config = EngineConfigV1 {
        bound,
        digits: digit_set,
        score_digit,
        ..EngineConfigV1::in_dir(dir)
    };
    run_in_dir(config)
}

/// Run the engine against the run directory named by `config.dir`.
///
/// # Errors
///
/// Returns [`EngineError`] from validation or any phase.
pub fn run_in_dir(config: EngineConfigV1) -> Result<EngineReportV1, EngineError> {
    let store = RunDirectory::new(config.dir.clone());
    Engine::new(config, store)?.run()
}
