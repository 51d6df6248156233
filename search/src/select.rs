//! Best-match selection over a result log.
//!
//! One pass in stored order. The running maximum is replaced only by a
//! strictly greater score, so ties go to the first record that reached the
//! maximum. Records are never revisited or reordered.

use serviette_kernel::triple::TripleV1;

use crate::log::LogReadError;
use crate::scorer::TripleScorer;

/// The selected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatchV1 {
    pub triple: TripleV1,
    pub score: u32,
    /// 0-based index of the record in the log.
    pub position: u64,
}

/// Failure of a selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The log holds no records. A legitimate search outcome, reported
    /// distinctly from corruption.
    NoCandidatesFound,
    /// Reading the log failed; see [`LogReadError::CorruptLogEntry`].
    Read(LogReadError),
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCandidatesFound => write!(f, "no candidates found: result log is empty"),
            Self::Read(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SelectError {}

impl From<LogReadError> for SelectError {
    fn from(e: LogReadError) -> Self {
        Self::Read(e)
    }
}

/// Select the first record attaining the maximal score.
///
/// # Errors
///
/// - [`SelectError::Read`] on the first read failure (the pass aborts).
/// - [`SelectError::NoCandidatesFound`] if `records` is empty.
pub fn select_best<I, S>(records: I, scorer: &S) -> Result<BestMatchV1, SelectError>
where
    I: IntoIterator<Item = Result<TripleV1, LogReadError>>,
    S: TripleScorer + ?Sized,
{
    let mut best: Option<BestMatchV1> = None;
    let mut position = 0u64;

    for record in records {
        let triple = record?;
        let score = scorer.score(&triple);
        let improves = match best {
            None => true,
            Some(b) => score > b.score,
        };
        if improves {
            best = Some(BestMatchV1 {
                triple,
                score,
                position,
            });
        }
        position += 1;
    }

    let best = best.ok_or(SelectError::NoCandidatesFound)?;
    tracing::debug!(
        best = %best.triple,
        score = best.score,
        position = best.position,
        records = position,
        "selection complete"
    );
    Ok(best)
}
