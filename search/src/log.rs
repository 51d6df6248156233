//! Result log format, sink trait, and error types.
//!
//! # Wire format
//!
//! UTF-8 text, one accepted triple per line, rendered `(a, b, c)` and
//! terminated by `\n`, in enumeration order:
//!
//! ```text
//! (1, 1, 2)
//! (1, 2, 1)
//! (2, 1, 1)
//! ```
//!
//! The log is append-only. Records are never updated or deleted. Its
//! existence on disk is the "enumeration complete" marker; there is no
//! header, footer, or length field distinguishing a complete log from one
//! left behind by a killed process.

use serviette_kernel::triple::TripleV1;

/// Record terminator.
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Destination for accepted triples, decoupled from the enumeration loop.
///
/// The enumerator calls [`append`](TripleSink::append) for each accepted
/// triple in order, [`end_outer`](TripleSink::end_outer) after each value of
/// the outermost component, and [`finish`](TripleSink::finish) exactly once
/// on success.
pub trait TripleSink {
    /// Append one accepted triple.
    ///
    /// # Errors
    ///
    /// Returns [`LogWriteError`] if the record cannot be written.
    fn append(&mut self, triple: TripleV1) -> Result<(), LogWriteError>;

    /// Checkpoint hook: every value `a` has been fully enumerated.
    ///
    /// # Errors
    ///
    /// Returns [`LogWriteError`] if a checkpoint flush fails.
    fn end_outer(&mut self, _a: u32) -> Result<(), LogWriteError> {
        Ok(())
    }

    /// Final flush after the last record.
    ///
    /// # Errors
    ///
    /// Returns [`LogWriteError`] if the final flush fails.
    fn finish(&mut self) -> Result<(), LogWriteError> {
        Ok(())
    }
}

impl TripleSink for Vec<TripleV1> {
    fn append(&mut self, triple: TripleV1) -> Result<(), LogWriteError> {
        self.push(triple);
        Ok(())
    }
}

/// Errors writing the result log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogWriteError {
    /// The log file could not be created.
    Create { detail: String },
    /// A record write failed.
    Write { detail: String },
    /// A checkpoint or final flush failed.
    Flush { detail: String },
}

impl std::fmt::Display for LogWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create { detail } => write!(f, "cannot create result log: {detail}"),
            Self::Write { detail } => write!(f, "cannot write record: {detail}"),
            Self::Flush { detail } => write!(f, "cannot flush result log: {detail}"),
        }
    }
}

impl std::error::Error for LogWriteError {}

/// Errors reading the result log (fail-closed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogReadError {
    /// The log could not be opened or read.
    Io { detail: String },
    /// A line did not parse as `(a, b, c)`. The log may be incomplete or
    /// tampered with; the read pass aborts.
    CorruptLogEntry {
        /// 1-based line number.
        line_number: u64,
        /// The offending line, without its terminator.
        line: String,
        detail: String,
    },
}

impl std::fmt::Display for LogReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "cannot read result log: {detail}"),
            Self::CorruptLogEntry {
                line_number,
                line,
                detail,
            } => write!(
                f,
                "corrupt log entry at line {line_number}: {line:?} ({detail})"
            ),
        }
    }
}

impl std::error::Error for LogReadError {}
