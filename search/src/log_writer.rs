//! `ResultLogWriter`: buffered text log output implementing [`TripleSink`].
//!
//! Records are buffered and flushed to the underlying writer every
//! `flush_every_outer` outer values (default: after every outer value), and
//! once more on [`TripleSink::finish`]. A reader opening the file between
//! checkpoints sees every record up to the last flush.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serviette_kernel::triple::TripleV1;

use crate::log::{LogWriteError, TripleSink, RECORD_TERMINATOR};

/// Default checkpoint interval, in outer values.
pub const DEFAULT_FLUSH_EVERY_OUTER: u32 = 1;

/// Streaming result log writer.
pub struct ResultLogWriter<W: Write> {
    out: BufWriter<W>,
    /// Flush after this many completed outer values.
    flush_every_outer: u32,
    /// Outer values completed since the last flush.
    outer_since_flush: u32,
    /// Records appended so far.
    record_count: u64,
    /// Reusable buffer for one rendered record.
    scratch: String,
}

impl ResultLogWriter<File> {
    /// Create (or truncate) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LogWriteError::Create`] if the file cannot be created.
    pub fn create(path: &Path, flush_every_outer: u32) -> Result<Self, LogWriteError> {
        let file = File::create(path).map_err(|e| LogWriteError::Create {
            detail: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::new(file, flush_every_outer))
    }
}

impl<W: Write> ResultLogWriter<W> {
    /// Wrap a writer. A `flush_every_outer` of zero is treated as one.
    #[must_use]
    pub fn new(inner: W, flush_every_outer: u32) -> Self {
        Self {
            out: BufWriter::new(inner),
            flush_every_outer: flush_every_outer.max(1),
            outer_since_flush: 0,
            record_count: 0,
            scratch: String::with_capacity(32),
        }
    }

    /// Number of records appended so far.
    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`LogWriteError::Flush`] if buffered records cannot be written.
    pub fn into_inner(self) -> Result<W, LogWriteError> {
        self.out.into_inner().map_err(|e| LogWriteError::Flush {
            detail: e.error().to_string(),
        })
    }

    fn flush(&mut self) -> Result<(), LogWriteError> {
        self.outer_since_flush = 0;
        self.out.flush().map_err(|e| LogWriteError::Flush {
            detail: e.to_string(),
        })
    }
}

impl<W: Write> TripleSink for ResultLogWriter<W> {
    fn append(&mut self, triple: TripleV1) -> Result<(), LogWriteError> {
        use std::fmt::Write as _;

        self.scratch.clear();
        write!(self.scratch, "{triple}").map_err(|e| LogWriteError::Write {
            detail: format!("{triple}: {e}"),
        })?;
        self.scratch.push(char::from(RECORD_TERMINATOR));

        self.out
            .write_all(self.scratch.as_bytes())
            .map_err(|e| LogWriteError::Write {
                detail: format!("{triple}: {e}"),
            })?;
        self.record_count += 1;
        Ok(())
    }

    fn end_outer(&mut self, _a: u32) -> Result<(), LogWriteError> {
        self.outer_since_flush += 1;
        if self.outer_since_flush >= self.flush_every_outer {
            self.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), LogWriteError> {
        self.flush()
    }
}
