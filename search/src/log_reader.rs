//! `ResultLogReader`: fail-closed, streaming parse of the result log.
//!
//! Yields one [`TripleV1`] per line in stored order. The first malformed line
//! produces [`LogReadError::CorruptLogEntry`] and ends the iteration; nothing
//! after a corrupt line is ever yielded.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serviette_kernel::triple::TripleV1;

use crate::log::{LogReadError, RECORD_TERMINATOR};

/// Streaming result log reader.
pub struct ResultLogReader<R: BufRead> {
    input: R,
    /// 1-based number of the last line read.
    line_number: u64,
    /// Set after an error or end of input.
    done: bool,
    line: Vec<u8>,
}

impl ResultLogReader<BufReader<File>> {
    /// Open the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LogReadError::Io`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, LogReadError> {
        let file = File::open(path).map_err(|e| LogReadError::Io {
            detail: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ResultLogReader<R> {
    #[must_use]
    pub fn new(input: R) -> Self {
        Self {
            input,
            line_number: 0,
            done: false,
            line: Vec::with_capacity(32),
        }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn lines_read(&self) -> u64 {
        self.line_number
    }

    fn next_record(&mut self) -> Option<Result<TripleV1, LogReadError>> {
        self.line.clear();
        match self.input.read_until(RECORD_TERMINATOR, &mut self.line) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                return Some(Err(LogReadError::Io {
                    detail: format!("after line {}: {e}", self.line_number),
                }))
            }
        }
        self.line_number += 1;

        let raw = self
            .line
            .strip_suffix(&[RECORD_TERMINATOR])
            .unwrap_or(&self.line);
        let record = match std::str::from_utf8(raw) {
            Ok(record) => record,
            Err(e) => {
                return Some(Err(LogReadError::CorruptLogEntry {
                    line_number: self.line_number,
                    line: String::from_utf8_lossy(raw).into_owned(),
                    detail: format!("invalid UTF-8: {e}"),
                }))
            }
        };
        Some(
            TripleV1::parse_record(record).map_err(|e| LogReadError::CorruptLogEntry {
                line_number: self.line_number,
                line: record.to_string(),
                detail: e.to_string(),
            }),
        )
    }
}

impl<R: BufRead> Iterator for ResultLogReader<R> {
    type Item = Result<TripleV1, LogReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_record();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

/// Read an entire log into memory.
///
/// # Errors
///
/// Returns the first [`LogReadError`] encountered.
pub fn read_log(path: &Path) -> Result<Vec<TripleV1>, LogReadError> {
    ResultLogReader::open(path)?.collect()
}
