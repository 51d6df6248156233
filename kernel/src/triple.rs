//! `TripleV1`: an ordered `(a, b, c)` of positive integers.
//!
//! # Log rendering
//!
//! A triple renders as `(a, b, c)`: decimal components, `", "` separators,
//! enclosed in parentheses. [`TripleV1::parse_record`] is the exact inverse
//! and is strict: no surrounding whitespace, no sign, no empty component.

use std::fmt;

/// Largest supported exclusive bound. `(MAX_BOUND - 1)^3 < 2^63`, so the
/// product of any candidate fits in `u64` without overflow.
pub const MAX_BOUND: u32 = 1 << 21;

/// Separator between components in the log rendering.
const SEPARATOR: &str = ", ";

/// A candidate or accepted triple.
///
/// Ordering is lexicographic on `(a, b, c)`, which is also the enumeration
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripleV1 {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

/// Error parsing a log record into a [`TripleV1`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripleParseError {
    /// Missing the leading `(` or trailing `)`.
    MissingParens,
    /// Not exactly three `", "`-separated components.
    WrongArity { found: usize },
    /// A component is not a plain decimal `u32`.
    BadComponent { index: usize, raw: String },
}

impl fmt::Display for TripleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParens => write!(f, "record is not enclosed in parentheses"),
            Self::WrongArity { found } => {
                write!(f, "expected 3 components, found {found}")
            }
            Self::BadComponent { index, raw } => {
                write!(f, "component {index} is not a decimal integer: {raw:?}")
            }
        }
    }
}

impl std::error::Error for TripleParseError {}

impl TripleV1 {
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// `a + b + c`, widened so it cannot overflow.
    #[must_use]
    pub fn sum(&self) -> u64 {
        u64::from(self.a) + u64::from(self.b) + u64::from(self.c)
    }

    /// `a * b * c`. Cannot overflow for components below [`MAX_BOUND`].
    #[must_use]
    pub fn product(&self) -> u64 {
        u64::from(self.a) * u64::from(self.b) * u64::from(self.c)
    }

    /// Number of times `digit` appears across the decimal renderings of
    /// `a`, `b` and `c`.
    #[must_use]
    pub fn digit_occurrences(&self, digit: char) -> u32 {
        let Some(d) = digit.to_digit(10) else {
            return 0;
        };
        count_digit(self.a, d) + count_digit(self.b, d) + count_digit(self.c, d)
    }

    /// Parse one log record (without its line terminator).
    ///
    /// # Errors
    ///
    /// Returns [`TripleParseError`] if `record` is not exactly `(a, b, c)`.
    pub fn parse_record(record: &str) -> Result<Self, TripleParseError> {
        let inner = record
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or(TripleParseError::MissingParens)?;

        let parts: Vec<&str> = inner.split(SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(TripleParseError::WrongArity { found: parts.len() });
        }

        let mut values = [0u32; 3];
        for (index, (slot, raw)) in values.iter_mut().zip(&parts).enumerate() {
            *slot = parse_component(raw).ok_or_else(|| TripleParseError::BadComponent {
                index,
                raw: (*raw).to_string(),
            })?;
        }
        Ok(Self::new(values[0], values[1], values[2]))
    }
}

impl fmt::Display for TripleV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

fn parse_component(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn count_digit(mut value: u32, digit: u32) -> u32 {
    let mut count = 0;
    loop {
        if value % 10 == digit {
            count += 1;
        }
        value /= 10;
        if value == 0 {
            return count;
        }
    }
}
