//! `DigitSet`: a set of decimal digit characters, stored as a 10-bit mask.
//!
//! Bit `d` is set iff the character `'0' + d` is a member. The mask form keeps
//! the membership test in the enumeration hot loop branch-light: a value is
//! admitted iff every base-10 digit's bit is set.

use std::fmt;

/// Mask with all ten digit bits set.
const FULL_MASK: u16 = 0b11_1111_1111;

/// Error constructing a [`DigitSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigitSetError {
    /// A character outside `'0'..='9'` was supplied.
    NotADigit { ch: char },
}

impl fmt::Display for DigitSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADigit { ch } => write!(f, "not a decimal digit: {ch:?}"),
        }
    }
}

impl std::error::Error for DigitSetError {}

/// A set of allowed decimal digit characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DigitSet {
    mask: u16,
}

impl DigitSet {
    /// The empty set. Admits no value, since every decimal rendering has
    /// at least one digit.
    #[must_use]
    pub const fn empty() -> Self {
        Self { mask: 0 }
    }

    /// All ten digits. Admits every value.
    #[must_use]
    pub const fn full() -> Self {
        Self { mask: FULL_MASK }
    }

    /// Build a set from digit values `0..=9`, usable in `const` items.
    ///
    /// # Panics
    ///
    /// Panics if any value is above 9. In a `const` item this is a compile
    /// error.
    #[must_use]
    pub const fn from_digit_values(values: &[u8]) -> Self {
        let mut mask = 0u16;
        let mut i = 0;
        while i < values.len() {
            assert!(values[i] <= 9, "digit value above 9");
            mask |= 1 << values[i];
            i += 1;
        }
        Self { mask }
    }

    /// Build a set from characters. Duplicates are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DigitSetError::NotADigit`] for the first non-digit character.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Result<Self, DigitSetError> {
        let mut mask = 0u16;
        for ch in chars {
            let d = ch.to_digit(10).ok_or(DigitSetError::NotADigit { ch })?;
            mask |= 1 << d;
        }
        Ok(Self { mask })
    }

    /// Parse a set from a string such as `"24"`.
    ///
    /// # Errors
    ///
    /// Returns [`DigitSetError::NotADigit`] if any character is not `0`-`9`.
    pub fn parse(s: &str) -> Result<Self, DigitSetError> {
        Self::from_chars(s.chars())
    }

    /// Whether `ch` is a member. Non-digit characters are never members.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        ch.to_digit(10).is_some_and(|d| self.mask & (1 << d) != 0)
    }

    /// Whether every character of the decimal rendering of `value` is a member.
    #[must_use]
    pub fn admits(&self, mut value: u64) -> bool {
        if self.mask == FULL_MASK {
            return true;
        }
        loop {
            // `value % 10` is < 10, so the cast is lossless.
            #[allow(clippy::cast_possible_truncation)]
            let d = (value % 10) as u32;
            if self.mask & (1 << d) == 0 {
                return false;
            }
            value /= 10;
            if value == 0 {
                return true;
            }
        }
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Number of member digits.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Member digits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..10u32)
            .filter(|d| self.mask & (1 << d) != 0)
            .filter_map(|d| char::from_digit(d, 10))
    }
}

impl fmt::Display for DigitSet {
    /// Members in ascending order, e.g. `24`. The empty set renders as `""`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.iter() {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DigitSet {
    type Err = DigitSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
