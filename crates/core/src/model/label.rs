use std::fmt;

use crate::error::QuizModelError;

const ALPHABET_LEN: usize = 26;

/// Positional option label (`A`, `B`, `C`, ...).
///
/// Labels are derived from an option's position in its question, never from the
/// option text, so `"B. Paris"` listed first is still option `A`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionLabel(u8);

impl OptionLabel {
    /// Returns the label for the option at `index`, or `None` past `Z`.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < ALPHABET_LEN {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    /// Parse a single-letter label, ignoring surrounding whitespace and case.
    ///
    /// # Errors
    ///
    /// Returns `QuizModelError::InvalidLabel` unless the input is exactly one ASCII letter.
    pub fn parse(raw: &str) -> Result<Self, QuizModelError> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => {
                let offset = ch.to_ascii_uppercase() as u8 - b'A';
                Ok(Self(offset))
            }
            _ => Err(QuizModelError::InvalidLabel(raw.to_string())),
        }
    }

    /// Zero-based option position.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(b'A' + self.0)
    }
}

impl fmt::Debug for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionLabel({})", self.as_char())
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
