// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dictionary word, kept exactly as it appeared in the word list.
/// Output always returns the original spelling, never a normalized form.
pub type Word = String;

/// A stem is a non-empty prefix of a digit sequence, used as the index key.
pub type Stem = String;

/// A keypad digit, 0..=9.
pub type Digit = u8;

/// The keypad encoding of a word: one ASCII digit per letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigitSequence(String);

impl DigitSequence {
    pub fn new() -> Self {
        Self(String::new())
    }

    pub fn push(&mut self, digit: Digit) {
        debug_assert!(digit <= 9);
        self.0.push(char::from(b'0' + digit));
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All prefixes of length `min_length..=len`, shortest first.
    pub fn stems(&self, min_length: usize) -> impl Iterator<Item = &str> + '_ {
        crate::core::stems::stems(&self.0, min_length)
    }
}

impl fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DigitSequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
