// File: src/core/encoder.rs
use crate::core::keypad::{KeypadLayout, LetterDigitIndex};
use crate::core::types::DigitSequence;

/// Maps words to their keypad digit sequences.
pub struct WordEncoder {
    index: LetterDigitIndex,
}

impl WordEncoder {
    pub fn new(layout: &KeypadLayout) -> Self {
        Self { index: layout.letter_index() }
    }

    pub fn from_index(index: LetterDigitIndex) -> Self {
        Self { index }
    }

    pub fn encode(&self, word: &str) -> DigitSequence {
        encode(word, &self.index)
    }
}

/// Encodes `word` one letter at a time. Characters the layout doesn't carry
/// (punctuation, digits, spaces) are dropped, so a word with no letters
/// encodes to an empty sequence.
pub fn encode(word: &str, index: &LetterDigitIndex) -> DigitSequence {
    let mut digits = DigitSequence::new();
    for digit in word.chars().filter_map(|c| index.digit_for(c)) {
        digits.push(digit);
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> WordEncoder {
        WordEncoder::new(&KeypadLayout::standard().unwrap())
    }

    #[test]
    fn encodes_simple_words() {
        let enc = encoder();
        assert_eq!(enc.encode("bad").as_str(), "223");
        assert_eq!(enc.encode("cafe").as_str(), "2233");
        assert_eq!(enc.encode("hello").as_str(), "43556");
        assert_eq!(enc.encode("quiz").as_str(), "7849");
    }

    #[test]
    fn encoding_ignores_case() {
        let enc = encoder();
        for word in ["Hello", "WORLD", "mIxEd", "Zebra"] {
            assert_eq!(enc.encode(word), enc.encode(&word.to_lowercase()));
        }
    }

    #[test]
    fn non_letters_are_skipped() {
        let enc = encoder();
        assert_eq!(enc.encode("don't").as_str(), "3668");
        assert_eq!(enc.encode("e-mail").as_str(), "36245");
        assert_eq!(enc.encode("R2D2").as_str(), "73");
        assert!(enc.encode("don't").len() < "don't".len());
    }

    #[test]
    fn word_without_letters_encodes_empty() {
        let enc = encoder();
        assert!(enc.encode("").is_empty());
        assert!(enc.encode("1234").is_empty());
        assert!(enc.encode("--").is_empty());
    }

    #[test]
    fn output_only_uses_letter_digits() {
        let enc = encoder();
        let digits = enc.encode("The quick brown fox jumps over the lazy dog!");
        assert!(digits.as_str().bytes().all(|b| (b'2'..=b'9').contains(&b)));
        assert_eq!(digits.len(), 35);
    }
}
