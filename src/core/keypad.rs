// File: src/core/keypad.rs
use crate::core::types::Digit;
use crate::errors::{Result, T9Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Digits that carry letter groups on a 12-key pad.
pub const LETTER_DIGITS: std::ops::RangeInclusive<Digit> = 2..=9;
const GROUP_COUNT: usize = 8;
/// Digit 1 has no letters; artifacts still record it with this placeholder.
const BLANK_DIGIT: Digit = 1;
const BLANK_PLACEHOLDER: &str = " ";

/// How to carve an alphabet into keypad groups.
///
/// Exceptional letters are lifted out before chunking and appended to their
/// target digit afterwards, which is how the standard pad ends up with four
/// letters on 7 and 9.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub alphabet: String,
    pub group_size: usize,
    pub exceptions: Vec<(char, Digit)>,
}

impl Default for LayoutSpec {
    /// The ITU E.161 pad: abc def ghi jkl mno pqrs tuv wxyz.
    fn default() -> Self {
        Self {
            alphabet: "abcdefghijklmnopqrstuvwxyz".to_string(),
            group_size: 3,
            exceptions: vec![('s', 7), ('z', 9)],
        }
    }
}

/// Immutable digit -> letter-group table. Slot 0 and slot 1 stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadLayout {
    slots: [String; 10],
}

impl KeypadLayout {
    /// The canonical pad built from [`LayoutSpec::default`].
    pub fn standard() -> Result<Self> {
        Self::build(&LayoutSpec::default())
    }

    pub fn build(spec: &LayoutSpec) -> Result<Self> {
        let mut letters: Vec<char> = spec
            .alphabet
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if let Some(bad) = letters.iter().find(|c| !c.is_ascii_lowercase()) {
            return Err(T9Error::Configuration(format!(
                "alphabet contains non-letter '{bad}'"
            )));
        }
        letters.sort_unstable();
        letters.dedup();
        if letters.len() != 26 {
            return Err(T9Error::Configuration(format!(
                "alphabet has {} distinct letters, every letter a-z must be placed",
                letters.len()
            )));
        }

        let mut exceptions = Vec::with_capacity(spec.exceptions.len());
        for &(letter, digit) in &spec.exceptions {
            let letter = letter.to_ascii_lowercase();
            if !LETTER_DIGITS.contains(&digit) {
                return Err(T9Error::Configuration(format!(
                    "exception '{letter}' targets digit {digit}, expected 2-9"
                )));
            }
            let Some(pos) = letters.iter().position(|&c| c == letter) else {
                return Err(T9Error::Configuration(format!(
                    "exception '{letter}' is not in the alphabet (or listed twice)"
                )));
            };
            letters.remove(pos);
            exceptions.push((letter, digit));
        }

        if spec.group_size == 0 || letters.len() != spec.group_size * GROUP_COUNT {
            return Err(T9Error::Configuration(format!(
                "{} letters cannot be split into {GROUP_COUNT} groups of {}",
                letters.len(),
                spec.group_size
            )));
        }

        let mut slots: [String; 10] = Default::default();
        for (i, chunk) in letters.chunks(spec.group_size).enumerate() {
            slots[2 + i] = chunk.iter().collect();
        }
        for (letter, digit) in exceptions {
            slots[digit as usize].push(letter);
        }

        Ok(Self { slots })
    }

    /// Rebuilds a layout from a persisted digit -> letters table.
    ///
    /// Accepts the `"1": " "` placeholder; rejects letters on any digit
    /// outside 2-9, letters claimed by more than one digit and letters
    /// claimed by none.
    pub fn from_groups(groups: &BTreeMap<String, String>) -> Result<Self> {
        let mut slots: [String; 10] = Default::default();
        let mut seen = [false; 26];

        for (key, group) in groups {
            let digit = match key.as_bytes() {
                [d @ b'0'..=b'9'] => d - b'0',
                _ => {
                    return Err(T9Error::Configuration(format!(
                        "layout key '{key}' is not a single digit"
                    )))
                }
            };
            if !LETTER_DIGITS.contains(&digit) {
                if group.trim().is_empty() {
                    continue;
                }
                return Err(T9Error::Configuration(format!(
                    "digit {digit} cannot carry letters ('{group}')"
                )));
            }
            for c in group.chars() {
                let c = c.to_ascii_lowercase();
                if !c.is_ascii_lowercase() {
                    return Err(T9Error::Configuration(format!(
                        "digit {digit} carries non-letter '{c}'"
                    )));
                }
                let slot = &mut seen[(c as u8 - b'a') as usize];
                if *slot {
                    return Err(T9Error::Configuration(format!(
                        "letter '{c}' is assigned to more than one digit"
                    )));
                }
                *slot = true;
                slots[digit as usize].push(c);
            }
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(T9Error::Configuration(format!(
                "letter '{}' is not assigned to any digit",
                char::from(b'a' + missing as u8)
            )));
        }

        Ok(Self { slots })
    }

    /// Digit -> letters table as written to `numpad.json`.
    pub fn to_groups(&self) -> BTreeMap<String, String> {
        let mut groups = BTreeMap::new();
        groups.insert(BLANK_DIGIT.to_string(), BLANK_PLACEHOLDER.to_string());
        for (digit, letters) in self.groups() {
            groups.insert(digit.to_string(), letters.to_string());
        }
        groups
    }

    pub fn letters(&self, digit: Digit) -> &str {
        self.slots.get(digit as usize).map_or("", String::as_str)
    }

    /// Non-empty groups in digit order.
    pub fn groups(&self) -> impl Iterator<Item = (Digit, &str)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_empty())
            .map(|(d, g)| (d as Digit, g.as_str()))
    }

    pub fn letter_index(&self) -> LetterDigitIndex {
        LetterDigitIndex::from_layout(self)
    }
}

/// Letter -> digit lookup, the exact inverse of a [`KeypadLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDigitIndex {
    digits: [Option<Digit>; 26],
}

impl LetterDigitIndex {
    pub fn from_layout(layout: &KeypadLayout) -> Self {
        let mut digits = [None; 26];
        for (digit, group) in layout.groups() {
            for c in group.bytes() {
                digits[(c - b'a') as usize] = Some(digit);
            }
        }
        Self { digits }
    }

    /// Case-insensitive. `None` for anything the layout doesn't carry.
    #[inline]
    pub fn digit_for(&self, c: char) -> Option<Digit> {
        if c.is_ascii_alphabetic() {
            self.digits[(c.to_ascii_lowercase() as u8 - b'a') as usize]
        } else {
            None
        }
    }
}
