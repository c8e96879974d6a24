// --- File: src/core/stems.rs
use crate::core::encoder::WordEncoder;
use crate::core::keypad::KeypadLayout;
use crate::core::types::{DigitSequence, Stem, Word};
use crate::errors::{Result, T9Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Yields the prefixes of `s` from `min_length` up to the whole string.
///
/// `stems("12345", 1)` gives `"1"`, `"12"`, `"123"`, `"1234"`, `"12345"`.
/// A `min_length` of 0 is treated as 1; stems are never empty. `s` must be
/// ASCII (digit sequences always are).
pub fn stems(s: &str, min_length: usize) -> impl Iterator<Item = &str> + '_ {
    (min_length.max(1)..=s.len()).map(move |end| &s[..end])
}

/// Stem -> words, in the order the words were fed to the builder.
///
/// Keys are kept sorted so serializing the same index twice gives the same
/// bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    entries: BTreeMap<Stem, Vec<Word>>,
}

impl InvertedIndex {
    /// Wraps a table read back from disk. Every key must be a non-empty
    /// digit string.
    pub fn from_entries(entries: BTreeMap<Stem, Vec<Word>>) -> Result<Self> {
        if let Some(bad) = entries
            .keys()
            .find(|k| k.is_empty() || !k.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(T9Error::Configuration(format!(
                "index key '{bad}' is not a digit stem"
            )));
        }
        Ok(Self { entries })
    }

    pub fn into_entries(self) -> BTreeMap<Stem, Vec<Word>> {
        self.entries
    }

    pub fn get(&self, stem: &str) -> Option<&[Word]> {
        self.entries.get(stem).map(Vec::as_slice)
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total (stem, word) pairs.
    pub fn postings(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Word])> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Counters reported by a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub words_indexed: usize,
    /// Words whose encoding came out empty.
    pub words_discarded: usize,
    pub stems: usize,
    pub postings: usize,
}

/// Accumulates words into an [`InvertedIndex`] in one batch.
pub struct StemIndexBuilder {
    encoder: WordEncoder,
    min_stem_length: usize,
    entries: BTreeMap<Stem, Vec<Word>>,
    stats: IndexStats,
}

impl StemIndexBuilder {
    pub fn new(layout: &KeypadLayout) -> Self {
        Self {
            encoder: WordEncoder::new(layout),
            min_stem_length: 1,
            entries: BTreeMap::new(),
            stats: IndexStats::default(),
        }
    }

    /// Stems shorter than `min` are not indexed. Values below 1 mean 1.
    pub fn min_stem_length(mut self, min: usize) -> Self {
        self.min_stem_length = min.max(1);
        self
    }

    /// Files `word` under every stem of its encoding. Returns the encoding.
    pub fn insert(&mut self, word: &str) -> DigitSequence {
        let digits = self.encoder.encode(word);
        if digits.is_empty() {
            log::debug!("discarding {word:?}: no keypad letters");
            self.stats.words_discarded += 1;
            return digits;
        }
        for stem in digits.stems(self.min_stem_length) {
            // Look up by &str first so existing stems don't allocate.
            match self.entries.get_mut(stem) {
                Some(words) => words.push(word.to_string()),
                None => {
                    self.entries.insert(stem.to_string(), vec![word.to_string()]);
                }
            }
        }
        self.stats.words_indexed += 1;
        digits
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    pub fn finish(self) -> (InvertedIndex, IndexStats) {
        let index = InvertedIndex { entries: self.entries };
        let stats = IndexStats {
            stems: index.len(),
            postings: index.postings(),
            ..self.stats
        };
        log::info!(
            "stem index built: {} words ({} discarded), {} stems, {} postings",
            stats.words_indexed,
            stats.words_discarded,
            stats.stems,
            stats.postings
        );
        (index, stats)
    }
}

/// Builds the stem index for `words` with the default minimum stem length.
pub fn build<I, S>(words: I, layout: &KeypadLayout) -> InvertedIndex
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = StemIndexBuilder::new(layout);
    builder.extend(words);
    builder.finish().0
}

/// Word <-> full encoding, recovered from an [`InvertedIndex`].
///
/// A word's encoding is the longest stem it is filed under, so the view can be
/// rebuilt from a loaded artifact without the word list.
#[derive(Debug, Clone, Default)]
pub struct DigitView {
    by_word: BTreeMap<Word, DigitSequence>,
    by_digits: BTreeMap<String, Vec<Word>>,
}

impl DigitView {
    pub fn from_index(index: &InvertedIndex) -> Self {
        let mut longest: BTreeMap<&str, &str> = BTreeMap::new();
        for (stem, words) in index.iter() {
            for word in words {
                let entry = longest.entry(word.as_str()).or_insert(stem);
                if stem.len() > entry.len() {
                    *entry = stem;
                }
            }
        }

        let mut by_digits: BTreeMap<String, Vec<Word>> = BTreeMap::new();
        for (stem, words) in index.iter() {
            let full: Vec<Word> = words
                .iter()
                .filter(|w| longest.get(w.as_str()) == Some(&stem))
                .cloned()
                .collect();
            if !full.is_empty() {
                by_digits.insert(stem.to_string(), full);
            }
        }

        let by_word = longest
            .into_iter()
            .map(|(word, stem)| {
                let mut digits = DigitSequence::new();
                for b in stem.bytes() {
                    digits.push(b - b'0');
                }
                (word.to_string(), digits)
            })
            .collect();

        Self { by_word, by_digits }
    }

    pub fn digits_of(&self, word: &str) -> Option<&DigitSequence> {
        self.by_word.get(word)
    }

    /// Words whose whole encoding is `digits` (not merely prefixed by it).
    pub fn words_for(&self, digits: &str) -> &[Word] {
        self.by_digits.get(digits).map_or(&[], Vec::as_slice)
    }
}
