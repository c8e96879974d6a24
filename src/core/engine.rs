use crate::config::Settings;
use crate::core::encoder::WordEncoder;
use crate::core::keypad::KeypadLayout;
use crate::core::query::MatchQuery;
use crate::core::stems::{DigitView, IndexStats, InvertedIndex, StemIndexBuilder};
use crate::core::types::{DigitSequence, Word};
use crate::errors::Result;
use crate::persistence::{self, Snapshot};

/// An immutable layout + index pair that answers keypad lookups.
///
/// Built in one pass from a word list, or loaded from artifacts written by a
/// previous build. Nothing mutates it afterwards, so one engine can serve any
/// number of queries for the lifetime of the process.
pub struct KeypadEngine {
    layout: KeypadLayout,
    index: InvertedIndex,
    encoder: WordEncoder,
}

impl KeypadEngine {
    pub fn new(layout: KeypadLayout, index: InvertedIndex) -> Self {
        let encoder = WordEncoder::new(&layout);
        Self { layout, index, encoder }
    }

    pub fn build<I, S>(layout: KeypadLayout, words: I, min_stem_length: usize) -> (Self, IndexStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = StemIndexBuilder::new(&layout).min_stem_length(min_stem_length);
        builder.extend(words);
        let (index, stats) = builder.finish();
        (Self::new(layout, index), stats)
    }

    /// Builds the layout and index from `settings.word_list`. Any failure
    /// aborts the whole build.
    pub fn from_word_list(settings: &Settings) -> Result<(Self, IndexStats)> {
        let layout = KeypadLayout::build(&settings.layout)?;
        let words = persistence::load_word_list(&settings.word_list)?;
        Ok(Self::build(layout, words, settings.min_stem_length))
    }

    /// Loads the snapshot when one is configured, otherwise the two JSON
    /// artifacts. Missing or malformed files are errors.
    pub fn open(settings: &Settings) -> Result<Self> {
        match &settings.snapshot {
            Some(path) => {
                let Snapshot { layout, index } = persistence::load_snapshot(path)?;
                Ok(Self::new(layout, index))
            }
            None => {
                let layout = persistence::load_layout(&settings.layout_out)?;
                let index = persistence::load_index(&settings.index_out)?;
                Ok(Self::new(layout, index))
            }
        }
    }

    /// Writes every configured artifact as one set: all files are staged
    /// before any is renamed into place.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        persistence::save_artifacts(
            &self.layout,
            &self.index,
            &settings.layout_out,
            &settings.index_out,
            settings.snapshot.as_deref(),
        )
    }

    pub fn lookup(&self, digits: &str) -> Result<&[Word]> {
        MatchQuery::new(&self.index).lookup(digits)
    }

    pub fn encode(&self, word: &str) -> DigitSequence {
        self.encoder.encode(word)
    }

    pub fn digit_view(&self) -> DigitView {
        DigitView::from_index(&self.index)
    }

    pub fn layout(&self) -> &KeypadLayout {
        &self.layout
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}
