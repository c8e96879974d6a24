// File: src/core/query.rs
use crate::core::stems::InvertedIndex;
use crate::core::types::Word;
use crate::errors::{Result, T9Error};

/// Read-only lookups against a built [`InvertedIndex`].
///
/// Queries are strict: anything other than '0'..'9' is an
/// [`T9Error::InvalidQuery`]. A well-formed query with no registered words
/// (including the empty string) is `Ok` with an empty slice.
#[derive(Clone, Copy)]
pub struct MatchQuery<'a> {
    index: &'a InvertedIndex,
}

impl<'a> MatchQuery<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    pub fn lookup(&self, digits: &str) -> Result<&'a [Word]> {
        lookup(digits, self.index)
    }
}

pub fn lookup<'a>(digits: &str, index: &'a InvertedIndex) -> Result<&'a [Word]> {
    validate(digits)?;
    Ok(index.get(digits).unwrap_or(&[]))
}

fn validate(digits: &str) -> Result<()> {
    match digits.chars().find(|c| !c.is_ascii_digit()) {
        Some(offending) => Err(T9Error::InvalidQuery {
            query: digits.to_string(),
            offending,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keypad::KeypadLayout;
    use crate::core::stems::build;

    fn index() -> InvertedIndex {
        build(["bad", "cafe"], &KeypadLayout::standard().unwrap())
    }

    #[test]
    fn lookup_returns_words_under_stem() {
        let index = index();
        let query = MatchQuery::new(&index);
        assert_eq!(query.lookup("22").unwrap(), ["bad", "cafe"]);
        assert_eq!(query.lookup("223").unwrap(), ["bad", "cafe"]);
        assert_eq!(query.lookup("2233").unwrap(), ["cafe"]);
    }

    #[test]
    fn unknown_stem_is_empty_not_error() {
        let index = index();
        assert!(lookup("999999999", &index).unwrap().is_empty());
        assert!(lookup("1", &index).unwrap().is_empty());
        assert!(lookup("", &index).unwrap().is_empty());
    }

    #[test]
    fn non_digit_query_is_rejected() {
        let index = index();
        match lookup("22a", &index) {
            Err(T9Error::InvalidQuery { query, offending }) => {
                assert_eq!(query, "22a");
                assert_eq!(offending, 'a');
            }
            other => panic!("expected InvalidQuery, got {other:?}"),
        }
        assert!(lookup(" 22", &index).is_err());
        assert!(lookup("２", &index).is_err());
    }

    #[test]
    fn bad_query_does_not_affect_later_ones() {
        let index = index();
        let query = MatchQuery::new(&index);
        assert!(query.lookup("#").is_err());
        assert_eq!(query.lookup("2233").unwrap(), ["cafe"]);
    }
}
