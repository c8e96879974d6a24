// File: src/errors.rs
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T, E = T9Error> = std::result::Result<T, E>;

/// Which on-disk resource an operation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    WordList,
    Layout,
    Index,
    Snapshot,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::WordList => "word list",
            Self::Layout => "keypad layout",
            Self::Index => "inverted index",
            Self::Snapshot => "snapshot",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum T9Error {
    /// The keypad definition is broken. Fix the layout, don't retry.
    #[error("keypad configuration error: {0}")]
    Configuration(String),

    #[error("{kind} not found at '{}'", path.display())]
    MissingResource { kind: ResourceKind, path: PathBuf },

    /// A query string held something other than '0'..'9'.
    #[error("invalid query '{query}': '{offending}' is not a keypad digit")]
    InvalidQuery { query: String, offending: char },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl T9Error {
    pub(crate) fn missing(kind: ResourceKind, path: impl Into<PathBuf>) -> Self {
        Self::MissingResource { kind, path: path.into() }
    }
}
