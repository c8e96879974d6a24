// File: src/config.rs
use crate::core::keypad::LayoutSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const WORD_LIST_FILE: &str = "allwords.txt";
pub const LAYOUT_FILE: &str = "numpad.json";
pub const INDEX_FILE: &str = "inverted_index.json";

/// Base directory for the default file names when set.
pub const DATA_DIR_ENV: &str = "T9_DATA_DIR";

/// Where artifacts live and how the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub word_list: PathBuf,
    pub layout_out: PathBuf,
    pub index_out: PathBuf,
    /// Optional bincode snapshot written next to the JSON artifacts.
    pub snapshot: Option<PathBuf>,
    pub min_stem_length: usize,
    pub layout: LayoutSpec,
}

impl Default for Settings {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

impl Settings {
    /// Defaults with every file placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            word_list: dir.join(WORD_LIST_FILE),
            layout_out: dir.join(LAYOUT_FILE),
            index_out: dir.join(INDEX_FILE),
            snapshot: None,
            min_stem_length: 1,
            layout: LayoutSpec::default(),
        }
    }

    /// Defaults, rebased onto `$T9_DATA_DIR` when it is set.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::in_dir(Path::new(&dir)),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_rebases_every_path() {
        let s = Settings::in_dir(Path::new("/data/t9"));
        assert_eq!(s.word_list, Path::new("/data/t9/allwords.txt"));
        assert_eq!(s.layout_out, Path::new("/data/t9/numpad.json"));
        assert_eq!(s.index_out, Path::new("/data/t9/inverted_index.json"));
        assert_eq!(s.snapshot, None);
        assert_eq!(s.min_stem_length, 1);
    }

    #[test]
    fn settings_serialize() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
