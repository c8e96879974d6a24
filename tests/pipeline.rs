// Build -> save -> load -> query, through the public API only.

use std::fs;
use t9_core::errors::ResourceKind;
use t9_core::{KeypadEngine, Settings, T9Error};
use tempfile::tempdir;

const WORDS: &str = "bad\ncafe\nHello\ngood\nhome\ngone\n\nit's\n1999\nquiz\n";

fn settings_with_words(dir: &std::path::Path) -> Settings {
    let settings = Settings::in_dir(dir);
    fs::write(&settings.word_list, WORDS).unwrap();
    settings
}

#[test]
fn build_then_query_from_json_artifacts() {
    let dir = tempdir().unwrap();
    let settings = settings_with_words(dir.path());

    let (built, stats) = KeypadEngine::from_word_list(&settings).unwrap();
    assert_eq!(stats.words_indexed, 8);
    assert_eq!(stats.words_discarded, 1);
    built.save(&settings).unwrap();

    let engine = KeypadEngine::open(&settings).unwrap();
    assert_eq!(engine.lookup("22").unwrap(), ["bad", "cafe"]);
    assert_eq!(engine.lookup("223").unwrap(), ["bad", "cafe"]);
    assert_eq!(engine.lookup("2233").unwrap(), ["cafe"]);
    assert_eq!(engine.lookup("4663").unwrap(), ["good", "home", "gone"]);
    assert_eq!(engine.lookup("43556").unwrap(), ["Hello"]);
    assert!(engine.lookup("999999999").unwrap().is_empty());
    assert!(matches!(engine.lookup("4x"), Err(T9Error::InvalidQuery { .. })));
    assert_eq!(engine.layout(), built.layout());
    assert_eq!(engine.index(), built.index());
}

#[test]
fn snapshot_serves_the_same_answers() {
    let dir = tempdir().unwrap();
    let mut settings = settings_with_words(dir.path());
    settings.snapshot = Some(dir.path().join("t9.bin"));

    let (built, _) = KeypadEngine::from_word_list(&settings).unwrap();
    built.save(&settings).unwrap();

    // Snapshot takes precedence, so the JSON files aren't needed to open it.
    fs::remove_file(&settings.index_out).unwrap();
    let engine = KeypadEngine::open(&settings).unwrap();
    assert_eq!(engine.lookup("7849").unwrap(), ["quiz"]);
    assert_eq!(engine.index(), built.index());
}

#[test]
fn rebuilding_produces_identical_files() {
    let dir = tempdir().unwrap();
    let settings = settings_with_words(dir.path());

    KeypadEngine::from_word_list(&settings).unwrap().0.save(&settings).unwrap();
    let first_index = fs::read(&settings.index_out).unwrap();
    let first_layout = fs::read(&settings.layout_out).unwrap();

    KeypadEngine::from_word_list(&settings).unwrap().0.save(&settings).unwrap();
    assert_eq!(fs::read(&settings.index_out).unwrap(), first_index);
    assert_eq!(fs::read(&settings.layout_out).unwrap(), first_layout);
}

#[test]
fn missing_word_list_aborts_without_writing() {
    let dir = tempdir().unwrap();
    let settings = Settings::in_dir(dir.path());

    match KeypadEngine::from_word_list(&settings) {
        Err(T9Error::MissingResource { kind, path }) => {
            assert_eq!(kind, ResourceKind::WordList);
            assert_eq!(path, settings.word_list);
        }
        other => panic!("expected MissingResource, got {:?}", other.err()),
    }
    assert!(!settings.index_out.exists());
    assert!(!settings.layout_out.exists());
}

#[test]
fn opening_without_artifacts_fails() {
    let dir = tempdir().unwrap();
    let settings = Settings::in_dir(dir.path());
    assert!(matches!(
        KeypadEngine::open(&settings),
        Err(T9Error::MissingResource { .. })
    ));
}

#[test]
fn digit_view_survives_reload() {
    let dir = tempdir().unwrap();
    let settings = settings_with_words(dir.path());
    KeypadEngine::from_word_list(&settings).unwrap().0.save(&settings).unwrap();

    let engine = KeypadEngine::open(&settings).unwrap();
    let view = engine.digit_view();
    assert_eq!(view.digits_of("it's").unwrap().as_str(), "487");
    assert_eq!(view.words_for("4663"), ["good", "home", "gone"]);
    assert!(view.digits_of("1999").is_none());
}

#[test]
fn corrupt_snapshot_fails_to_open_instead_of_panicking() {
    #[derive(serde::Serialize)]
    struct RawSnapshot {
        slots: [String; 10],
        index: std::collections::BTreeMap<String, Vec<String>>,
    }

    let dir = tempdir().unwrap();
    let mut settings = Settings::in_dir(dir.path());
    let path = dir.path().join("t9.bin");
    settings.snapshot = Some(path.clone());

    let mut slots: [String; 10] = Default::default();
    for (digit, letters) in ["abc", "def", "ghi", "jkl", "mno", "pqrs", "tuv", "wxyz"].iter().enumerate() {
        slots[digit + 2] = letters.to_string();
    }
    slots[2] = "A1".to_string();
    let raw = RawSnapshot { slots, index: Default::default() };
    fs::write(&path, bincode::serialize(&raw).unwrap()).unwrap();

    assert!(matches!(
        KeypadEngine::open(&settings),
        Err(T9Error::Configuration(_))
    ));
}
