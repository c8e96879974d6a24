// File: src/persistence.rs
use crate::core::keypad::KeypadLayout;
use crate::core::stems::InvertedIndex;
use crate::core::types::Word;
use crate::errors::{ResourceKind, Result, T9Error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Layout and index together, for the binary snapshot.
#[derive(Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub layout: KeypadLayout,
    pub index: InvertedIndex,
}

/// Serializes exactly like [`Snapshot`] without cloning either half.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    layout: &'a KeypadLayout,
    index: &'a InvertedIndex,
}

fn open(path: &Path, kind: ResourceKind) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => T9Error::missing(kind, path),
        _ => T9Error::Io(e),
    })
}

/// A fully written temp file waiting to be renamed over its destination.
struct Staged {
    temp_file: NamedTempFile,
    path: PathBuf,
}

impl Staged {
    fn persist(self) -> Result<()> {
        self.temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Writes into a temp file in the destination directory. Nothing appears at
/// `path` until the returned [`Staged`] is persisted.
fn stage<F>(path: &Path, write: F) -> Result<Staged>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    Ok(Staged { temp_file, path: path.to_path_buf() })
}

fn stage_json<T: Serialize>(value: &T, path: &Path) -> Result<Staged> {
    stage(path, |writer| {
        serde_json::to_writer(&mut *writer, value)?;
        Ok(())
    })
}

fn stage_snapshot(layout: &KeypadLayout, index: &InvertedIndex, path: &Path) -> Result<Staged> {
    stage(path, |writer| {
        bincode::serialize_into(writer, &SnapshotRef { layout, index })?;
        Ok(())
    })
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    stage_json(value, path)?.persist()
}

fn load_json<T: DeserializeOwned>(path: &Path, kind: ResourceKind) -> Result<T> {
    let reader = BufReader::new(open(path, kind)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Reads one word per line. Surrounding whitespace is trimmed and blank lines
/// are skipped; everything else is kept verbatim for the encoder to sort out.
pub fn load_word_list(path: &Path) -> Result<Vec<Word>> {
    let reader = BufReader::new(open(path, ResourceKind::WordList)?);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    log::info!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

pub fn save_layout(layout: &KeypadLayout, path: &Path) -> Result<()> {
    save_json(&layout.to_groups(), path)?;
    log::info!("wrote keypad layout to {}", path.display());
    Ok(())
}

pub fn load_layout(path: &Path) -> Result<KeypadLayout> {
    let groups: BTreeMap<String, String> = load_json(path, ResourceKind::Layout)?;
    KeypadLayout::from_groups(&groups)
}

pub fn save_index(index: &InvertedIndex, path: &Path) -> Result<()> {
    save_json(index, path)?;
    log::info!("wrote {} stems to {}", index.len(), path.display());
    Ok(())
}

pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    let entries: BTreeMap<String, Vec<Word>> = load_json(path, ResourceKind::Index)?;
    let index = InvertedIndex::from_entries(entries)?;
    log::info!("loaded {} stems from {}", index.len(), path.display());
    Ok(index)
}

pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    stage_snapshot(&snapshot.layout, &snapshot.index, path)?.persist()?;
    log::info!("wrote snapshot to {}", path.display());
    Ok(())
}

/// Reads a snapshot and puts both halves through the same checks as the
/// JSON artifacts.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let reader = BufReader::new(open(path, ResourceKind::Snapshot)?);
    let Snapshot { layout, index } = bincode::deserialize_from(reader)?;
    let layout = KeypadLayout::from_groups(&layout.to_groups())?;
    let index = InvertedIndex::from_entries(index.into_entries())?;
    log::info!("loaded snapshot with {} stems from {}", index.len(), path.display());
    Ok(Snapshot { layout, index })
}

/// Writes the layout, the index and (optionally) the snapshot as one set.
///
/// Every file is fully written to a temp file before any of them is renamed
/// into place, so a serialization or disk-space failure leaves all previous
/// artifacts untouched. The final renames are individually atomic.
pub fn save_artifacts(
    layout: &KeypadLayout,
    index: &InvertedIndex,
    layout_path: &Path,
    index_path: &Path,
    snapshot_path: Option<&Path>,
) -> Result<()> {
    let mut staged = vec![
        stage_json(&layout.to_groups(), layout_path)?,
        stage_json(index, index_path)?,
    ];
    if let Some(path) = snapshot_path {
        staged.push(stage_snapshot(layout, index, path)?);
    }
    for file in staged {
        file.persist()?;
    }
    log::info!(
        "wrote keypad layout to {} and {} stems to {}",
        layout_path.display(),
        index.len(),
        index_path.display()
    );
    Ok(())
}
