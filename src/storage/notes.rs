use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use super::{write_atomic, Result};
use crate::utils::paths::{app_data_dir, ensure_dir, notes_file_in};

const NOTE_KEY_PREFIX: &str = "table-summary-";

/// Free-text annotations a user attaches to a table view, keyed by table
/// type and persisted across sessions. One JSON map on disk.
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let base = base.unwrap_or_else(app_data_dir);
        ensure_dir(&base)?;
        Ok(Self {
            path: notes_file_in(&base),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::new(None)
    }

    /// The stored note for a table type, if any.
    pub fn note(&self, table_type: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(&key_for(table_type)))
    }

    pub fn set_note(&self, table_type: &str, text: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key_for(table_type), text.to_string());
        self.write_map(&map)
    }

    pub fn clear_note(&self, table_type: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.remove(&key_for(table_type));
        self.write_map(&map)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(BTreeMap::new())
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        write_atomic(&self.path, &json)
    }
}

fn key_for(table_type: &str) -> String {
    format!("{NOTE_KEY_PREFIX}{table_type}")
}
