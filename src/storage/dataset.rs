use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::Path};

use super::{write_atomic, Result};

/// Loads a record array snapshot exported by the upstream data
/// collaborator. The element type's own serde defaults handle sparse rows.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let data = fs::read_to_string(path)?;
    let records: Vec<T> = serde_json::from_str(&data)?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

/// Writes a record array snapshot, atomically.
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, &json)
}
