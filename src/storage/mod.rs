//! File-backed persistence: table annotations, saved views, and record
//! snapshots. All writes go through a temp file and rename so a failed
//! write never clobbers the previous contents.

pub mod dataset;
pub mod notes;
pub mod views;

pub use dataset::{load_records, save_records};
pub use notes::NoteStore;
pub use views::{SavedView, ViewStore};

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::StudioError;
use crate::utils::paths::ensure_dir;

pub type Result<T> = std::result::Result<T, StudioError>;

const TMP_SUFFIX: &str = "tmp";

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
