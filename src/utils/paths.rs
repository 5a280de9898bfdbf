use dirs::home_dir;
use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::StudioError;

const DEFAULT_DIR_NAME: &str = ".studio_core";
const VIEWS_FILE: &str = "views.json";
const NOTES_FILE: &str = "notes.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.studio_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("STUDIO_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the table annotation store.
pub fn notes_file_in(base: &Path) -> PathBuf {
    base.join(NOTES_FILE)
}

/// Path to the saved view store.
pub fn views_file_in(base: &Path) -> PathBuf {
    base.join(VIEWS_FILE)
}

/// Path to the configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<(), StudioError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
