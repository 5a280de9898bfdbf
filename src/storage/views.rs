use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use uuid::Uuid;

use super::{write_atomic, Result};
use crate::engine::{SalesDimension, SalesMetric};
use crate::errors::StudioError;
use crate::utils::paths::{app_data_dir, ensure_dir, views_file_in};

/// A named table configuration a user saved to return to later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedView {
    pub id: Uuid,
    pub name: String,
    pub dimension: SalesDimension,
    pub metric: SalesMetric,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedView {
    pub fn new(name: impl Into<String>, dimension: SalesDimension, metric: SalesMetric) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dimension,
            metric,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Persists saved views as one JSON file.
pub struct ViewStore {
    path: PathBuf,
}

impl ViewStore {
    pub fn new(base: Option<PathBuf>) -> Result<Self> {
        let base = base.unwrap_or_else(app_data_dir);
        ensure_dir(&base)?;
        Ok(Self {
            path: views_file_in(&base),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::new(None)
    }

    /// All saved views, most recently updated first.
    pub fn list(&self) -> Result<Vec<SavedView>> {
        let mut views = self.read_all()?;
        views.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(views)
    }

    pub fn save(&self, view: &SavedView) -> Result<()> {
        let mut views = self.read_all()?;
        match views.iter_mut().find(|existing| existing.id == view.id) {
            Some(existing) => {
                *existing = view.clone();
                existing.updated_at = Utc::now();
            }
            None => views.push(view.clone()),
        }
        self.write_all(&views)?;
        tracing::info!(name = %view.name, "saved view");
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut views = self.read_all()?;
        let before = views.len();
        views.retain(|view| view.id != id);
        if views.len() == before {
            return Err(StudioError::StorageError(format!(
                "saved view `{id}` not found"
            )));
        }
        self.write_all(&views)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<SavedView>> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Vec::new())
        }
    }

    fn write_all(&self, views: &[SavedView]) -> Result<()> {
        let json = serde_json::to_string_pretty(views)?;
        write_atomic(&self.path, &json)
    }
}
