//! Transient UI state carried across teardown and reconstruction of the surface.
//!
//! Only the selected id survives. When a snapshot is present on startup the
//! store fetch is skipped entirely, unless the store has been written since the
//! snapshot was taken.

use crate::error::{PickerError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themed_icon_pack: Option<String>,
}

impl SavedState {
    /// Read a snapshot file; a missing file means there is nothing to restore
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PickerError::file_error("failed to read saved state", err)),
        };

        toml::from_str(&contents)
            .map(Some)
            .map_err(|err| PickerError::other(format!("invalid saved state: {err}")))
    }

    /// Like [`SavedState::load`], but a snapshot older than the store file at
    /// `store` is stale and restores nothing
    pub fn load_unless_stale(path: &Path, store: Option<&Path>) -> Result<Option<Self>> {
        let Some(state) = Self::load(path)? else {
            return Ok(None);
        };

        let store_modified = match store.map(std::fs::metadata) {
            Some(Ok(meta)) => meta.modified()?,
            _ => return Ok(Some(state)),
        };
        let snapshot_modified = std::fs::metadata(path)?.modified()?;

        if snapshot_modified < store_modified {
            debug!("ignoring saved state {} older than the store", path.display());
            return Ok(None);
        }
        Ok(Some(state))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let serialized = toml::to_string(self)
            .map_err(|err| PickerError::other(format!("failed to encode saved state: {err}")))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serialized)
            .map_err(|err| PickerError::file_error("failed to write saved state", err))
    }

    /// Consume the snapshot, yielding the id to restore
    pub fn into_restored(self) -> Option<String> {
        self.themed_icon_pack
    }
}
