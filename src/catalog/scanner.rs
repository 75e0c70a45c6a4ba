//! Directory scanner producing picker candidates.
//!
//! Scanning touches the file system for every pack, so it runs on the blocking
//! pool. Labels seen by the most recent scan are cached for summary rendering.

use crate::catalog::manifest::{PackManifest, ICON_MAP_RESOURCE, MANIFEST_FILE};
use crate::error::{PickerError, Result};
use crate::list::{IconHandle, SelectableEntry};
use crate::selection::LabelResolver;
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Icon file looked up when a manifest does not name one
const DEFAULT_ICON_FILE: &str = "icon.png";

/// An eligible pack found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackInfo {
    pub id: String,
    pub label: String,
    pub icon: IconHandle,
    pub dir: PathBuf,
}

impl From<PackInfo> for SelectableEntry {
    fn from(info: PackInfo) -> Self {
        SelectableEntry::new(info.id, info.label, info.icon)
    }
}

pub struct PackCatalog {
    root: PathBuf,
    labels: Arc<RwLock<HashMap<String, String>>>,
}

impl PackCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            labels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Enumerate eligible packs, unsorted.
    ///
    /// Fails only when the packs root itself is unusable; individual broken
    /// packs are skipped.
    pub async fn scan(&self) -> Result<Vec<PackInfo>> {
        let root = self.root.clone();
        let packs = tokio::task::spawn_blocking(move || scan_dir(&root)).await??;

        let mut labels = self.labels.write();
        labels.clear();
        labels.extend(packs.iter().map(|pack| (pack.id.clone(), pack.label.clone())));

        Ok(packs)
    }

    /// Enumerate eligible packs as picker entries
    pub async fn scan_entries(&self) -> Result<Vec<SelectableEntry>> {
        Ok(self.scan().await?.into_iter().map(Into::into).collect())
    }
}

impl LabelResolver for PackCatalog {
    fn label_for(&self, id: &str) -> Option<String> {
        self.labels.read().get(id).cloned()
    }
}

/// A pack is offered when it is not system-owned and ships the icon map
pub fn is_eligible(dir: &Path, manifest: &PackManifest) -> bool {
    !manifest.system && dir.join(ICON_MAP_RESOURCE).is_file()
}

fn scan_dir(root: &Path) -> Result<Vec<PackInfo>> {
    let unavailable = || PickerError::CatalogUnavailable {
        path: root.to_path_buf(),
    };
    if !root.is_dir() {
        return Err(unavailable());
    }

    let mut packs = Vec::new();
    for dir_entry in std::fs::read_dir(root).map_err(|_| unavailable())? {
        let dir = match dir_entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                warn!("skipping unreadable entry in {}: {err}", root.display());
                continue;
            }
        };

        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            continue;
        }

        let manifest = match PackManifest::load(&manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!("skipping pack: {err}");
                continue;
            }
        };

        if !is_eligible(&dir, &manifest) {
            debug!("pack {} is not eligible", manifest.id);
            continue;
        }

        let icon = manifest
            .icon
            .as_deref()
            .map(|icon| dir.join(icon))
            .or_else(|| Some(dir.join(DEFAULT_ICON_FILE)).filter(|path| path.is_file()))
            .map(|path| IconHandle::new(path.to_string_lossy()))
            .unwrap_or_default();

        packs.push(PackInfo {
            label: manifest.display_label().to_string(),
            id: manifest.id,
            icon,
            dir,
        });
    }

    Ok(packs)
}
