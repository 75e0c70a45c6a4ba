//! `pack.toml` manifest parsing.

use crate::error::{PickerError, Result};
use serde::Deserialize;
use std::path::Path;

/// Manifest file expected in every pack directory
pub const MANIFEST_FILE: &str = "pack.toml";
/// Capability resource a pack must ship to be offered
pub const ICON_MAP_RESOURCE: &str = "grayscale_icon_map.xml";

/// Declared metadata of one icon pack
///
/// ```toml
/// id = "org.example.pebble"
/// label = "Pebble"
/// icon = "icon.png"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackManifest {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Icon path relative to the pack directory
    #[serde(default)]
    pub icon: Option<String>,
    /// Packs bundled with the platform are never listed
    #[serde(default)]
    pub system: bool,
}

impl PackManifest {
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let manifest: PackManifest =
            toml::from_str(contents).map_err(|err| PickerError::manifest(path, err.to_string()))?;

        if manifest.id.trim().is_empty() {
            return Err(PickerError::manifest(path, "pack id must not be empty"));
        }
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| PickerError::file_error(format!("failed to read {}", path.display()), err))?;
        Self::parse(path, &contents)
    }

    /// Label to display, falling back to the id
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(&self.id)
    }
}
