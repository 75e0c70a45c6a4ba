//! Configuration file support.
//!
//! Configuration is loaded from `~/.config/iconpack/config.toml`; command line
//! flags override file values, and built-in defaults fill the rest.
//!
//! ```toml
//! store_path = "~/.local/share/iconpack/store.toml"
//! packs_dir = "~/.local/share/iconpack/packs"
//! authority = "iconpack.settings"
//! themed_icons_available = true
//! ```

use crate::error::{PickerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Provider authority used when none is configured
pub const DEFAULT_AUTHORITY: &str = "iconpack.settings";

const APP_DIR: &str = "iconpack";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TOML file backing the key-value store; `None` keeps the store in memory
    pub store_path: Option<PathBuf>,

    /// Directory scanned for icon packs
    pub packs_dir: Option<PathBuf>,

    /// Authority part of every store uri
    pub authority: String,

    /// Whether themed icons are supported on this setup
    pub themed_icons_available: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            packs_dir: None,
            authority: DEFAULT_AUTHORITY.to_string(),
            themed_icons_available: true,
        }
    }
}

impl Config {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|err| PickerError::file_error("failed to read config file", err))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|err| PickerError::config(format!("{}: {err}", path.display())))?;

        if config.authority.trim().is_empty() {
            return Err(PickerError::config("authority must not be empty"));
        }
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Merge with CLI overrides; flags win over file values
    pub fn with_overrides(mut self, store_path: Option<PathBuf>, packs_dir: Option<PathBuf>) -> Self {
        if store_path.is_some() {
            self.store_path = store_path;
        }
        if packs_dir.is_some() {
            self.packs_dir = packs_dir;
        }
        self
    }

    /// Packs directory, defaulting to `<data dir>/iconpack/packs`
    pub fn packs_dir(&self) -> PathBuf {
        self.packs_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| data_dir().join("packs"))
    }

    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path.as_deref().map(expand_home)
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
