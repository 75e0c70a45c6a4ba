//! Icon pack enumeration.
//!
//! Packs live one per directory under a packs root, each described by a
//! `pack.toml` manifest. Only packs that ship a grayscale icon map and are not
//! marked as system-owned are offered to the picker.

pub mod manifest;
pub mod scanner;

pub use manifest::{PackManifest, ICON_MAP_RESOURCE, MANIFEST_FILE};
pub use scanner::{is_eligible, PackCatalog, PackInfo};
