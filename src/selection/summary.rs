//! Summary line shown on the settings surface.

use std::collections::HashMap;

/// Label shown when no pack is selected
pub const SYSTEM_ICONS_LABEL: &str = "System icons";

/// Resolves a pack id to its human-readable label.
pub trait LabelResolver {
    fn label_for(&self, id: &str) -> Option<String>;
}

impl LabelResolver for HashMap<String, String> {
    fn label_for(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// `"Label (id)"` for a known pack, the bare id for an unknown one, and
/// [`SYSTEM_ICONS_LABEL`] when nothing is selected.
pub fn format_summary(id: Option<&str>, resolver: &dyn LabelResolver) -> String {
    match id {
        Some(id) => match resolver.label_for(id) {
            Some(label) => format!("{label} ({id})"),
            None => id.to_string(),
        },
        None => SYSTEM_ICONS_LABEL.to_string(),
    }
}
