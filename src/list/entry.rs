//! List entries and ordering.

use std::cmp::Ordering;

/// Opaque icon reference (a path or a glyph). Never decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IconHandle(String);

impl IconHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One row of the picker.
///
/// `id == None` is the system icons sentinel. Rows are the same item when their
/// ids match, and render identically when all three fields match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableEntry {
    pub id: Option<String>,
    pub label: String,
    pub icon: IconHandle,
}

impl SelectableEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: IconHandle) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
            icon,
        }
    }

    /// The "use system icons" row
    pub fn sentinel(label: impl Into<String>, icon: IconHandle) -> Self {
        Self {
            id: None,
            label: label.into(),
            icon,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id.is_none()
    }

    pub fn same_item(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Case-insensitive label order with the raw label as tie-breaker, so
/// "alpha" and "Alpha" sort together but deterministically.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort `candidates` by label and put the system icons row in front.
///
/// Any sentinel rows already present in `candidates` are dropped so the list
/// always carries exactly one, at index 0.
pub fn build_entry_list(
    sentinel_label: impl Into<String>,
    sentinel_icon: IconHandle,
    candidates: impl IntoIterator<Item = SelectableEntry>,
) -> Vec<SelectableEntry> {
    let mut packs: Vec<SelectableEntry> = candidates
        .into_iter()
        .filter(|entry| !entry.is_sentinel())
        .collect();
    packs.sort_by(|a, b| compare_labels(&a.label, &b.label));

    let mut entries = Vec::with_capacity(packs.len() + 1);
    entries.push(SelectableEntry::sentinel(sentinel_label, sentinel_icon));
    entries.extend(packs);
    entries
}
