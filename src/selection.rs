//! Selected icon pack state.
//!
//! [`SelectionManager`] is the single owner of "which pack is active". It loads
//! the persisted choice in the background, answers snapshot reads for the UI,
//! and writes user choices back to the store.

pub mod manager;
pub mod snapshot;
pub mod summary;

pub use manager::{SelectionManager, KEY_NAME, KEY_THEMED_ICON_PACK};
pub use snapshot::SavedState;
pub use summary::{format_summary, LabelResolver, SYSTEM_ICONS_LABEL};
