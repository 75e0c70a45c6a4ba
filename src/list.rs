//! Single-selection pack list.
//!
//! [`SelectableList`] keeps the ordered entries and the one selected row, and
//! tells a [`ListRenderer`] which rows need redrawing. The row-level comparison
//! lives in [`diff_lists`], a pure function that is usable without a renderer.

pub mod diff;
pub mod entry;
pub mod renderer;
pub mod synchronizer;

pub use diff::{diff_lists, ListDiff, Move};
pub use entry::{build_entry_list, compare_labels, IconHandle, SelectableEntry};
pub use renderer::{ChannelRenderer, ListEvent, ListRenderer};
pub use synchronizer::SelectableList;
