//! # iconpack - Themed icon pack selection
//!
//! Keeps track of which themed icon pack is active, persists the choice in an
//! external key-value store, and drives a single-selection picker that redraws
//! only the rows that actually changed.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`store`] - Key-value-by-uri store trait with in-memory and TOML backends
//! - [`selection`] - The selection manager, summary text and saved state
//! - [`list`] - Entry list building, row diffing and the list synchronizer
//! - [`catalog`] - Icon pack discovery on disk
//! - [`switch`] - The themed-icon feature switch refreshed after a selection
//! - [`ui`], [`input`] and [`app`] - The terminal settings surface

// Core modules
pub mod config;
pub mod error;
pub mod store;
pub mod switch;

// Selection state and the picker list
pub mod catalog;
pub mod list;
pub mod selection;

// Terminal surface
pub mod app;
pub mod input;
pub mod ui;

// Re-export commonly used types for convenience
pub use error::{PickerError, Result};

pub use app::Application;
pub use catalog::PackCatalog;
pub use config::Config;
pub use list::{ListDiff, SelectableEntry, SelectableList};
pub use selection::{SavedState, SelectionManager};
pub use store::{InMemoryStore, KeyValueStore, TomlFileStore};
pub use switch::{IconSwitch, StoreSwitch};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
