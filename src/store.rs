//! External key-value-by-uri store.
//!
//! The selection manager never owns persistence: it talks to a [`KeyValueStore`]
//! addressed by [`StoreUri`]s, one logical row per path. Backends provided here
//! are an in-memory map (tests, ephemeral sessions) and a TOML file (the binary).

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::{KeyValueStore, StoreRow, StoreUri, RESULT_SUCCESS};
pub use file::TomlFileStore;
pub use memory::InMemoryStore;
