//! Input subsystem.
//!
//! Modules outside this crate should prefer importing from `crate::input`
//! rather than reaching into submodules.

pub mod service;

pub use service::{map_event, map_key_event, spawn_input_thread, InputAction, InputService};
