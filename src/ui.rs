//! Terminal UI module with ratatui
//!
//! Trait-based renderer plus the view state it draws from.

pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use ratatui::style::{Color, Style};
pub use renderer::UIRenderer;
pub use state::{RowView, Screen, StatusLine, ViewState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
