//! UI renderer trait
//!
//! Input arrives on its own thread (see `crate::input`), so a renderer only
//! draws and manages the terminal.

use crate::error::Result;
use crate::ui::ViewState;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw the current view state
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal dimensions as (width, height)
    fn get_terminal_size(&self) -> Result<(u16, u16)>;
}
