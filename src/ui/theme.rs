//! Color theme and styling definitions using ratatui colors

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Screen titles
    pub title: Style,

    /// Secondary text such as pack ids
    pub detail_text: Color,

    /// Radio marker of the selected row
    pub selected_marker: Color,

    /// Row under the cursor
    pub cursor: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Error/warning text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: None,
            title: Style::default().add_modifier(Modifier::BOLD),
            detail_text: Color::DarkGray,
            selected_marker: Color::Green,
            cursor: Style::default().fg(Color::White).bg(Color::Blue),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            title: Style::default().add_modifier(Modifier::BOLD),
            detail_text: Color::White,
            selected_marker: Color::White,
            cursor: Style::default().fg(Color::Black).bg(Color::White),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            title: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            detail_text: Color::LightCyan,
            selected_marker: Color::LightGreen,
            cursor: Style::default().fg(Color::Black).bg(Color::LightYellow),
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
        }
    }

    /// Base style for body text
    pub fn text(&self) -> Style {
        match self.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }
}
