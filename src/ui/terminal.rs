//! Terminal UI implementation using ratatui
//!
//! Draws the summary and picker screens from a `ViewState`. Holds no selection
//! data of its own.

use crate::error::Result;
use crate::ui::{ColorTheme, RowView, Screen, UIRenderer, ViewState};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn render_summary(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let mut lines = vec![Line::from(Span::styled(
            view_state.summary.clone(),
            theme.text(),
        ))];
        if !view_state.available {
            lines.push(Line::from(Span::styled(
                "Themed icons are not supported on this setup",
                Style::default().fg(theme.error_text),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_picker(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        if view_state.loading && view_state.rows.is_empty() {
            let loading = Paragraph::new("Loading icon packs...").style(theme.text());
            frame.render_widget(loading, area);
            return;
        }

        let offset = view_state.list_offset();
        let lines: Vec<Line> = view_state
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(area.height as usize)
            .map(|(index, row)| Self::row_line(row, index == view_state.cursor, theme))
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn row_line<'a>(row: &'a RowView, under_cursor: bool, theme: &ColorTheme) -> Line<'a> {
        let marker_style = if row.selected {
            Style::default().fg(theme.selected_marker)
        } else {
            theme.text()
        };

        let mut spans = vec![
            Span::styled(row.marker(), marker_style),
            Span::raw(" "),
            Span::styled(row.label.as_str(), theme.text()),
        ];
        if let Some(ref id) = row.detail {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                id.as_str(),
                Style::default().fg(theme.detail_text),
            ));
        }

        let line = Line::from(spans);
        if under_cursor {
            line.style(theme.cursor)
        } else {
            line
        }
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();

                // title, body, status line
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Min(0),
                        Constraint::Length(1),
                    ])
                    .split(size);

                let title = Paragraph::new(view_state.title()).style(theme.title);
                frame.render_widget(title, chunks[0]);

                match view_state.screen {
                    Screen::Summary => Self::render_summary(frame, chunks[1], view_state, theme),
                    Screen::Picker => Self::render_picker(frame, chunks[1], view_state, theme),
                }

                Self::render_status(frame, chunks[2], view_state, theme);
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
