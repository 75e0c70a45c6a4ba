//! UI state management structures
//!
//! `ViewState` holds what the terminal draws. Picker rows are kept in step with
//! the `SelectableList` by applying its list events: rows the diff leaves alone
//! are carried over, and only dirty rows are rebuilt.

use crate::list::{IconHandle, ListEvent, SelectableEntry, SelectableList};
use std::mem;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Summary,
    Picker,
}

/// One drawn picker row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub label: String,
    /// Pack id shown next to the label; `None` for the sentinel row
    pub detail: Option<String>,
    pub icon: IconHandle,
    pub selected: bool,
}

impl RowView {
    pub fn from_entry(entry: &SelectableEntry, selected: bool) -> Self {
        Self {
            label: entry.label.clone(),
            detail: entry.id.clone(),
            icon: entry.icon.clone(),
            selected,
        }
    }

    /// Radio marker drawn in front of the label
    pub fn marker(&self) -> &'static str {
        if self.selected {
            "(*)"
        } else {
            "( )"
        }
    }
}

#[derive(Debug)]
pub struct ViewState {
    pub screen: Screen,

    /// Summary line shown on the summary screen
    pub summary: String,

    /// Whether themed icons are supported at all
    pub available: bool,

    /// Picker rows, index-aligned with the list entries
    pub rows: Vec<RowView>,

    /// Row under the cursor
    pub cursor: usize,

    /// A catalog scan for the picker is in flight
    pub loading: bool,

    pub status_line: StatusLine,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,

    /// Rows rebuilt by the most recent list event
    pub redrawn: Vec<usize>,
}

impl ViewState {
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            screen: Screen::Summary,
            summary: String::new(),
            available: true,
            rows: Vec::new(),
            cursor: 0,
            loading: false,
            status_line: StatusLine::new(),
            viewport_width,
            viewport_height,
            redrawn: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.screen {
            Screen::Summary => "Themed icon pack",
            Screen::Picker => "Themed icons",
        }
    }

    /// Switch to the picker; rows arrive later through list events
    pub fn open_picker(&mut self) {
        self.screen = Screen::Picker;
        self.rows.clear();
        self.redrawn.clear();
        self.cursor = 0;
        self.loading = true;
        self.status_line.clear_message();
    }

    pub fn close_picker(&mut self) {
        self.screen = Screen::Summary;
        self.rows.clear();
        self.redrawn.clear();
        self.cursor = 0;
        self.loading = false;
    }

    /// Bring `rows` in line with `list` using one of its notifications
    pub fn apply_list_event(&mut self, event: &ListEvent, list: &SelectableList) {
        let entries = list.entries();
        match event {
            ListEvent::Updated(diff) => {
                let first_load = self.rows.is_empty();
                let mut old: Vec<Option<RowView>> =
                    mem::take(&mut self.rows).into_iter().map(Some).collect();
                let mut rows: Vec<Option<RowView>> = vec![None; entries.len()];

                for (from, to) in diff.retained_pairs(old.len(), entries.len()) {
                    rows[to] = old.get_mut(from).and_then(Option::take);
                }
                for moved in &diff.moved {
                    if let Some(slot) = rows.get_mut(moved.to) {
                        *slot = old.get_mut(moved.from).and_then(Option::take);
                    }
                }

                let dirty = diff.dirty_rows();
                self.redrawn.clear();
                self.rows = rows
                    .into_iter()
                    .enumerate()
                    .map(|(index, carried)| match carried {
                        Some(row) if !dirty.contains(&index) => row,
                        _ => {
                            self.redrawn.push(index);
                            RowView::from_entry(&entries[index], list.is_selected(index))
                        }
                    })
                    .collect();

                self.loading = false;
                if first_load {
                    self.cursor = list.selected_index().unwrap_or(0);
                }
                self.clamp_cursor();
            }
            ListEvent::ItemChanged(index) => {
                let index = *index;
                if let (Some(row), Some(entry)) = (self.rows.get_mut(index), entries.get(index)) {
                    *row = RowView::from_entry(entry, list.is_selected(index));
                    self.redrawn = vec![index];
                }
            }
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.rows.len() {
            self.cursor_last();
        }
    }

    /// Rows that fit between the title and the status line
    pub fn rows_per_page(&self) -> usize {
        self.viewport_height.saturating_sub(2).max(1) as usize
    }

    /// First row to draw so that the cursor stays visible
    pub fn list_offset(&self) -> usize {
        let page = self.rows_per_page();
        (self.cursor + 1).saturating_sub(page)
    }

    /// Update terminal dimensions; returns true if they actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    pub fn format_status_line(&self) -> String {
        self.status_line.format_status_line(self.screen, self.available)
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Message if one is set, otherwise the key hints for `screen`
    pub fn format_status_line(&self, screen: Screen, available: bool) -> String {
        if let Some(ref message) = self.message {
            return message.clone();
        }
        match (screen, available) {
            (Screen::Summary, true) => "Enter: change | q: quit".to_string(),
            (Screen::Summary, false) => "Themed icons are not supported | q: quit".to_string(),
            (Screen::Picker, _) => "j/k: move | Enter: select | Esc: back | q: quit".to_string(),
        }
    }
}
