//! Query bar widget: the search input at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `TreeNav(Left)` / `TreeNav(Right)` move the cursor.
//!
//! The state doubles as the controller's [`SearchInput`]; every edit that
//! changes the text must be followed by `Controller::on_input`.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use sift_core::{FilterSummary, SearchInput};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The search text typed by the user.
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Handle a key event from the app shell. Returns `true` when the text
    /// changed (cursor movement alone does not count).
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::TreeNav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.prev_boundary();
                }
                false
            }
            AppEvent::TreeNav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

impl SearchInput for QueryBarState {
    fn value(&self) -> String {
        self.query.clone()
    }

    /// Replace the text and park the cursor at the end.
    fn set_value(&mut self, value: &str) {
        self.query = value.to_string();
        self.cursor = self.query.len();
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    summary: FilterSummary,
    total: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        state: &'a QueryBarState,
        summary: FilterSummary,
        total: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, summary, total, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Search").border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: query text (fill) | match counter (fixed width)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(22)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let counter = format!(
            "{}/{} items, {} terms",
            self.summary.matched_items, self.total, self.summary.terms
        );
        Paragraph::new(Line::from(Span::styled(counter, self.theme.counts)))
            .right_aligned()
            .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> QueryBarState {
        let mut s = QueryBarState::default();
        for c in text.chars() {
            s.handle(&AppEvent::Char(c));
        }
        s
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut s = typed("rd");
        s.handle(&AppEvent::TreeNav(Direction::Left));
        assert!(s.handle(&AppEvent::Char('e')));
        assert_eq!(s.query, "red");
    }

    #[test]
    fn backspace_handles_multibyte_chars() {
        let mut s = typed("né");
        assert!(s.handle(&AppEvent::Backspace));
        assert_eq!(s.query, "n");
        assert_eq!(s.cursor, 1);
    }

    #[test]
    fn backspace_at_start_is_not_a_change() {
        let mut s = QueryBarState::default();
        assert!(!s.handle(&AppEvent::Backspace));
    }

    #[test]
    fn cursor_moves_are_not_changes() {
        let mut s = typed("ab");
        assert!(!s.handle(&AppEvent::TreeNav(Direction::Left)));
        assert!(!s.handle(&AppEvent::TreeNav(Direction::Right)));
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn set_value_parks_cursor_at_end() {
        let mut s = typed("abc");
        s.set_value("xy");
        assert_eq!(s.value(), "xy");
        assert_eq!(s.cursor, 2);
        s.set_value("");
        assert_eq!(s.cursor, 0);
    }
}
