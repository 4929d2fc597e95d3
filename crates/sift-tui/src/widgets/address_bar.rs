//! Address bar widget: the 1-line location strip at the top of the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Renders the current navigation location, e.g. `/listing?search=red+apple`.
///
/// Keybinding hints (`^c:quit  ?:help`) are right-aligned in the same row.
pub struct AddressBar<'a> {
    location: &'a str,
    theme: &'a Theme,
}

impl<'a> AddressBar<'a> {
    pub fn new(location: &'a str, theme: &'a Theme) -> Self {
        Self { location, theme }
    }
}

impl Widget for AddressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(" ⌂ ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(self.location, self.theme.location),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint = " ^c:quit  ^l:clear  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
