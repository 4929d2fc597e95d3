//! Listing tree widget: groups and their items in the main pane.
//!
//! Only nodes the filter left visible are shown. Each group row acts as a
//! link: activating it clears the search and lands the cursor on that group.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible rows.
//! - `→`/`l` expands the group under the cursor; `←`/`h` collapses it (or,
//!   on an item row, jumps to its group).
//! - `Enter` on a group row activates its link.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};
use sift_core::{Group, Item, Listing};
use std::collections::HashSet;

/// One rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Group(&'a Group),
    Item(&'a Item),
}

/// Something the tree asks the app shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeAction {
    /// The link on this group row was activated.
    Activate(String),
}

// ---------------------------------------------------------------------------
// Tree state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ListingTreeState {
    /// Keys of collapsed groups. Groups are expanded unless listed here.
    pub collapsed: HashSet<String>,
    /// Index into the currently-visible rows.
    pub cursor: usize,
}

impl ListingTreeState {
    /// Flatten the visible part of `listing`, respecting collapsed groups.
    pub fn rows<'a>(&self, listing: &'a Listing) -> Vec<Row<'a>> {
        let mut out = Vec::new();
        for group in listing.groups.iter().filter(|g| g.is_visible()) {
            out.push(Row::Group(group));
            if !self.collapsed.contains(&group.key) {
                out.extend(
                    listing
                        .items_in(&group.key)
                        .filter(|i| i.is_visible())
                        .map(Row::Item),
                );
            }
        }
        out
    }

    fn cursor_row<'a>(&self, listing: &'a Listing) -> Option<Row<'a>> {
        self.rows(listing).get(self.cursor).copied()
    }

    /// Handle an [`AppEvent`] against the current listing.
    pub fn handle(&mut self, event: &AppEvent, listing: &Listing) -> Option<TreeAction> {
        match event {
            AppEvent::TreeNav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "tree: cursor up");
            }
            AppEvent::TreeNav(Direction::Down) => {
                let max = self.rows(listing).len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "tree: cursor down");
            }
            AppEvent::TreeNav(Direction::Right) => {
                if let Some(Row::Group(g)) = self.cursor_row(listing) {
                    tracing::debug!(group = %g.key, "tree: expand");
                    self.collapsed.remove(&g.key);
                }
            }
            AppEvent::TreeNav(Direction::Left) => match self.cursor_row(listing) {
                Some(Row::Group(g)) => {
                    tracing::debug!(group = %g.key, "tree: collapse");
                    self.collapsed.insert(g.key.clone());
                    self.clamp_cursor(listing);
                }
                Some(Row::Item(i)) => {
                    let key = i.group.clone();
                    self.focus_group(&key, listing);
                }
                None => {}
            },
            AppEvent::Enter => {
                if let Some(Row::Group(g)) = self.cursor_row(listing) {
                    tracing::debug!(group = %g.key, "tree: activate link");
                    return Some(TreeAction::Activate(g.key.clone()));
                }
            }
            _ => {}
        }
        None
    }

    /// Move the cursor onto the row of group `key`, expanding it.
    pub fn focus_group(&mut self, key: &str, listing: &Listing) {
        self.collapsed.remove(key);
        if let Some(idx) = self
            .rows(listing)
            .iter()
            .position(|r| matches!(r, Row::Group(g) if g.key == key))
        {
            self.cursor = idx;
        }
    }

    /// Keep the cursor inside the visible rows after the listing changed.
    pub fn clamp_cursor(&mut self, listing: &Listing) {
        let max = self.rows(listing).len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ListingTree<'a> {
    state: &'a ListingTreeState,
    listing: &'a Listing,
    show_counts: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ListingTree<'a> {
    pub fn new(
        state: &'a ListingTreeState,
        listing: &'a Listing,
        show_counts: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            listing,
            show_counts,
            focused,
            theme,
        }
    }

    fn group_line(&self, group: &Group) -> Line<'a> {
        let expand = if self.state.collapsed.contains(&group.key) {
            "▶ "
        } else {
            "▼ "
        };
        let mut spans = vec![
            Span::raw(expand),
            Span::styled(group.display_label().to_string(), self.theme.group_style(&group.key)),
        ];
        if self.show_counts {
            let total = self.listing.items_in(&group.key).count();
            let visible = self
                .listing
                .items_in(&group.key)
                .filter(|i| i.is_visible())
                .count();
            spans.push(Span::styled(format!("  {visible}/{total}"), self.theme.counts));
        }
        Line::from(spans)
    }

    fn item_line(&self, item: &Item, searching: bool) -> Line<'a> {
        let style = if searching && item.matched {
            self.theme.matched
        } else {
            self.theme.item
        };
        Line::from(vec![Span::raw("    "), Span::styled(item.id.clone(), style)])
    }
}

impl Widget for ListingTree<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Listing").border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        // Every item is tagged as a match when the search is empty; only
        // highlight when something is actually filtered out.
        let searching = self.listing.visible_items() < self.listing.items.len();

        let items: Vec<ListItem> = self
            .state
            .rows(self.listing)
            .into_iter()
            .map(|row| match row {
                Row::Group(g) => ListItem::new(self.group_line(g)),
                Row::Item(i) => ListItem::new(self.item_line(i, searching)),
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
