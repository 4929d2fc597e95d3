//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event stream and
//! the controller's debounce channel from one task, and tears everything down
//! cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        address_bar::AddressBar,
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        listing_tree::{ListingTree, ListingTreeState, TreeAction},
        query_bar::{QueryBar, QueryBarState},
    },
};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use sift_core::{
    config::Config, Controller, FilterSummary, Listing, MemoryHistory, WiringError,
};
use std::io;

pub type AppController = Controller<QueryBarState, MemoryHistory>;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: AppController,
    pub tree: ListingTreeState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Result of the last filter pass, shown in the query bar.
    pub summary: FilterSummary,
    pub quit: bool,
}

impl AppState {
    /// Wire the controller and run the startup hook.
    pub fn new(listing: Listing, location: &str, config: Config) -> Result<Self, WiringError> {
        let mut controller = Controller::builder()
            .input(QueryBarState::default())
            .listing(listing)
            .history(MemoryHistory::from_location(location))
            .reset_on_every_group()
            .settings(config.search.clone())
            .build()?;

        let summary = controller.on_load();
        let theme = Theme::by_name(&config.ui.theme);

        Ok(Self {
            controller,
            tree: ListingTreeState::default(),
            focus: Focus::QueryBar,
            prev_focus: Focus::QueryBar,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            summary,
            quit: false,
        })
    }

    /// Apply a value handed back by the debounce channel.
    pub fn apply_debounced(&mut self, query: String) {
        self.summary = self.controller.on_debounced(query);
        self.tree.clamp_cursor(self.controller.listing());
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_bar(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::ClearSearch => {
                self.summary = self.controller.reset();
                self.tree.clamp_cursor(self.controller.listing());
            }

            AppEvent::Escape => {
                if self.focus == Focus::QueryBar {
                    tracing::debug!("focus: QueryBar -> Tree");
                    self.focus = Focus::Tree;
                }
            }

            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Tree => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Tree,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                self.focus = Focus::QueryBar;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        execute_command(self, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Tree => {
                let action = self.tree.handle(&event, self.controller.listing());
                if let Some(TreeAction::Activate(key)) = action {
                    if let Some(summary) = self.controller.activate(&key) {
                        self.summary = summary;
                    }
                    self.tree.focus_group(&key, self.controller.listing());
                }
            }
            Focus::QueryBar => {
                if event == AppEvent::Enter {
                    self.focus = Focus::Tree;
                } else if self.controller.input_mut().handle(&event) {
                    self.controller.on_input();
                }
            }
            Focus::Command => {} // handled before dispatch
        }
    }

    pub fn location(&self) -> String {
        self.controller.navigation().history().location()
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub async fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();

        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            tokio::select! {
                maybe = events.next() => match maybe {
                    Some(Ok(raw)) => self.on_terminal_event(raw),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(query) = self.state.controller.next_debounced() => {
                    tracing::debug!(query = %query, "debounced input applied");
                    self.state.apply_debounced(query);
                }
            }
        }
        Ok(())
    }

    fn on_terminal_event(&mut self, raw: Event) {
        if let Event::Key(key) = raw {
            if key.kind != KeyEventKind::Press {
                return;
            }
        }
        // Use insert-mode mapping when a text widget is focused
        let app_event = if is_insert_mode(self.state.focus) {
            event::to_app_event_insert(raw)
        } else {
            event::to_app_event(raw)
        };
        if let Some(ev) = app_event {
            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
            self.state.handle(ev);
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line address bar | listing | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let listing = state.controller.listing();
    let location = state.location();

    frame.render_widget(AddressBar::new(&location, &state.theme), vert[0]);
    frame.render_widget(
        ListingTree::new(
            &state.tree,
            listing,
            state.config.ui.show_counts,
            state.focus == Focus::Tree,
            &state.theme,
        ),
        vert[1],
    );

    let query_bar = QueryBar::new(
        state.controller.input(),
        state.summary,
        listing.items.len(),
        state.focus == Focus::QueryBar,
        &state.theme,
    );
    let cursor = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use sift_core::{Group, Item, SearchInput};
    use std::time::Duration;

    fn listing() -> Listing {
        Listing::new(
            vec![Group::new("fruit"), Group::new("veg")],
            vec![
                Item::new("red-apple", "fruit"),
                Item::new("green-apple", "fruit"),
                Item::new("carrot", "veg"),
            ],
        )
    }

    fn state(location: &str) -> AppState {
        AppState::new(listing(), location, Config::defaults()).unwrap()
    }

    fn type_str(s: &mut AppState, text: &str) {
        for c in text.chars() {
            s.handle(AppEvent::Char(c));
        }
    }

    #[test]
    fn starts_with_focus_on_query_bar() {
        let s = state("/listing");
        assert_eq!(s.focus, Focus::QueryBar);
        assert_eq!(s.summary.matched_items, 3);
    }

    #[test]
    fn restores_search_from_location() {
        let s = state("/listing?search=carrot");
        assert_eq!(s.controller.input().value(), "carrot");
        assert_eq!(s.controller.listing().visible_groups(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_is_debounced_then_applied() {
        let mut s = state("/listing");
        type_str(&mut s, "apple");
        assert_eq!(s.location(), "/listing");
        assert!(s.controller.is_pending());

        let query = s.controller.next_debounced().await.unwrap();
        s.apply_debounced(query);
        assert_eq!(s.summary.matched_items, 2);
        assert_eq!(s.location(), "/listing?search=apple");
    }

    #[tokio::test(start_paused = true)]
    async fn clear_search_cancels_pending_input() {
        let mut s = state("/listing?search=carrot");
        type_str(&mut s, "x");
        s.handle(AppEvent::ClearSearch);
        assert_eq!(s.controller.input().value(), "");
        assert_eq!(s.summary.matched_items, 3);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let stale =
            tokio::time::timeout(Duration::from_millis(10), s.controller.next_debounced()).await;
        assert!(stale.is_err());
    }

    #[test]
    fn enter_on_group_row_resets_the_filter() {
        let mut s = state("/listing?search=carrot");
        s.handle(AppEvent::Escape);
        assert_eq!(s.focus, Focus::Tree);

        // Only the veg group is visible, so the cursor sits on it.
        s.handle(AppEvent::Enter);
        assert_eq!(s.controller.input().value(), "");
        assert_eq!(s.controller.listing().visible_items(), 3);
        assert_eq!(s.location(), "/listing");
        assert_eq!(s.tree.cursor, 3);
    }

    #[test]
    fn command_bar_search_applies_immediately() {
        let mut s = state("/listing");
        s.handle(AppEvent::Escape);
        s.handle(AppEvent::Char(':'));
        assert_eq!(s.focus, Focus::Command);
        type_str(&mut s, "search green");
        s.handle(AppEvent::Enter);

        assert_eq!(s.focus, Focus::Tree);
        assert_eq!(s.controller.input().value(), "green");
        assert_eq!(s.summary.matched_items, 1);
        assert_eq!(s.location(), "/listing?search=green");
    }

    #[tokio::test(start_paused = true)]
    async fn command_bar_search_discards_pending_keystrokes() {
        let mut s = state("/listing");
        type_str(&mut s, "carrot");
        assert!(s.controller.is_pending());

        s.handle(AppEvent::Escape);
        s.handle(AppEvent::Char(':'));
        type_str(&mut s, "search apple");
        s.handle(AppEvent::Enter);
        assert!(!s.controller.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        let stale =
            tokio::time::timeout(Duration::from_millis(10), s.controller.next_debounced()).await;
        assert!(stale.is_err());
        assert_eq!(s.controller.input().value(), "apple");
        assert_eq!(s.controller.listing().visible_items(), 2);
        assert_eq!(s.location(), "/listing?search=apple");
    }

    #[test]
    fn unknown_command_keeps_bar_open_with_error() {
        let mut s = state("/listing");
        s.handle(AppEvent::Escape);
        s.handle(AppEvent::Char(':'));
        type_str(&mut s, "nope");
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Command);
        assert!(s.command_bar.error.is_some());
    }

    #[test]
    fn help_popup_swallows_events() {
        let mut s = state("/listing");
        s.handle(AppEvent::Escape);
        s.handle(AppEvent::Char('?'));
        assert!(s.show_help);
        s.handle(AppEvent::TreeNav(Direction::Down));
        assert_eq!(s.tree.cursor, 0);
        s.handle(AppEvent::Escape);
        assert!(!s.show_help);
    }

    #[tokio::test]
    async fn query_bar_letters_do_not_quit() {
        let mut s = state("/listing");
        s.handle(AppEvent::Char('q'));
        assert!(!s.quit);
        assert_eq!(s.controller.input().value(), "q");
    }
}
