// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};
use sift_core::SearchInput;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Clear the search, same as activating a group link
    Clear,
    // Replace the search text and apply it without waiting for the debounce
    Search(String),
    // Change theme
    Theme(String),
    // Toggle the visible/total counters on group rows
    Counts,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim_start()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" | "c" => Ok(Command::Clear),
            // The argument is kept as typed; the matcher does its own trimming.
            "search" | "s" => Ok(Command::Search(rest.to_string())),
            "counts" => Ok(Command::Counts),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Clear => {
            s.summary = s.controller.reset();
            s.tree.clamp_cursor(s.controller.listing());
        }
        Command::Search(text) => {
            s.controller.input_mut().set_value(&text);
            s.summary = s.controller.filter(&text);
            s.tree.clamp_cursor(s.controller.listing());
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name);
        }
        Command::Counts => {
            s.config.ui.show_counts = !s.config.ui.show_counts;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
