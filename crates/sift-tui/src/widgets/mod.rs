//! Ratatui widgets for the sift TUI.

pub mod address_bar;
pub mod command_bar;
pub mod help;
pub mod listing_tree;
pub mod query_bar;
