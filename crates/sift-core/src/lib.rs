//! sift-core: filter pipeline for grouped listings.
//!
//! This crate exposes the pipeline stages as public modules, plus the shared
//! listing types they operate on.
//!
//! # Architecture
//!
//! ```text
//! input ──► Debouncer ──► Matcher ──► VisibilityApplier
//!                            │
//!                            └──────► NavigationSync (?search=)
//! ```
//!
//! The [`controller::Controller`] owns the input, listing and history
//! collaborators and drives the stages from a single event-loop task. The
//! only suspension point is the debounce timer.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod listing;
pub mod matcher;
pub mod navigation;
pub mod types;
pub mod visibility;

pub use controller::{Controller, ControllerBuilder, FilterSummary, SearchInput};
pub use error::{ListingError, NavigationError, WiringError};
pub use matcher::{compute_matches, MatchResult, TermSplit};
pub use navigation::{History, MemoryHistory, NavigationSync};
pub use types::{Group, Item, Listing};
