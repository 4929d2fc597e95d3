//! Error types for sift-core.
//!
//! Matching and visibility have no failure modes. Errors only arise when the
//! controller is wired up, when a listing is loaded, and at the navigation
//! boundary (where they are logged and swallowed).

use thiserror::Error;

/// The controller was built with a missing or dangling collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WiringError {
    #[error("no search input was provided to the controller")]
    MissingInput,

    #[error("no listing was provided to the controller")]
    MissingListing,

    #[error("no navigation history was provided to the controller")]
    MissingHistory,

    #[error("reset trigger {0:?} does not name a group in the listing")]
    UnknownResetTrigger(String),
}

/// A navigation location could not be read or written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("malformed location: {0}")]
    Malformed(String),

    #[error("history rejected the update: {0}")]
    Rejected(String),
}

/// A listing file could not be turned into a [`Listing`](crate::Listing).
#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("group key must not be empty")]
    EmptyGroupKey,

    #[error("duplicate group key {0:?}")]
    DuplicateGroup(String),

    #[error("duplicate item id {id:?} (in group {group:?})")]
    DuplicateItem { id: String, group: String },
}
