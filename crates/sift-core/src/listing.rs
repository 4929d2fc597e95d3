//! Listing loader: builds a [`Listing`] from a TOML or JSON file.
//!
//! ```toml
//! [[groups]]
//! key   = "strings"
//! label = "std/strings"
//! items = ["strings.split", "strings.trim"]
//! ```
//!
//! The format is picked from the file extension. Group keys and item ids must
//! be unique across the whole file.

use crate::{
    error::ListingError,
    types::{Group, Item, Listing},
};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};

#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(default)]
    groups: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    key: String,
    label: Option<String>,
    #[serde(default)]
    items: Vec<String>,
}

/// Load a listing file. Format is inferred from the extension.
pub fn load(path: &Path) -> Result<Listing, ListingError> {
    let raw: RawListing = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?
        .try_deserialize()?;
    build(raw)
}

/// Parse a listing from an in-memory string.
pub fn from_str(src: &str, format: config::FileFormat) -> Result<Listing, ListingError> {
    let raw: RawListing = config::Config::builder()
        .add_source(config::File::from_str(src, format))
        .build()?
        .try_deserialize()?;
    build(raw)
}

fn build(raw: RawListing) -> Result<Listing, ListingError> {
    let mut keys = HashSet::new();
    let mut ids = HashSet::new();
    let mut listing = Listing::default();

    for g in raw.groups {
        if g.key.is_empty() {
            return Err(ListingError::EmptyGroupKey);
        }
        if !keys.insert(g.key.clone()) {
            return Err(ListingError::DuplicateGroup(g.key));
        }
        for id in g.items {
            if !ids.insert(id.clone()) {
                return Err(ListingError::DuplicateItem { id, group: g.key });
            }
            listing.items.push(Item::new(id, g.key.clone()));
        }
        let mut group = Group::new(g.key);
        group.label = g.label;
        listing.groups.push(group);
    }

    tracing::debug!(
        groups = listing.groups.len(),
        items = listing.items.len(),
        "listing loaded"
    );
    Ok(listing)
}

/// A small built-in listing used when no file is given.
pub fn demo() -> Listing {
    const GROUPS: &[(&str, &str, &[&str])] = &[
        (
            "strings",
            "std/strings",
            &[
                "strings.split",
                "strings.split-whitespace",
                "strings.trim",
                "strings.trim-start",
                "strings.to-upper",
                "strings.replace",
            ],
        ),
        (
            "lists",
            "std/lists",
            &[
                "lists.map",
                "lists.filter",
                "lists.fold",
                "lists.split-at",
                "lists.reverse",
            ],
        ),
        (
            "files",
            "std/files",
            &[
                "files.read-to-string",
                "files.write",
                "files.copy",
                "files.remove",
            ],
        ),
        (
            "net",
            "std/net",
            &["net.tcp-connect", "net.tcp-listen", "net.udp-bind", "net.resolve"],
        ),
        (
            "time",
            "std/time",
            &["time.now", "time.sleep", "time.format", "time.parse"],
        ),
    ];

    let mut listing = Listing::default();
    for (key, label, items) in GROUPS {
        listing.groups.push(Group::new(*key).with_label(*label));
        listing
            .items
            .extend(items.iter().map(|id| Item::new(*id, *key)));
    }
    listing
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
