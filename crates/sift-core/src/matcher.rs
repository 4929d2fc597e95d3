//! Matcher: decides which items and groups survive a query.
//!
//! # Semantics
//!
//! - The query is trimmed. An empty query matches every item.
//! - Otherwise it is split on a literal `' '` into terms. Consecutive spaces
//!   yield empty terms, and an empty term is a substring of every id, so
//!   `"red  apple"` behaves like `"red apple"` plus a term that always holds.
//!   [`TermSplit::Collapse`] switches to whitespace-run splitting instead.
//! - An item matches iff **every** term is a case-sensitive substring of its id.
//! - A group matches iff at least one of its items matched. Group membership
//!   is derived from the matched items, never evaluated on its own.

use crate::types::Item;
use std::collections::HashSet;

/// How a trimmed query is broken into terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TermSplit {
    /// Split on every single space; empty terms are kept.
    #[default]
    Literal,
    /// Split on runs of any whitespace; no empty terms.
    Collapse,
}

/// Outcome of one matching pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub items: HashSet<String>,
    pub groups: HashSet<String>,
}

impl MatchResult {
    pub fn is_match(&self, id: &str) -> bool {
        self.items.contains(id)
    }

    pub fn group_visible(&self, key: &str) -> bool {
        self.groups.contains(key)
    }
}

/// Break `query` into terms. An empty or whitespace-only query has no terms.
pub fn terms(query: &str, split: TermSplit) -> Vec<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    match split {
        TermSplit::Literal => query.split(' ').collect(),
        TermSplit::Collapse => query.split_whitespace().collect(),
    }
}

/// True iff every term is contained in `id`. No terms means everything matches.
pub fn matches_all(id: &str, terms: &[&str]) -> bool {
    terms.iter().all(|term| id.contains(term))
}

/// Run the query against `items` with literal term splitting.
pub fn compute_matches<'a, I>(query: &str, items: I) -> MatchResult
where
    I: IntoIterator<Item = &'a Item>,
{
    compute_matches_with(query, items, TermSplit::Literal)
}

pub fn compute_matches_with<'a, I>(query: &str, items: I, split: TermSplit) -> MatchResult
where
    I: IntoIterator<Item = &'a Item>,
{
    let terms = terms(query, split);
    let mut result = MatchResult::default();

    for item in items {
        if matches_all(&item.id, &terms) {
            result.items.insert(item.id.clone());
            result.groups.insert(item.group.clone());
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
