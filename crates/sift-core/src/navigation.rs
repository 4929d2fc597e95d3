//! Navigation sync: keeps `?search=<query>` in step with the active filter.
//!
//! The query portion of the location is replaced wholesale: a non-empty
//! search writes exactly `search=<value>`, an empty one writes nothing.
//! Unrelated parameters are not preserved. Writes replace the current entry
//! rather than adding a back/forward step.
//!
//! Failures at this boundary never reach the filter pipeline. They are logged
//! and read back as "no search term".

use crate::error::NavigationError;
use url::form_urlencoded;

/// Parameter name used when none is configured.
pub const DEFAULT_PARAM: &str = "search";

/// The navigation collaborator: the current location's query string.
///
/// Query strings are exchanged without the leading `?`.
pub trait History {
    fn current_query(&self) -> Result<String, NavigationError>;

    /// Replace the current entry's query without adding a history entry.
    fn replace_query(&mut self, query: &str) -> Result<(), NavigationError>;
}

// ---------------------------------------------------------------------------
// In-memory history
// ---------------------------------------------------------------------------

/// A single-entry history living in process memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    path: String,
    query: String,
    replacements: usize,
}

impl MemoryHistory {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Seed from a location such as `/listing?search=abc` or `?search=abc`.
    /// Any `#fragment` is dropped.
    pub fn from_location(location: &str) -> Self {
        let location = location.split_once('#').map_or(location, |(head, _)| head);
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        Self {
            path: path.to_string(),
            query: query.to_string(),
            replacements: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of `replace_query` calls since construction.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// The location as it would appear in an address bar.
    pub fn location(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl History for MemoryHistory {
    fn current_query(&self) -> Result<String, NavigationError> {
        Ok(self.query.clone())
    }

    fn replace_query(&mut self, query: &str) -> Result<(), NavigationError> {
        if query.contains('#') {
            return Err(NavigationError::Rejected(format!(
                "query must not contain a fragment: {query:?}"
            )));
        }
        self.query = query.to_string();
        self.replacements += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NavigationSync
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct NavigationSync<H> {
    history: H,
    param: String,
}

impl<H: History> NavigationSync<H> {
    pub fn new(history: H) -> Self {
        Self::with_param(history, DEFAULT_PARAM)
    }

    pub fn with_param(history: H, param: impl Into<String>) -> Self {
        Self {
            history,
            param: param.into(),
        }
    }

    /// Write `raw` into the location. Whitespace-only clears the query. The
    /// stored value is `raw` as typed, not the trimmed form.
    pub fn push_search_state(&mut self, raw: &str) {
        let query = if raw.trim().is_empty() {
            String::new()
        } else {
            form_urlencoded::Serializer::new(String::new())
                .append_pair(&self.param, raw)
                .finish()
        };

        match self.history.replace_query(&query) {
            Ok(()) => tracing::debug!(query = %query, "navigation: location replaced"),
            Err(err) => tracing::warn!(error = %err, "navigation: could not replace location"),
        }
    }

    /// The current search parameter, if the location carries one.
    pub fn read_search_state(&self) -> Option<String> {
        let query = match self.history.current_query() {
            Ok(q) => q,
            Err(err) => {
                tracing::warn!(error = %err, "navigation: could not read location");
                return None;
            }
        };
        let query = query.strip_prefix('?').unwrap_or(&query);

        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == self.param.as_str())
            .map(|(_, value)| value.into_owned())
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
