//! Fake collaborators for the controller: a recording input and a history
//! with injectable failures.

use sift_core::{History, NavigationError, SearchInput};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// FakeInput
// ---------------------------------------------------------------------------

/// A text input that remembers every value written by the controller.
#[derive(Debug, Default)]
pub struct FakeInput {
    value: String,
    pub writes: Vec<String>,
}

impl FakeInput {
    /// Simulate the user typing: replace the text without recording a write.
    pub fn type_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

impl SearchInput for FakeInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.writes.push(value.to_string());
    }
}

// ---------------------------------------------------------------------------
// FakeHistory
// ---------------------------------------------------------------------------

/// What the fake history should do on the next calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub reads: bool,
    pub writes: bool,
}

/// A history whose state is shared with the test through an `Arc`, so
/// failures can be toggled after the controller took ownership.
#[derive(Debug, Clone, Default)]
pub struct FakeHistory {
    inner: Arc<Mutex<FakeHistoryState>>,
}

#[derive(Debug, Default)]
struct FakeHistoryState {
    query: String,
    writes: Vec<String>,
    failures: Failures,
}

impl FakeHistory {
    pub fn with_query(query: &str) -> Self {
        let h = Self::default();
        h.inner.lock().unwrap().query = query.to_string();
        h
    }

    pub fn fail(&self, failures: Failures) {
        self.inner.lock().unwrap().failures = failures;
    }

    pub fn query(&self) -> String {
        self.inner.lock().unwrap().query.clone()
    }

    /// Every successfully written query string, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.inner.lock().unwrap().writes.clone()
    }
}

impl History for FakeHistory {
    fn current_query(&self) -> Result<String, NavigationError> {
        let state = self.inner.lock().unwrap();
        if state.failures.reads {
            return Err(NavigationError::Malformed("injected read failure".into()));
        }
        Ok(state.query.clone())
    }

    fn replace_query(&mut self, query: &str) -> Result<(), NavigationError> {
        let mut state = self.inner.lock().unwrap();
        if state.failures.writes {
            return Err(NavigationError::Rejected("injected write failure".into()));
        }
        state.query = query.to_string();
        state.writes.push(query.to_string());
        Ok(())
    }
}
