//! Debouncer: collapses bursts of calls into one deferred invocation.
//!
//! Each [`Debouncer::call`] aborts the pending timer (if any) and spawns a new
//! tokio task that sleeps for the configured delay before invoking the
//! callback with the arguments of that call. Only the last call of a burst
//! ever reaches the callback.
//!
//! A `Debouncer` must be called from inside a tokio runtime. Dropping it
//! aborts whatever is still pending.

use std::{fmt, sync::Arc, time::Duration};
use tokio::task::JoinHandle;

/// Quiet period used when no explicit delay is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(30);

/// Wrap `callback` so rapid successive calls collapse into one.
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debouncer<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debouncer::new(callback, delay)
}

pub struct Debouncer<A> {
    callback: Arc<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F>(callback: F, delay: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            delay,
            pending: None,
        }
    }

    /// Schedule `callback(args)` after the quiet period, superseding any
    /// invocation that has not run yet.
    pub fn call(&mut self, args: A) {
        if let Some(prev) = self.pending.take() {
            if !prev.is_finished() {
                tracing::trace!("debounce: superseding pending call");
            }
            prev.abort();
        }

        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    /// True while a scheduled invocation has not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Drop the pending invocation without scheduling a new one.
    pub(crate) fn cancel(&mut self) {
        if let Some(prev) = self.pending.take() {
            prev.abort();
        }
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
