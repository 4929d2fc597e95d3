//! Shared test utilities for sift integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Timing-sensitive helpers assume `tokio::time::pause()`
//! (or `#[tokio::test(start_paused = true)]`).

pub mod assertions;
pub mod builders;
pub mod fakes;
pub mod fixtures;

pub use builders::*;
pub use fakes::*;
pub use fixtures::*;
