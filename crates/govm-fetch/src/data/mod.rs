//! Immutable data types for fetch operations.

pub mod options;
pub mod progress;

pub use options::{Backoff, FetchPhase, RetryPolicy};
pub use progress::{Progress, ProgressCallback};
