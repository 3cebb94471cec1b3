//! Resumable, retrying HTTP downloads into a local archive cache.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and progress types
//! - [`core`] - Pure transformations (retry delays, range headers, cache names)
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Resume**: A partial cache file is continued with a `Range` request
//! - **Retry**: Transport failures are retried per [`RetryPolicy`]; HTTP status
//!   failures are terminal
//! - **Cache hit**: A cache file of the expected size short-circuits the network

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use self::core::{cache_file_name, range_header, retry_delay};
pub use self::data::{Backoff, FetchPhase, Progress, ProgressCallback, RetryPolicy};
pub use self::effects::{
    BoxStream, Fetcher, HttpClient, HttpResponse, MockHttpClient, MockRoute, RecordedRequest,
    TransportError,
};

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestClient;

pub use self::error::{FetchError, Result};
