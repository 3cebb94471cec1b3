//! Error types for govm-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::effects::TransportError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request to {url} failed after {attempts} attempt(s): {source}")]
    Transport {
        url:      String,
        attempts: u32,
        #[source]
        source:   TransportError,
    },

    #[error("transfer from {url} interrupted after {received} bytes: {source}")]
    Interrupted {
        url:      String,
        received: u64,
        #[source]
        source:   TransportError,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("cache file error at '{}': {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// Whether the failure was on the wire rather than a server answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Interrupted { .. })
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
