use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// A failure below the HTTP layer: DNS, connect, TLS, timeout, reset.
///
/// Carries the rendered error chain of the underlying client error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }

    /// Render `err` and all of its sources into one message.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self(message)
    }

}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl StdError for TransportError {}

const MAX_PREALLOC: u64 = 1 << 20;

/// Response headers plus a streaming body.
pub struct HttpResponse {
    pub status:         u16,
    /// Content-Length of *this* response body, if the server sent one.
    pub content_length: Option<u64>,
    pub body:           BoxStream<'static, Result<Bytes, TransportError>>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    /// Drain the body into memory.
    ///
    /// `content_length` is only a capacity hint and is capped, since the
    /// server controls it.
    pub async fn bytes(mut self) -> Result<Vec<u8>, TransportError> {
        let hint = self.content_length.unwrap_or(0).min(MAX_PREALLOC);
        let mut out = Vec::with_capacity(hint as usize);
        while let Some(chunk) = self.body.next().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status, and `Err` only when no response arrived at all. The fetcher relies
/// on that split to decide what is retryable.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`MockHttpClient`](crate::MockHttpClient): scripted responses for tests
pub trait HttpClient: Send + Sync {
    /// Issue a GET with the given extra headers.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Client without an overall deadline.
        pub fn new() -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .build()
                .map_err(|e| TransportError::from_error(&e))?;
            Ok(Self { client })
        }

        /// Client whose every request (connect, headers and body) must finish
        /// within `timeout`.
        ///
        /// The deadline applies per call to [`HttpClient::get`], so each retry
        /// attempt of the fetcher gets a fresh one. An expired deadline surfaces
        /// as a [`TransportError`] and is retried like any other.
        pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| TransportError::from_error(&e))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, TransportError> {
            let mut request = self.client.get(url);
            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }

            let response = request.send().await.map_err(|e| TransportError::from_error(&e))?;
            let status = response.status().as_u16();
            let content_length = response.content_length();
            let body = response
                .bytes_stream()
                .map(|chunk| chunk.map_err(|e| TransportError::from_error(&e)));

            Ok(HttpResponse { status, content_length, body: Box::pin(body) })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
