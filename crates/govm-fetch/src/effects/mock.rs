use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bytes::Bytes;
use futures_util::stream;

use crate::effects::http::{HttpClient, HttpResponse, TransportError};

const CHUNK: usize = 1024;

/// Scripted answer for one URL.
#[derive(Debug, Clone)]
pub enum MockRoute {
    /// Serve `data`; when `ranges` is set a `Range: bytes=N-` request gets a
    /// 206 with the tail.
    Body { data: Bytes, ranges: bool },
    /// Send the first `after` bytes of a full 200 body, then fail the stream.
    Interrupted { data: Bytes, after: usize },
    /// Answer with a bare status code and empty body.
    Status(u16),
}

/// A request as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url:     String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct MockState {
    routes:   HashMap<String, MockRoute>,
    failures: HashMap<String, u32>,
    delays:   HashMap<String, Duration>,
    requests: Vec<RecordedRequest>,
}

/// In-memory [`HttpClient`] for tests.
///
/// Clones share state, so a test can keep a handle for inspection after
/// moving a clone into a fetcher or catalog. Unknown URLs fail as
/// "connection refused".
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn route(&self, url: impl Into<String>, route: MockRoute) -> &Self {
        self.lock().routes.insert(url.into(), route);
        self
    }

    /// Serve `data` with range support.
    pub fn serve(&self, url: impl Into<String>, data: impl Into<Bytes>) -> &Self {
        self.route(url, MockRoute::Body { data: data.into(), ranges: true })
    }

    /// Serve `data` ignoring any `Range` header.
    pub fn serve_without_ranges(&self, url: impl Into<String>, data: impl Into<Bytes>) -> &Self {
        self.route(url, MockRoute::Body { data: data.into(), ranges: false })
    }

    pub fn status(&self, url: impl Into<String>, status: u16) -> &Self {
        self.route(url, MockRoute::Status(status))
    }

    /// Fail the next `times` requests to `url` before any response.
    pub fn fail_times(&self, url: impl Into<String>, times: u32) -> &Self {
        self.lock().failures.insert(url.into(), times);
        self
    }

    /// Hold every response for `url` back by `delay` (tokio time).
    pub fn delay(&self, url: impl Into<String>, delay: Duration) -> &Self {
        self.lock().delays.insert(url.into(), delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> { self.lock().requests.clone() }

    pub fn request_count(&self, url: &str) -> usize {
        self.lock().requests.iter().filter(|r| r.url == url).count()
    }

    fn respond(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest { url: url.to_string(), headers: headers.to_vec() });

        if let Some(remaining) = state.failures.get_mut(url)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(TransportError::new(format!("connection reset by peer: {url}")));
        }

        let route = state
            .routes
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::new(format!("connection refused: {url}")))?;
        drop(state);

        let offset = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("range"))
            .and_then(|(_, v)| v.strip_prefix("bytes="))
            .and_then(|v| v.strip_suffix('-'))
            .and_then(|v| v.parse::<usize>().ok());

        Ok(match route {
            MockRoute::Status(status) => response(status, Bytes::new(), None),
            MockRoute::Body { data, ranges: true } if offset.is_some_and(|o| o > 0) => {
                let offset = offset.unwrap_or(0);
                if offset >= data.len() {
                    response(416, Bytes::new(), None)
                } else {
                    response(206, data.slice(offset..), None)
                }
            }
            MockRoute::Body { data, .. } => response(200, data, None),
            MockRoute::Interrupted { data, after } => {
                let after = after.min(data.len());
                let len = data.len() as u64;
                response(200, data.slice(..after), Some(len))
            }
        })
    }
}

fn response(status: u16, data: Bytes, interrupted_len: Option<u64>) -> HttpResponse {
    let content_length = Some(interrupted_len.unwrap_or(data.len() as u64));
    let mut chunks: Vec<Result<Bytes, TransportError>> = (0..data.len())
        .step_by(CHUNK)
        .map(|start| Ok(data.slice(start..(start + CHUNK).min(data.len()))))
        .collect();
    if interrupted_len.is_some() {
        chunks.push(Err(TransportError::new("connection closed before message completed")));
    }
    HttpResponse { status, content_length, body: Box::pin(stream::iter(chunks)) }
}

impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        let delay = self.lock().delays.get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.respond(url, headers)
    }
}
