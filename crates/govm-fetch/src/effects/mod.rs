//! I/O operations: the HTTP seam and the fetcher that drives it.

mod fetcher;
mod http;
mod mock;

pub use fetcher::Fetcher;
pub use http::{BoxStream, HttpClient, HttpResponse, TransportError};
pub use mock::{MockHttpClient, MockRoute, RecordedRequest};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
