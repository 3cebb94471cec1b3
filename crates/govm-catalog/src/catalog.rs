use std::sync::Arc;
use std::time::{Duration, Instant};

use govm_fetch::{HttpClient, TransportError};
use govm_version::Release;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{CatalogError, Result};

/// Deadline for one catalog request, independent of download timeouts.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Default)]
struct CacheState {
    releases: Option<Arc<Vec<Release>>>,
    expiry:   Option<Instant>,
}

impl CacheState {
    fn fresh(&self, now: Instant) -> Option<Arc<Vec<Release>>> {
        match (&self.releases, self.expiry) {
            (Some(releases), Some(expiry)) if now < expiry => Some(Arc::clone(releases)),
            _ => None,
        }
    }
}

/// The remote list of Go releases, cached for `ttl`.
pub struct ReleaseCatalog<C, K = SystemClock> {
    client:  C,
    api_url: String,
    ttl:     Duration,
    clock:   K,
    state:   RwLock<CacheState>,
}

impl<C: HttpClient> ReleaseCatalog<C> {
    pub fn new(client: C, api_url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            ttl,
            clock: SystemClock,
            state: RwLock::new(CacheState::default()),
        }
    }
}

impl<C: HttpClient, K: Clock> ReleaseCatalog<C, K> {
    /// Measure expiry with `clock` instead of the wall clock.
    pub fn with_clock<K2: Clock>(self, clock: K2) -> ReleaseCatalog<C, K2> {
        ReleaseCatalog {
            client: self.client,
            api_url: self.api_url,
            ttl: self.ttl,
            clock,
            state: self.state,
        }
    }

    /// The release list, from cache while fresh, otherwise from the network.
    ///
    /// Concurrent callers that find the cache stale queue on the write lock;
    /// the first one refreshes and the rest see its result. On any failure
    /// the previous list and expiry stay as they were.
    pub async fn fetch(&self) -> Result<Arc<Vec<Release>>> {
        if let Some(releases) = self.state.read().await.fresh(self.clock.now()) {
            debug!(count = releases.len(), "release catalog cache hit");
            return Ok(releases);
        }

        let mut state = self.state.write().await;
        if let Some(releases) = state.fresh(self.clock.now()) {
            debug!(count = releases.len(), "release catalog refreshed by another caller");
            return Ok(releases);
        }

        let releases = Arc::new(self.request().await.inspect_err(|e| {
            warn!(url = %self.api_url, error = %e, "release catalog refresh failed");
        })?);
        state.releases = Some(Arc::clone(&releases));
        state.expiry = Some(self.clock.now() + self.ttl);

        info!(url = %self.api_url, count = releases.len(), ttl = ?self.ttl, "release catalog refreshed");
        Ok(releases)
    }

    /// Releases from [`fetch`](Self::fetch), optionally only stable ones.
    pub async fn releases_matching(&self, stable_only: bool) -> Result<Vec<Release>> {
        let releases = self.fetch().await?;
        Ok(releases
            .iter()
            .filter(|r| !stable_only || r.stable)
            .cloned()
            .collect())
    }

    /// Last successfully fetched list, expired or not.
    pub async fn cached(&self) -> Option<Arc<Vec<Release>>> { self.state.read().await.releases.clone() }

    /// Drop the cached list so the next `fetch` goes to the network.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = CacheState::default();
        debug!("release catalog cleared");
    }

    async fn request(&self) -> Result<Vec<Release>> {
        let body = tokio::time::timeout(CATALOG_TIMEOUT, self.get_body())
            .await
            .map_err(|_| CatalogError::Transport {
                url:    self.api_url.clone(),
                source: TransportError::new(format!("timed out after {}s", CATALOG_TIMEOUT.as_secs())),
            })??;

        serde_json::from_slice(&body).map_err(|source| CatalogError::Parse { url: self.api_url.clone(), source })
    }

    async fn get_body(&self) -> Result<Vec<u8>> {
        let transport = |source: TransportError| CatalogError::Transport { url: self.api_url.clone(), source };

        let response = self.client.get(&self.api_url, &[]).await.map_err(transport)?;
        if !response.is_success() {
            return Err(CatalogError::HttpStatus { url: self.api_url.clone(), status: response.status });
        }
        response.bytes().await.map_err(transport)
    }
}

#[cfg(test)]
mod tests {
    use govm_fetch::MockHttpClient;

    use super::*;
    use crate::clock::ManualClock;

    const URL: &str = "https://go.example/dl/?mode=json&include=all";
    const TTL: Duration = Duration::from_secs(3600);

    const CATALOG: &str = r#"[
        {"version": "go1.22rc1", "stable": false, "files": []},
        {"version": "go1.21.0", "stable": true, "files": [
            {"filename": "go1.21.0.linux-amd64.tar.gz", "os": "linux", "arch": "amd64",
             "version": "go1.21.0", "sha256": "d0398903a16ba2232b389fb31032ddf57cac34efda306a0eebac34f0965a0742",
             "size": 66641174, "kind": "archive"}
        ]}
    ]"#;

    fn catalog(client: &MockHttpClient, clock: &ManualClock) -> ReleaseCatalog<MockHttpClient, ManualClock> {
        ReleaseCatalog::new(client.clone(), URL, TTL).with_clock(clock.clone())
    }

    #[tokio::test]
    async fn fetch_parses_releases() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG);

        let releases = catalog(&client, &ManualClock::new()).fetch().await.unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[1].version, "go1.21.0");
        assert_eq!(releases[1].files[0].size, 66641174);
    }

    #[tokio::test]
    async fn fresh_cache_skips_network() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG);
        let clock = ManualClock::new();
        let catalog = catalog(&client, &clock);

        catalog.fetch().await.unwrap();
        clock.advance(TTL - Duration::from_secs(1));
        catalog.fetch().await.unwrap();
        assert_eq!(client.request_count(URL), 1);

        clock.advance(Duration::from_secs(1));
        catalog.fetch().await.unwrap();
        assert_eq!(client.request_count(URL), 2);
    }

    #[tokio::test]
    async fn status_error_keeps_stale_list() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG);
        let clock = ManualClock::new();
        let catalog = catalog(&client, &clock);
        let first = catalog.fetch().await.unwrap();

        clock.advance(TTL);
        client.status(URL, 503);
        let err = catalog.fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::HttpStatus { status: 503, .. }));
        assert!(Arc::ptr_eq(&catalog.cached().await.unwrap(), &first));
    }

    #[tokio::test]
    async fn bad_json_is_parse_error() {
        let client = MockHttpClient::new();
        client.serve(URL, "<html>not json</html>");

        let err = catalog(&client, &ManualClock::new()).fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[tokio::test]
    async fn transport_error_is_not_retried() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG).fail_times(URL, 1);
        let catalog = catalog(&client, &ManualClock::new());

        assert!(matches!(catalog.fetch().await, Err(CatalogError::Transport { .. })));
        assert_eq!(client.request_count(URL), 1);
        assert!(catalog.cached().await.is_none());

        catalog.fetch().await.unwrap();
    }

    #[tokio::test]
    async fn clear_forces_refetch() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG);
        let catalog = catalog(&client, &ManualClock::new());

        catalog.fetch().await.unwrap();
        catalog.clear().await;
        catalog.clear().await;
        assert!(catalog.cached().await.is_none());

        catalog.fetch().await.unwrap();
        assert_eq!(client.request_count(URL), 2);
    }

    #[tokio::test]
    async fn stable_filter() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG);
        let catalog = catalog(&client, &ManualClock::new());

        assert_eq!(catalog.releases_matching(false).await.unwrap().len(), 2);
        let stable = catalog.releases_matching(true).await.unwrap();
        assert_eq!(stable.len(), 1);
        assert!(stable[0].stable);
        assert_eq!(client.request_count(URL), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_catalog_times_out() {
        let client = MockHttpClient::new();
        client.serve(URL, CATALOG).delay(URL, CATALOG_TIMEOUT + Duration::from_secs(5));

        let err = catalog(&client, &ManualClock::new()).fetch().await.unwrap_err();

        assert!(matches!(err, CatalogError::Transport { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    /// Answers every request with a 200 whose Content-Length claims far more
    /// than the body holds.
    struct InflatedLength;

    impl HttpClient for InflatedLength {
        async fn get(
            &self,
            _url: &str,
            _headers: &[(String, String)],
        ) -> std::result::Result<govm_fetch::HttpResponse, TransportError> {
            let body = futures_util::stream::iter([Ok(bytes::Bytes::from_static(b"[]"))]);
            Ok(govm_fetch::HttpResponse { status: 200, content_length: Some(u64::MAX / 2), body: Box::pin(body) })
        }
    }

    #[tokio::test]
    async fn inflated_content_length_is_harmless() {
        let catalog = ReleaseCatalog::new(InflatedLength, URL, TTL);

        let releases = catalog.fetch().await.unwrap();

        assert!(releases.is_empty());
    }
}
