use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::core::{cache_file_name, is_accepted_status, range_header};
use crate::data::{FetchPhase, Progress, ProgressCallback, RetryPolicy};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::error::{FetchError, Result};

/// Downloads archives into a shared cache directory, resuming partial files.
///
/// The cache path depends only on the URL's file name, so two concurrent
/// downloads of the same artifact write to the same file. Callers that need
/// isolation must serialize installs of the same version themselves.
pub struct Fetcher<C: HttpClient> {
    client:      C,
    cache_dir:   PathBuf,
    retry:       RetryPolicy,
    on_progress: Option<ProgressCallback>,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
            retry: RetryPolicy::default(),
            on_progress: None,
        }
    }

    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn cache_dir(&self) -> &Path { &self.cache_dir }

    /// Where `url` is cached.
    pub fn cache_path(&self, url: &str) -> Result<PathBuf> {
        let name = cache_file_name(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        Ok(self.cache_dir.join(name))
    }

    /// Download `url` into the cache and return the cache file path.
    ///
    /// A cache file whose size equals `expected_size` is returned without any
    /// request. A shorter one is continued with a `Range` request. The file
    /// is left in place on failure so a later call can resume it; deleting it
    /// after use is the caller's job.
    pub async fn download(&self, url: &str, expected_size: u64) -> Result<PathBuf> {
        let cache_path = self.cache_path(url)?;
        let io_err = |source: std::io::Error| FetchError::Io { path: cache_path.clone(), source };

        if let Ok(meta) = fs::metadata(&cache_path).await
            && meta.len() == expected_size
        {
            debug!(path = %cache_path.display(), size = expected_size, "cache hit");
            self.report(FetchPhase::Completed, expected_size, Some(expected_size), 0);
            return Ok(cache_path);
        }

        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|source| FetchError::Io { path: self.cache_dir.clone(), source })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cache_path)
            .await
            .map_err(io_err)?;
        let mut offset = file.metadata().await.map_err(io_err)?.len();

        if offset > expected_size {
            warn!(
                path = %cache_path.display(),
                size = offset,
                expected = expected_size,
                "cache file larger than expected, starting over"
            );
            file.set_len(0).await.map_err(io_err)?;
            offset = 0;
        }

        let headers = if offset > 0 {
            debug!(url, offset, "resuming partial download");
            vec![("Range".to_string(), range_header(offset))]
        } else {
            Vec::new()
        };

        let response = self.send(url, &headers).await?;

        let total = match response.status {
            206 => offset + response.content_length.unwrap_or(expected_size.saturating_sub(offset)),
            _ => {
                if offset > 0 {
                    warn!(url, offset, "server ignored range request, restarting from zero");
                    file.set_len(0).await.map_err(io_err)?;
                    offset = 0;
                }
                expected_size
            }
        };

        let mut received = offset;
        let mut body = response.body;
        self.report(FetchPhase::Downloading, received, Some(total), 0);

        let mut failure = None;
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(source) => {
                    failure = Some(FetchError::Interrupted { url: url.to_string(), received, source });
                    break;
                }
            };
            if let Err(source) = file.write_all(&chunk).await {
                failure = Some(io_err(source));
                break;
            }
            received += chunk.len() as u64;
            self.report(FetchPhase::Downloading, received, Some(total), 0);
        }

        // The partial file must be on disk before an error reaches the caller.
        let flushed = file.flush().await.map_err(io_err);
        if let Some(err) = failure {
            if let Err(flush_err) = flushed {
                warn!(path = %cache_path.display(), error = %flush_err, "failed to flush partial download");
            }
            return Err(err);
        }
        flushed?;

        if received != expected_size {
            warn!(url, received, expected = expected_size, "downloaded size differs from catalog");
        }
        self.report(FetchPhase::Completed, received, Some(total), 0);
        debug!(url, path = %cache_path.display(), bytes = received, "download finished");

        Ok(cache_path)
    }

    /// Send the request, retrying transport failures per the retry policy.
    ///
    /// Any response that arrives is final: 200 and 206 are returned, every
    /// other status is an error without further attempts.
    async fn send(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse> {
        let attempts = self.retry.attempts();
        let mut attempt = 0;

        loop {
            self.report(FetchPhase::Connecting, 0, None, attempt);
            attempt += 1;

            match self.client.get(url, headers).await {
                Ok(response) if is_accepted_status(response.status) => return Ok(response),
                Ok(response) => {
                    return Err(FetchError::HttpStatus { url: url.to_string(), status: response.status });
                }
                Err(source) if attempt < attempts => {
                    let delay = self.retry.delay(attempt - 1);
                    warn!(url, attempt, max = attempts, ?delay, error = %source, "request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(source) => {
                    return Err(FetchError::Transport { url: url.to_string(), attempts: attempt, source });
                }
            }
        }
    }

    fn report(&self, phase: FetchPhase, bytes_downloaded: u64, total_bytes: Option<u64>, retry_count: u32) {
        if let Some(ref callback) = self.on_progress {
            callback(&Progress { phase, bytes_downloaded, total_bytes, retry_count });
        }
    }
}
