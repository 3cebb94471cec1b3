use url::Url;

/// File name of the cache entry for `url`: its last non-empty path segment.
///
/// ```
/// use govm_fetch::cache_file_name;
///
/// assert_eq!(
///     cache_file_name("https://go.dev/dl/go1.21.0.linux-amd64.tar.gz").as_deref(),
///     Some("go1.21.0.linux-amd64.tar.gz"),
/// );
/// assert_eq!(cache_file_name("https://go.dev/"), None);
/// ```
pub fn cache_file_name(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let name = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    if name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}

/// `Range` header value asking for everything from `offset` on.
pub fn range_header(offset: u64) -> String { format!("bytes={offset}-") }

/// Statuses the archive transfer accepts: full body or partial content.
pub fn is_accepted_status(status: u16) -> bool { matches!(status, 200 | 206) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_ignores_query_and_trailing_slash() {
        assert_eq!(
            cache_file_name("https://dl.example/go/go1.22.zip?mirror=1").as_deref(),
            Some("go1.22.zip")
        );
        assert_eq!(cache_file_name("https://dl.example/go/go1.22.zip/").as_deref(), Some("go1.22.zip"));
    }

    #[test]
    fn unparsable_url() {
        assert_eq!(cache_file_name("not a url"), None);
    }

    #[test]
    fn range_value() {
        assert_eq!(range_header(1024), "bytes=1024-");
    }

    #[test]
    fn accepted_statuses() {
        assert!(is_accepted_status(200));
        assert!(is_accepted_status(206));
        assert!(!is_accepted_status(204));
        assert!(!is_accepted_status(416));
        assert!(!is_accepted_status(500));
    }
}
