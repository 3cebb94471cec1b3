use govm_fetch::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to reach release catalog at {url}: {source}")]
    Transport {
        url:    String,
        #[source]
        source: TransportError,
    },

    #[error("release catalog at {url} answered with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("malformed release catalog from {url}: {source}")]
    Parse {
        url:    String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
