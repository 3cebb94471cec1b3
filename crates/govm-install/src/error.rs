use std::io;
use std::path::PathBuf;

use govm_catalog::CatalogError;
use govm_fetch::{FetchError, TransportError};
use govm_verify::VerificationError;
use govm_version::VersionError;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("invalid configuration")]
    Config(#[from] figment::Error),

    #[error("failed to build HTTP client")]
    Client(#[source] TransportError),

    #[error("failed to start async runtime")]
    Runtime(#[source] io::Error),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("failed to load release catalog")]
    Catalog(#[from] CatalogError),

    #[error("failed to download go{version} from {url}")]
    Download {
        version: String,
        url:     String,
        #[source]
        source:  FetchError,
    },

    #[error("integrity check failed for go{version}")]
    Verify {
        version: String,
        #[source]
        source:  VerificationError,
    },

    #[error("failed to extract go{version} into '{}'", dest.display())]
    Extract {
        version: String,
        dest:    PathBuf,
        #[source]
        source:  govm_archive::Error,
    },

    #[error("failed to clean '{}'", path.display())]
    Clean {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InstallError>;
