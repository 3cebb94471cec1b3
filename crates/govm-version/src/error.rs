use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version: {0:?}")]
    Invalid(String),

    #[error("release go{version} not found in catalog")]
    ReleaseNotFound { version: String },

    #[error("no archive for go{version} on {os}/{arch}")]
    FileNotFound {
        version: String,
        os:      String,
        arch:    String,
    },
}

pub type Result<T> = std::result::Result<T, VersionError>;
