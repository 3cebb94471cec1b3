use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("checksum mismatch for '{}': expected {expected}, got {actual}", path.display())]
    Mismatch {
        path:     PathBuf,
        expected: String,
        actual:   String,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, VerificationError>;
