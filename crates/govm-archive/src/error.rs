use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("unsafe path in archive: entry '{entry}' escapes the install directory")]
    UnsafePath { entry: String },

    #[error("archive is corrupted: {0}")]
    Corrupted(String),

    #[error("failed to extract '{}': {source}", path.display())]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {}: {source}", path.display())]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
