use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, VerificationError};
use crate::hasher::Sha256Hasher;
use crate::reader::VerifiedReader;

/// Stream `path` through SHA-256 and return the lowercase hex digest.
pub fn sha256_file(path: &Path) -> Result<String> {
    let io_err = |source: io::Error| VerificationError::Io { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(io_err)?;
    let mut reader = VerifiedReader::new(io::BufReader::new(file), Sha256Hasher::new());
    io::copy(&mut reader, &mut io::sink()).map_err(io_err)?;
    Ok(reader.hex_digest())
}

/// Check that the SHA-256 of `path` equals `expected_hex`.
///
/// The comparison is case-sensitive. A mismatch is never retried here.
pub fn verify_file(path: &Path, expected_hex: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if actual != expected_hex {
        return Err(VerificationError::Mismatch {
            path: path.to_path_buf(),
            expected: expected_hex.to_string(),
            actual,
        });
    }
    debug!(path = %path.display(), "checksum ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HELLO: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn matching_file_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("go.tar.gz");
        fs::write(&path, b"hello world").unwrap();

        verify_file(&path, HELLO).unwrap();
    }

    #[test]
    fn single_flipped_byte_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("go.tar.gz");
        fs::write(&path, b"hello worle").unwrap();

        let err = verify_file(&path, HELLO).unwrap_err();
        match err {
            VerificationError::Mismatch { expected, actual, .. } => {
                assert_eq!(expected, HELLO);
                assert_ne!(actual, HELLO);
                assert_eq!(actual.len(), 64);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("go.tar.gz");
        fs::write(&path, b"hello world").unwrap();

        let err = verify_file(&path, &HELLO.to_uppercase()).unwrap_err();
        assert!(matches!(err, VerificationError::Mismatch { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = verify_file(&dir.path().join("absent"), HELLO).unwrap_err();
        assert!(matches!(err, VerificationError::Io { .. }));
    }
}
