//! Content verification for downloaded archives.
//!
//! The archive is streamed through a [`Hasher`] once; the digest is
//! hex-encoded and compared to the catalog value.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use govm_verify::{Sha256Hasher, VerifiedReader};
//!
//! let mut reader = VerifiedReader::new(&b"hello world"[..], Sha256Hasher::new());
//! let mut sink = Vec::new();
//! reader.read_to_end(&mut sink).unwrap();
//! assert_eq!(
//!     reader.hex_digest(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;
pub use self::verify::{sha256_file, verify_file};

mod error;
mod hasher;
mod reader;
mod verify;
