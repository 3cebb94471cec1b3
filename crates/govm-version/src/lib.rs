//! Go version parsing, ordering, and release file selection.
//!
//! Version strings arrive in several spellings (`go1.21.0`, `v1.21.0`,
//! `1.21rc2`). Every comparison goes through [`normalize`] first, then
//! [`parse`] into a [`ParsedVersion`].
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use govm_version::compare;
//!
//! assert_eq!(compare("go1.21.0", "1.21.0-rc1"), Ordering::Greater);
//! assert_eq!(compare("v1.20", "go1.20.0"), Ordering::Equal);
//! ```

pub use self::error::{Result, VersionError};
pub use self::release::{File, FileKind, Release};
pub use self::select::{resolve_arch, select_file};
pub use self::version::{
    ParsedVersion, compare, compare_prerelease, is_valid_version, normalize, parse,
    prerelease_rank, try_parse,
};

mod error;
mod release;
mod select;
mod version;
