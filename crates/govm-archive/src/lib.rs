//! Go toolchain archive extraction with path sanitization.
//!
//! # Architecture
//!
//! - `format.rs` - Archive kind resolved from the file name
//! - `sanitize.rs` - Entry name mapping (prefix strip, traversal guard)
//! - `extract/` - Per-format implementations

pub use self::error::{Error, Result};
pub use self::extract::{ExtractReport, extract};
pub use self::format::ArchiveKind;
pub use self::sanitize::sanitize_entry;

mod error;
mod extract;
mod format;
mod sanitize;
