//! Pure transformations used by the fetcher.
//!
//! Nothing in here touches the network or the filesystem.

mod request;
mod retry;

pub use request::{cache_file_name, is_accepted_status, range_header};
pub use retry::retry_delay;
