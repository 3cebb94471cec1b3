//! TTL-cached Go release catalog.
//!
//! A [`ReleaseCatalog`] owns its cache and lock. Reads of a fresh list share
//! a read lock; a refresh holds the write lock for the request and the swap.
//! Expiry is measured with an injectable [`Clock`].

pub use self::catalog::{CATALOG_TIMEOUT, ReleaseCatalog};
pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::error::{CatalogError, Result};

mod catalog;
mod clock;
mod error;
