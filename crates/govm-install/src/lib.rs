//! Resolve, download, verify, and extract Go toolchains.
//!
//! [`Installer`] drives the stages in order: catalog lookup, file selection,
//! resumable download, SHA-256 verification, extraction. Any failing stage
//! aborts the install. A cached archive is deleted only after a successful
//! extraction, so a failed attempt can be resumed.

pub use self::config::Config;
pub use self::error::{InstallError, Result};
pub use self::pipeline::Installer;
pub use self::platform::Platform;
pub use govm_fetch::ReqwestClient;

mod config;
mod error;
mod pipeline;
mod platform;
mod runtime;
