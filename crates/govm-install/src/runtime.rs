use std::future::Future;
use std::io;

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

use crate::error::{InstallError, Result};

static POOL: Lazy<io::Result<Runtime>> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("govm-worker")
        .enable_all()
        .build()
});

/// Run `future` to completion on the shared runtime.
///
/// Must not be called from inside another Tokio runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    match &*POOL {
        Ok(runtime) => Ok(runtime.block_on(future)),
        Err(e) => Err(InstallError::Runtime(io::Error::new(e.kind(), e.to_string()))),
    }
}

/// Run blocking filesystem work off the async worker threads.
pub(crate) async fn spawn_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| InstallError::Runtime(io::Error::other(e)))
}
