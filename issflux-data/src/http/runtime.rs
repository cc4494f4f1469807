//! Run async requests behind a synchronous call.

use std::future::Future;

use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

use super::ClientBuildError;

/// Owns a current-thread runtime reused across calls.
///
/// When called from outside any Tokio runtime the stored runtime drives the
/// future. Inside a multi-threaded runtime the caller's handle is used with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime the stored runtime is used, which can deadlock if
/// the caller's runtime is driving I/O this request depends on.
pub(crate) struct BlockingRuntime {
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRuntime")
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingRuntime {
    pub(crate) fn new() -> Result<Self, ClientBuildError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self { runtime })
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
