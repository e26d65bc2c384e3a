//! Runtime utilities that abstract over the underlying async executor.
//!
//! Host implementations never reach for Tokio directly; they ask this module
//! for the ambient runtime so that a missing executor can be reported as an
//! error instead of a panic.

pub use tokio::runtime::{Builder, Handle, Runtime};
pub use tokio::task::JoinHandle;

use std::future::Future;

/// Runs the provided future to completion on a fresh current-thread runtime.
///
/// Intended for synchronous entry points (tests, logging sinks invoked outside
/// an executor). Panics if the runtime cannot be created, mirroring
/// `tokio::runtime::Runtime::new`.
pub fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("platform_async::runtime::block_on: failed to build Tokio runtime")
        .block_on(future)
}

/// Spawns `future` on the runtime the caller is currently inside.
///
/// Returns `None` when called outside a Tokio runtime; the future is dropped
/// without being polled in that case.
pub fn spawn_on_current<F>(future: F) -> Option<JoinHandle<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    Handle::try_current()
        .ok()
        .map(|handle| handle.spawn(future))
}
