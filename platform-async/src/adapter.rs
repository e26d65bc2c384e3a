//! Callback-to-future adaptation.
//!
//! A wrapped operation is any function whose final parameter is a
//! [`Completion`]. The completion follows the `(error, ...values)` callback
//! convention expressed as `Result<T, E>`: `Ok(values)` carries the ordered
//! success tuple, `Err(error)` carries the failure.
//!
//! [`wrap`] turns such a function into one returning an [`AsyncOperation`].
//! Every failure path surfaces through that future:
//!
//! - the operation completes with `Err(e)` → the future rejects with `e`
//! - the operation returns `Err(e)` before completing → rejects with `e`
//! - the operation panics → rejects with [`AdapterFault::Panicked`]
//! - every completion handle is dropped unsettled → rejects with
//!   [`AdapterFault::Abandoned`]
//!
//! Nothing escapes the wrapped call site, and the caller is never left with a
//! future that can stay pending after the operation has given up.

use futures::channel::oneshot;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tracing::{debug, warn};

use crate::error::AdapterFault;

/// Completion handle passed as the final argument to a wrapped operation.
///
/// Handles are cheap to clone so an operation can hand one to whatever host
/// primitive eventually finishes the work. Only the first invocation settles
/// the future; later invocations are ignored.
pub struct Completion<T, E> {
    slot: Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>,
}

impl<T, E> Clone for Completion<T, E> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T, E> fmt::Debug for Completion<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T, E> Completion<T, E> {
    /// Settle the operation with `result`.
    ///
    /// Returns `true` if this call settled the future, `false` if it had
    /// already been settled by an earlier invocation.
    pub fn complete(&self, result: Result<T, E>) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(sender) => {
                // A dropped receiver only means the caller stopped listening.
                let _ = sender.send(result);
                true
            }
            None => {
                debug!("Completion invoked after settlement; ignoring");
                false
            }
        }
    }

    /// Settle with the success values.
    pub fn succeed(&self, values: T) -> bool {
        self.complete(Ok(values))
    }

    /// Settle with a failure.
    pub fn fail(&self, error: E) -> bool {
        self.complete(Err(error))
    }

    /// Whether the operation has already been settled.
    pub fn is_settled(&self) -> bool {
        match self.slot.lock() {
            Ok(guard) => guard.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }

    /// Convert into a boxed-friendly `FnOnce` for host APIs that take plain
    /// callbacks.
    pub fn into_callback(self) -> impl FnOnce(Result<T, E>) {
        move |result| {
            self.complete(result);
        }
    }
}

/// Single-settlement future produced by a wrapped operation.
///
/// Resolves to the success tuple or the error. There is no cancellation: the
/// underlying operation keeps running if this future is dropped.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct AsyncOperation<T, E> {
    receiver: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> fmt::Debug for AsyncOperation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOperation").finish_non_exhaustive()
    }
}

impl<T, E> Future for AsyncOperation<T, E>
where
    E: From<AdapterFault>,
{
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(oneshot::Canceled)) => {
                Poll::Ready(Err(AdapterFault::Abandoned.into()))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Create a linked completion/future pair.
///
/// Hosts that already drive their own callbacks can use this directly instead
/// of going through [`wrap`].
pub fn settlement<T, E>() -> (Completion<T, E>, AsyncOperation<T, E>) {
    let (sender, receiver) = oneshot::channel();
    let completion = Completion {
        slot: Arc::new(Mutex::new(Some(sender))),
    };
    (completion, AsyncOperation { receiver })
}

/// Wrap a callback-style operation into one returning an [`AsyncOperation`].
///
/// `f` receives the call's arguments (as a single value, usually a tuple) and
/// a fresh [`Completion`]. Returning `Err` from `f` is treated as a
/// synchronous failure and rejects the future unless `f` already settled it.
///
/// # Example
///
/// ```rust
/// use platform_async::{wrap, AdapterFault, Completion};
///
/// #[derive(Debug, PartialEq)]
/// enum LookupError {
///     Missing,
///     Fault(AdapterFault),
/// }
///
/// impl From<AdapterFault> for LookupError {
///     fn from(fault: AdapterFault) -> Self {
///         LookupError::Fault(fault)
///     }
/// }
///
/// let lookup = wrap(|key: &'static str, done: Completion<(String, u32), LookupError>| {
///     if key.is_empty() {
///         return Err(LookupError::Missing);
///     }
///     done.succeed((key.to_uppercase(), 1));
///     Ok(())
/// });
///
/// let result = futures::executor::block_on(lookup("movies"));
/// assert_eq!(result, Ok(("MOVIES".to_string(), 1)));
///
/// let result = futures::executor::block_on(lookup(""));
/// assert_eq!(result, Err(LookupError::Missing));
/// ```
pub fn wrap<A, T, E, F>(f: F) -> impl Fn(A) -> AsyncOperation<T, E>
where
    F: Fn(A, Completion<T, E>) -> Result<(), E>,
    E: From<AdapterFault>,
{
    move |args| invoke(&f, args)
}

/// Like [`wrap`], but every invocation runs against `receiver`.
///
/// The wrapped function sees the same `&R` on each call, so methods keep their
/// `self` regardless of where the wrapped function is stored.
pub fn wrap_bound<R, A, T, E, F>(receiver: Arc<R>, f: F) -> impl Fn(A) -> AsyncOperation<T, E>
where
    R: ?Sized,
    F: Fn(&R, A, Completion<T, E>) -> Result<(), E>,
    E: From<AdapterFault>,
{
    wrap(move |args, done| f(&receiver, args, done))
}

fn invoke<A, T, E, F>(f: &F, args: A) -> AsyncOperation<T, E>
where
    F: Fn(A, Completion<T, E>) -> Result<(), E>,
    E: From<AdapterFault>,
{
    let (completion, operation) = settlement();
    let callback = completion.clone();

    match panic::catch_unwind(AssertUnwindSafe(|| f(args, callback))) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
            if !completion.fail(error) {
                debug!("Wrapped operation returned an error after settling; ignoring");
            }
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(panic = %message, "Wrapped operation panicked");
            completion.fail(AdapterFault::Panicked(message).into());
        }
    }

    // Dropping our handle here lets an unsettled operation resolve as abandoned
    // once the host drops its clones as well.
    drop(completion);
    operation
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum TestError {
        Reported(String),
        Fault(AdapterFault),
    }

    impl From<AdapterFault> for TestError {
        fn from(fault: AdapterFault) -> Self {
            TestError::Fault(fault)
        }
    }

    #[tokio::test]
    async fn test_success_values_exclude_error_slot() {
        let op = wrap(|(), done: Completion<(&str, i32), TestError>| {
            done.succeed(("a", 2));
            Ok(())
        });

        assert_eq!(op(()).await, Ok(("a", 2)));
    }

    #[tokio::test]
    async fn test_reported_error_rejects() {
        let op = wrap(|(), done: Completion<(), TestError>| {
            done.fail(TestError::Reported("boom".into()));
            Ok(())
        });

        assert_eq!(op(()).await, Err(TestError::Reported("boom".into())));
    }

    #[tokio::test]
    async fn test_synchronous_error_is_funneled() {
        let op = wrap(|name: String, _done: Completion<(), TestError>| {
            Err(TestError::Reported(format!("invalid parameter {name}")))
        });

        let result = op("title".to_string()).await;
        assert_eq!(
            result,
            Err(TestError::Reported("invalid parameter title".into()))
        );
    }

    #[tokio::test]
    async fn test_panic_is_funneled() {
        let op = wrap(|(), _done: Completion<(), TestError>| -> Result<(), TestError> {
            panic!("validation exploded");
        });

        match op(()).await {
            Err(TestError::Fault(AdapterFault::Panicked(message))) => {
                assert!(message.contains("validation exploded"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dropped_completion_is_abandoned() {
        let op = wrap(|(), done: Completion<(), TestError>| {
            drop(done);
            Ok(())
        });

        assert_eq!(op(()).await, Err(TestError::Fault(AdapterFault::Abandoned)));
    }

    #[tokio::test]
    async fn test_second_completion_is_ignored() {
        let op = wrap(|(), done: Completion<(u8,), TestError>| {
            assert!(done.succeed((1,)));
            assert!(!done.fail(TestError::Reported("late".into())));
            assert!(!done.succeed((2,)));
            Ok(())
        });

        assert_eq!(op(()).await, Ok((1,)));
    }

    #[tokio::test]
    async fn test_error_after_settlement_does_not_override() {
        let op = wrap(|(), done: Completion<(u8,), TestError>| {
            done.succeed((7,));
            Err(TestError::Reported("too late".into()))
        });

        assert_eq!(op(()).await, Ok((7,)));
    }

    #[tokio::test]
    async fn test_completion_from_another_thread() {
        let op = wrap(|delay_ms: u64, done: Completion<(u64,), TestError>| {
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(delay_ms));
                done.succeed((delay_ms,));
            });
            Ok(())
        });

        assert_eq!(op(5).await, Ok((5,)));
    }

    #[tokio::test]
    async fn test_calls_are_independent() {
        let calls = AtomicUsize::new(0);
        let op = wrap(|n: usize, done: Completion<(usize,), TestError>| {
            calls.fetch_add(1, Ordering::SeqCst);
            done.succeed((n * 10,));
            Ok(())
        });

        let first = op(1);
        let second = op(2);
        assert_eq!(second.await, Ok((20,)));
        assert_eq!(first.await, Ok((10,)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_wrap_bound_keeps_receiver() {
        struct Table {
            name: String,
        }

        let table = Arc::new(Table {
            name: "movies".to_string(),
        });
        let op = wrap_bound(
            table,
            |table: &Table, suffix: String, done: Completion<(String,), TestError>| {
                done.succeed((format!("{}{}", table.name, suffix),));
                Ok(())
            },
        );

        assert_eq!(op("_v2".to_string()).await, Ok(("movies_v2".to_string(),)));
    }

    #[test]
    fn test_completion_reports_settled_state() {
        let (completion, _operation) = settlement::<(), TestError>();
        assert!(!completion.is_settled());
        completion.succeed(());
        assert!(completion.is_settled());
    }

    #[tokio::test]
    async fn test_into_callback() {
        let (completion, operation) = settlement::<(u8,), TestError>();
        let callback = completion.into_callback();
        callback(Ok((3,)));
        assert_eq!(operation.await, Ok((3,)));
    }
}
