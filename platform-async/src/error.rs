use thiserror::Error;

/// Failures raised by the adapter itself rather than by the wrapped operation.
///
/// Callers choose their own error type for wrapped operations; it only has to
/// be constructible from an `AdapterFault` so these cases can be funneled into
/// the same rejection channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterFault {
    /// The wrapped function panicked before it settled its completion.
    #[error("Wrapped operation panicked: {0}")]
    Panicked(String),

    /// Every completion handle was dropped without being invoked.
    #[error("Wrapped operation dropped its completion without settling")]
    Abandoned,
}
