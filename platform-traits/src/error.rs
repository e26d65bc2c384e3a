use platform_async::AdapterFault;
use thiserror::Error;

/// Canonical error representation shared by every host implementation.
///
/// Anything behind an async boundary (wrapped operations, transport sends)
/// reaches the caller as one of these through a future or callback. The
/// synchronous helpers (validation, JSON, date parsing) return it directly.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The operation failed before it registered its async completion.
    #[error("Operation failed synchronously: {0}")]
    Synchronous(String),

    /// The operation reported failure through its completion.
    #[error("Operation failed: {0}")]
    Async(String),

    /// The network exchange could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// An input violated its contract.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The host does not implement this capability.
    #[error("Operation not supported on this host: {0}")]
    Unsupported(String),

    /// The operation dropped its completion without settling.
    #[error("Operation abandoned without completing")]
    Abandoned,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AdapterFault> for PlatformError {
    fn from(fault: AdapterFault) -> Self {
        match fault {
            AdapterFault::Panicked(message) => PlatformError::Synchronous(message),
            AdapterFault::Abandoned => PlatformError::Abandoned,
        }
    }
}

impl PlatformError {
    /// Whether this error came from the network rather than from the caller.
    pub fn is_transport(&self) -> bool {
        matches!(self, PlatformError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
