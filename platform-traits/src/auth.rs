//! Login Capability
//!
//! Browser-based login needs a host-specific UI surface. Hosts without one
//! declare the capability unsupported and fail every call immediately.

use platform_async::{wrap, AsyncOperation, Completion};

use crate::error::{PlatformError, Result};

/// Completion handler for [`LoginProvider::login`]; receives the final URI.
pub type LoginCallback = Box<dyn FnOnce(Result<String>) + Send + 'static>;

/// Login provider trait
///
/// `login` navigates a host login control to `start_uri` and invokes
/// `callback` with the URI it ended on once it reaches `end_uri`.
pub trait LoginProvider: Send + Sync {
    /// Whether this host can run a login flow at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Start the login flow.
    ///
    /// # Errors
    ///
    /// Hosts that cannot log users in return
    /// [`PlatformError::Unsupported`] immediately and never call `callback`.
    fn login(&self, start_uri: &str, end_uri: Option<&str>, callback: LoginCallback) -> Result<()>;

    /// [`login`](LoginProvider::login) composed through the async adapter.
    fn login_async(
        &self,
        start_uri: String,
        end_uri: Option<String>,
    ) -> AsyncOperation<String, PlatformError> {
        let login = wrap(
            |(start, end): (String, Option<String>), done: Completion<String, PlatformError>| {
                self.login(&start, end.as_deref(), Box::new(done.into_callback()))
            },
        );
        login((start_uri, end_uri))
    }
}
