//! Login capability for desktop hosts

use platform_traits::{
    auth::{LoginCallback, LoginProvider},
    error::{PlatformError, Result},
    resources::format_resource,
};
use tracing::warn;

/// Desktop processes have no embedded browser control, so login is declared
/// unsupported and every attempt fails immediately.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedLogin;

impl LoginProvider for UnsupportedLogin {
    fn is_supported(&self) -> bool {
        false
    }

    fn login(&self, start_uri: &str, _end_uri: Option<&str>, _callback: LoginCallback) -> Result<()> {
        let message = format_resource("Platform_LoginNotSupported", &["desktop"]);
        warn!(start_uri = %start_uri, "{}", message);
        Err(PlatformError::Unsupported(message))
    }
}
