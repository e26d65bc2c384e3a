//! # Mobile Services Platform
//!
//! Host abstraction layer for the Mobile Services client SDK. SDK code depends
//! on this crate alone and reaches every host capability through a
//! [`PlatformContext`].
//!
//! | Crate | Purpose |
//! |-------|---------|
//! | [`platform_async`] | Callback-to-future adapter |
//! | [`platform_traits`] | Host traits and shared helpers |
//! | [`platform_runtime`] | Configuration, logging, context |
//! | `platform_desktop` | Native desktop host (feature `desktop-shims`) |
//!
//! ```ignore
//! let context = mobile_services_platform::desktop_context()?;
//! context.write_setting("MobileServices.Installation.config", Some(id));
//! ```

pub use platform_async;
pub use platform_runtime;
pub use platform_traits;

#[cfg(feature = "desktop-shims")]
pub use platform_desktop;

pub use platform_async::{wrap, wrap_bound, AsyncOperation, Completion};
pub use platform_runtime::{Error, PlatformConfig, PlatformContext};
pub use platform_traits::{PlatformError, RequestSpec, ResponseEnvelope};

/// Context backed entirely by the desktop host.
#[cfg(feature = "desktop-shims")]
pub fn desktop_context() -> platform_runtime::Result<PlatformContext> {
    PlatformContext::new(PlatformConfig::builder().build()?)
}
