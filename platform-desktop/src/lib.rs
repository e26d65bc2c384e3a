//! # Desktop Platform Implementations
//!
//! Implementations of the platform traits for native desktop processes
//! (macOS, Windows, Linux) running on a Tokio runtime.
//!
//! ## Overview
//!
//! - `HttpTransport` using `reqwest`
//! - `SettingsStore` as a process-lifetime in-memory map
//! - `HostEnvironment` from `std::env::consts` plus an OS release probe
//! - `LoginProvider` declared unsupported
//!
//! ## Usage
//!
//! ```ignore
//! use platform_desktop::{InMemorySettingsStore, ReqwestTransport};
//! use platform_traits::{HttpTransport, RequestSpec};
//!
//! #[tokio::main]
//! async fn main() -> platform_traits::Result<()> {
//!     let transport = ReqwestTransport::new()?;
//!     let response = transport
//!         .send_async(RequestSpec::new("https://example.azure-mobile.net/tables/movies"))
//!         .await?;
//!     println!("{}", response.status);
//!     Ok(())
//! }
//! ```

mod auth;
mod environment;
mod http;
mod settings;

pub use auth::UnsupportedLogin;
pub use environment::{DesktopEnvironment, DESKTOP_LANGUAGE};
pub use http::ReqwestTransport;
pub use settings::InMemorySettingsStore;
