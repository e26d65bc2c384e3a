//! # Platform Traits
//!
//! Host-neutral contract between the Mobile Services SDK and each concrete
//! host (native desktop process, browser, embedded shell).
//!
//! ## Overview
//!
//! SDK code only ever talks to the traits and helpers in this crate. Each host
//! ships an implementation crate that provides the traits; the helpers are
//! shared because they have no host-specific behaviour.
//!
//! ### Host capabilities (traits)
//! - [`HttpTransport`](http::HttpTransport) - One network exchange per call, callback completion
//! - [`SettingsStore`](storage::SettingsStore) - Process-lifetime key/value settings
//! - [`HostEnvironment`](environment::HostEnvironment) - OS, SDK identity and user agent
//! - [`LoginProvider`](auth::LoginProvider) - Browser-based login, possibly unsupported
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ### Shared helpers
//! - [`json`] - JSON conversion with ISO-8601 dates
//! - [`date`] - Strict ISO-8601 parsing
//! - [`namespace`] - Named capability registry
//! - [`resources`] - Resource strings
//! - [`validate`] - Parameter contract checks
//!
//! ## Error Handling
//!
//! Everything returns [`PlatformError`]. Operations behind an async boundary
//! deliver it through their callback or future; synchronous helpers return it
//! directly.
//!
//! ## Thread Safety
//!
//! All host traits require `Send + Sync` so a context can be shared across
//! tasks of a multi-threaded runtime.

pub mod auth;
pub mod date;
pub mod environment;
pub mod error;
pub mod http;
pub mod json;
pub mod logging;
pub mod namespace;
pub mod resources;
pub mod storage;
pub mod validate;

pub use error::{PlatformError, Result};

// Re-export commonly used types
pub use auth::{LoginCallback, LoginProvider};
pub use date::{format_iso_date, try_parse_iso_date, try_parse_iso_date_value};
pub use environment::{HostEnvironment, OperatingSystemInfo, SdkInfo};
pub use http::{HttpTransport, NormalizedRequest, RequestSpec, ResponseEnvelope, TransportCallback};
pub use json::{allow_platform_to_mutate_original, from_json, to_json};
pub use logging::{redact_if_sensitive, ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use namespace::NamespaceRegistry;
pub use resources::resource_string;
pub use storage::SettingsStore;
