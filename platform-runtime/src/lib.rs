//! # Platform Runtime
//!
//! Wires host bridges into a [`PlatformContext`]:
//! - Configuration with fail-fast validation of required bridges
//! - Logging and tracing infrastructure
//! - The context object SDK code calls into
//!
//! ## Overview
//!
//! Host crates implement the traits from `platform-traits`; this crate holds
//! no host-specific behaviour of its own. With the `desktop-shims` feature the
//! desktop implementations fill in any bridge the caller leaves out.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;

pub use config::{PlatformConfig, PlatformConfigBuilder};
pub use context::PlatformContext;
pub use error::{Error, Result};
