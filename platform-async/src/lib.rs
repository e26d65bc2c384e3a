//! Async adaptation layer for the Mobile Services platform.
//!
//! Host primitives (network calls, storage, login prompts) are usually
//! exposed as callback-style operations: the last parameter is a completion
//! handle that is invoked with either an error or the success values. This
//! crate turns such operations into single-settlement futures so SDK code can
//! `.await` them uniformly on every host.
//!
//! # Modules
//!
//! - `adapter`: [`wrap`], [`wrap_bound`], [`Completion`] and [`AsyncOperation`]
//! - `error`: [`AdapterFault`], the failures the adapter itself produces
//! - `runtime`: executor helpers used by native hosts
//!
//! # Examples
//!
//! ```rust
//! use platform_async::{wrap, AdapterFault, Completion};
//!
//! #[derive(Debug)]
//! struct Failure(String);
//!
//! impl From<AdapterFault> for Failure {
//!     fn from(fault: AdapterFault) -> Self {
//!         Failure(fault.to_string())
//!     }
//! }
//!
//! let add = wrap(|(a, b): (i32, i32), done: Completion<(i32,), Failure>| {
//!     done.succeed((a + b,));
//!     Ok(())
//! });
//!
//! let sum = futures::executor::block_on(add((2, 3))).unwrap();
//! assert_eq!(sum, (5,));
//! ```

pub mod adapter;
pub mod error;
pub mod runtime;

pub use adapter::{settlement, wrap, wrap_bound, AsyncOperation, Completion};
pub use error::AdapterFault;
