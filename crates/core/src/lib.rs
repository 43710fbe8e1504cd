//! Core types and traits for the verdict assertion library
//!
//! This crate provides the foundational abstractions shared by the resolver
//! and the assertion API:
//!
//! - **Call sites**: where a failed check was invoked
//! - **Expected values**: the runtime argument(s) of a check
//! - **Traits**: the context resolver and message formatter seams
//! - **Overrides**: per-test substitution of resolver and formatter
//! - **Configuration**: configuration loading
//! - **Error handling**: unified error types

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod call_site;
pub mod config;
pub mod context;
pub mod error;
pub mod expected;
pub mod formatter;

// Re-export main types for convenience
pub use call_site::{current_test_name, CallSite};
pub use config::{Config, FormatterConfig, ResolverConfig};
pub use context::{AssertionContext, ContextResolver, NullResolver, Overrides};
pub use error::{Error, Result, ResultExt};
pub use expected::{Expected, Scalar, ToScalar};
pub use formatter::{DefaultMessageFormatter, MessageFormatter};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
