//! Fluent assertions that name what they assert
//!
//! ```ignore
//! use verdict::Should;
//!
//! let order_total = 41;
//! order_total.should().be(42);
//! // order_total
//! // is 41
//! // but was expected
//! // to be 42
//! ```
//!
//! On failure the call site is re-parsed to recover the asserted expression
//! (`order_total`). Without a readable source the message simply starts at
//! `is ...`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod failure;
pub mod scenario;
pub mod subject;

use std::sync::{Arc, OnceLock};
use verdict_core::config::Config;
use verdict_resolver::CallerContextResolver;

pub use failure::AssertionFailure;
pub use scenario::{given, Failure, Outcome, Scenario, When};
pub use subject::Subject;
pub use verdict_core::{
    AssertionContext, CallSite, ContextResolver, DefaultMessageFormatter, Expected,
    MessageFormatter, NullResolver, Overrides, Scalar, ToScalar,
};

/// Entry point of every check chain
pub trait Should: Sized {
    /// Check this value with the process-wide default context
    fn should(self) -> Subject<Self>;

    /// Check this value with an explicit context
    fn should_with(self, context: &AssertionContext) -> Subject<Self>;
}

impl<T> Should for T {
    fn should(self) -> Subject<Self> {
        Subject::new(self, default_context())
    }

    fn should_with(self, context: &AssertionContext) -> Subject<Self> {
        Subject::new(self, context.clone())
    }
}

/// Context built once from the discovered configuration
///
/// A configuration that fails to load is logged and replaced by defaults;
/// checks never fail because of it.
pub fn default_context() -> AssertionContext {
    static DEFAULT: OnceLock<AssertionContext> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            let config = Config::load(None).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load configuration, using defaults");
                Config::default()
            });
            context_from_config(&config)
        })
        .clone()
}

/// Source resolver and default formatter configured from `config`
pub fn context_from_config(config: &Config) -> AssertionContext {
    AssertionContext::new(
        Arc::new(CallerContextResolver::new(config.resolver.clone())),
        Arc::new(DefaultMessageFormatter::new(&config.formatter)),
    )
}
