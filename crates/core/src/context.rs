//! Resolver/formatter seams and the per-test override registry
//!
//! Checks never reach for global state. They carry an [`AssertionContext`]
//! that names the resolver and formatter to use; [`Overrides`] hands out
//! contexts per test name with per-test bindings taking precedence over
//! global ones, and global ones over the defaults.

use crate::call_site::CallSite;
use crate::expected::Expected;
use crate::formatter::MessageFormatter;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Reconstructs a readable name for the asserted expression
///
/// Implementations never fail: `None` means "no context available".
pub trait ContextResolver: Send + Sync {
    fn resolve(&self, expected: &Expected, call_site: &CallSite) -> Option<String>;
}

/// Resolver that never produces a context
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl ContextResolver for NullResolver {
    fn resolve(&self, _expected: &Expected, _call_site: &CallSite) -> Option<String> {
        None
    }
}

/// Resolver and formatter used by one check
#[derive(Clone)]
pub struct AssertionContext {
    resolver: Arc<dyn ContextResolver>,
    formatter: Arc<dyn MessageFormatter>,
}

impl AssertionContext {
    pub fn new(resolver: Arc<dyn ContextResolver>, formatter: Arc<dyn MessageFormatter>) -> Self {
        Self {
            resolver,
            formatter,
        }
    }

    pub fn resolver(&self) -> &dyn ContextResolver {
        self.resolver.as_ref()
    }

    pub fn formatter(&self) -> &dyn MessageFormatter {
        self.formatter.as_ref()
    }

    /// Copy of this context with another resolver
    pub fn with_resolver(&self, resolver: Arc<dyn ContextResolver>) -> Self {
        Self {
            resolver,
            formatter: Arc::clone(&self.formatter),
        }
    }

    /// Copy of this context with another formatter
    pub fn with_formatter(&self, formatter: Arc<dyn MessageFormatter>) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            formatter,
        }
    }

    /// Resolve and format a failure message in one step
    pub fn failure_message(
        &self,
        expected: &Expected,
        call_site: &CallSite,
        actual: &str,
        expected_description: &str,
        reason: Option<&str>,
    ) -> String {
        let context = self.resolver.resolve(expected, call_site);
        self.formatter
            .format(context.as_deref(), actual, expected_description, reason)
    }
}

impl fmt::Debug for AssertionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionContext").finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Bindings {
    resolver: Option<Arc<dyn ContextResolver>>,
    formatter: Option<Arc<dyn MessageFormatter>>,
}

#[derive(Default)]
struct Registry {
    global: Bindings,
    per_test: HashMap<String, Bindings>,
}

/// Override registry keyed by test method name
///
/// Owned by whoever runs the tests and passed explicitly to scenarios;
/// there is no process-wide instance.
pub struct Overrides {
    defaults: AssertionContext,
    registry: RwLock<Registry>,
}

impl Overrides {
    pub fn new(defaults: AssertionContext) -> Self {
        Self {
            defaults,
            registry: RwLock::new(Registry::default()),
        }
    }

    /// Replace the resolver for every test
    pub fn bind_resolver(&self, resolver: Arc<dyn ContextResolver>) {
        self.write(|r| r.global.resolver = Some(resolver));
    }

    /// Replace the formatter for every test
    pub fn bind_formatter(&self, formatter: Arc<dyn MessageFormatter>) {
        self.write(|r| r.global.formatter = Some(formatter));
    }

    /// Replace the resolver for one test method
    pub fn bind_resolver_for(&self, test: &str, resolver: Arc<dyn ContextResolver>) {
        self.write(|r| r.per_test.entry(test.to_string()).or_default().resolver = Some(resolver));
    }

    /// Replace the formatter for one test method
    pub fn bind_formatter_for(&self, test: &str, formatter: Arc<dyn MessageFormatter>) {
        self.write(|r| {
            r.per_test.entry(test.to_string()).or_default().formatter = Some(formatter)
        });
    }

    /// Drop every override, global and per test
    pub fn reset(&self) {
        self.write(|r| *r = Registry::default());
    }

    /// Drop the overrides of one test method
    pub fn reset_for(&self, test: &str) {
        self.write(|r| {
            r.per_test.remove(test);
        });
    }

    /// Context for a test: per-test binding, else global, else default
    pub fn context_for(&self, test: &str) -> AssertionContext {
        let registry = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let scoped = registry.per_test.get(test);

        let resolver = scoped
            .and_then(|b| b.resolver.clone())
            .or_else(|| registry.global.resolver.clone())
            .unwrap_or_else(|| Arc::clone(&self.defaults.resolver));
        let formatter = scoped
            .and_then(|b| b.formatter.clone())
            .or_else(|| registry.global.formatter.clone())
            .unwrap_or_else(|| Arc::clone(&self.defaults.formatter));

        AssertionContext::new(resolver, formatter)
    }

    fn write(&self, f: impl FnOnce(&mut Registry)) {
        // Poisoning from a panicked test is ignored
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut registry);
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides").finish_non_exhaustive()
    }
}
