//! Given/When/Then scenarios
//!
//! ```ignore
//! given(|| Cart::with_items(3))
//!     .when(|cart| cart.checkout())
//!     .then(|receipt, ctx| {
//!         receipt.total.should_with(ctx).be(30);
//!     });
//! ```
//!
//! `then_throw` expects the act to fail with a specific kind. The act runs
//! once, its result is classified into an [`Outcome`], and cleanups
//! registered with `finally` run exactly once whatever happens.

use crate::default_context;
use crate::failure::AssertionFailure;
use std::any::{type_name, Any};
use std::error::Error as StdError;
use std::fmt;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use verdict_core::call_site::current_test_name;
use verdict_core::context::{AssertionContext, Overrides};

type BoxedError = Box<dyn StdError + Send + Sync>;

/// How an act ended that was expected to fail with `K`
pub enum Outcome<K, R> {
    /// No failure; the act's result
    Completed(R),
    /// Failure of the expected kind
    Expected(K),
    /// Failure of any other kind, left untouched
    Unexpected(Failure),
}

/// A failure that was not of the expected kind
pub enum Failure {
    /// Panic payload, as caught from the unwinding act
    Panic(Box<dyn Any + Send>),
    /// Error value returned by the act
    Error(BoxedError),
}

impl Failure {
    /// Re-raise the failure unchanged
    #[track_caller]
    pub fn propagate(self) -> ! {
        match self {
            Failure::Panic(payload) => resume_unwind(payload),
            Failure::Error(error) => panic!("{error}"),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Panic(payload) => f
                .debug_tuple("Panic")
                .field(&panic_message(payload.as_ref()))
                .finish(),
            Failure::Error(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}

impl<K: fmt::Debug, R: fmt::Debug> fmt::Debug for Outcome<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed(r) => f.debug_tuple("Completed").field(r).finish(),
            Outcome::Expected(k) => f.debug_tuple("Expected").field(k).finish(),
            Outcome::Unexpected(failure) => f.debug_tuple("Unexpected").field(failure).finish(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

/// Runs registered cleanups in reverse order when dropped, unwinding included
#[derive(Default)]
struct Cleanup(Vec<Box<dyn FnOnce()>>);

impl Drop for Cleanup {
    fn drop(&mut self) {
        while let Some(cleanup) = self.0.pop() {
            cleanup();
        }
    }
}

/// Start a scenario from its arranged state
pub fn given<G>(arrange: impl FnOnce() -> G) -> Scenario<G> {
    Scenario {
        arranged: arrange(),
        context: None,
        cleanup: Cleanup::default(),
    }
}

/// Arranged state, waiting for its act
pub struct Scenario<G> {
    arranged: G,
    context: Option<AssertionContext>,
    cleanup: Cleanup,
}

impl<G> Scenario<G> {
    /// Use an explicit resolver/formatter pair for this scenario
    pub fn with_context(mut self, context: AssertionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Use the bindings registered for the running test
    pub fn with_overrides(self, overrides: &Overrides) -> Self {
        let context = overrides.context_for(&current_test_name());
        self.with_context(context)
    }

    /// Register a cleanup that runs once the scenario ends
    pub fn finally(mut self, cleanup: impl FnOnce() + 'static) -> Self {
        self.cleanup.0.push(Box::new(cleanup));
        self
    }

    /// Record the act; it runs when the scenario is judged
    pub fn when<R, F>(self, act: F) -> When<G, F>
    where
        F: FnOnce(G) -> R,
    {
        When {
            scenario: self,
            act,
        }
    }
}

/// Arranged state plus the act under test
pub struct When<G, F> {
    scenario: Scenario<G>,
    act: F,
}

impl<G, F> When<G, F> {
    fn split(self) -> (G, F, AssertionContext, Cleanup) {
        let Scenario {
            arranged,
            context,
            cleanup,
        } = self.scenario;
        (
            arranged,
            self.act,
            context.unwrap_or_else(default_context),
            cleanup,
        )
    }

    /// Run the act and hand its result to the assertions
    pub fn then<R>(self, assert: impl FnOnce(R, &AssertionContext))
    where
        F: FnOnce(G) -> R,
    {
        let (arranged, act, context, _cleanup) = self.split();
        let result = act(arranged);
        assert(result, &context);
    }

    /// Run the act and classify a panic against the expected kind `K`
    pub fn run_outcome<K, R>(self) -> Outcome<K, R>
    where
        F: FnOnce(G) -> R,
        K: 'static,
    {
        let (arranged, act, _context, _cleanup) = self.split();
        match catch_unwind(AssertUnwindSafe(move || act(arranged))) {
            Ok(result) => Outcome::Completed(result),
            Err(payload) => match payload.downcast::<K>() {
                Ok(expected) => Outcome::Expected(*expected),
                Err(other) => Outcome::Unexpected(Failure::Panic(other)),
            },
        }
    }

    /// Run a fallible act and classify its error or panic against `K`
    pub fn run_fallible_outcome<K, R, E>(self) -> Outcome<K, R>
    where
        F: FnOnce(G) -> Result<R, E>,
        E: Into<BoxedError>,
        K: StdError + 'static,
    {
        let (arranged, act, _context, _cleanup) = self.split();
        match catch_unwind(AssertUnwindSafe(move || act(arranged))) {
            Ok(Ok(result)) => Outcome::Completed(result),
            Ok(Err(error)) => {
                let error: BoxedError = error.into();
                match error.downcast::<K>() {
                    Ok(expected) => Outcome::Expected(*expected),
                    Err(other) => Outcome::Unexpected(Failure::Error(other)),
                }
            }
            Err(payload) => match payload.downcast::<K>() {
                Ok(expected) => Outcome::Expected(*expected),
                Err(other) => Outcome::Unexpected(Failure::Panic(other)),
            },
        }
    }

    /// Expect the act to panic with a payload of type `K` and return it
    ///
    /// Other panics propagate unchanged; completing is itself a failure.
    #[track_caller]
    pub fn then_throw<K, R>(self) -> K
    where
        F: FnOnce(G) -> R,
        K: 'static,
        R: fmt::Debug,
    {
        let context = self.context_or_default();
        judge(self.run_outcome::<K, R>(), &context)
    }

    /// Expect a fallible act to fail with an error (or panic payload) of type `K`
    #[track_caller]
    pub fn then_fail_with<K, R, E>(self) -> K
    where
        F: FnOnce(G) -> Result<R, E>,
        E: Into<BoxedError>,
        K: StdError + 'static,
        R: fmt::Debug,
    {
        let context = self.context_or_default();
        judge(self.run_fallible_outcome::<K, R, E>(), &context)
    }

    fn context_or_default(&self) -> AssertionContext {
        self.scenario
            .context
            .clone()
            .unwrap_or_else(default_context)
    }
}

#[track_caller]
fn judge<K, R: fmt::Debug>(outcome: Outcome<K, R>, context: &AssertionContext) -> K {
    match outcome {
        Outcome::Expected(kind) => kind,
        Outcome::Unexpected(failure) => failure.propagate(),
        Outcome::Completed(result) => {
            // The act completed, so there is no asserted expression to name
            let message = context.formatter().format(
                None,
                &format!("completed with {result:?}"),
                &format!("to fail with {}", type_name::<K>()),
                None,
            );
            AssertionFailure::new(message).raise()
        }
    }
}
