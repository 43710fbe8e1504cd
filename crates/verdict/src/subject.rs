//! Generic check engine
//!
//! One [`Subject`] wraps the value under test. Every check compares, and on
//! mismatch asks the bound resolver for the asserted expression's name,
//! formats the message and raises an [`AssertionFailure`]. Checks are
//! `#[track_caller]` so the call site is the line in the test.

use crate::failure::AssertionFailure;
use std::fmt::Debug;
use verdict_core::call_site::CallSite;
use verdict_core::context::AssertionContext;
use verdict_core::expected::{Expected, ToScalar};

/// A value waiting to be checked
#[derive(Debug)]
pub struct Subject<T> {
    value: T,
    context: AssertionContext,
    reason: Option<String>,
}

impl<T> Subject<T> {
    pub fn new(value: T, context: AssertionContext) -> Self {
        Self {
            value,
            context,
            reason: None,
        }
    }

    /// Attach a reason, printed as the last line of a failure message
    pub fn because(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// Pass `value` through when `passed`, otherwise fail with a resolved message
    #[track_caller]
    fn verify(
        self,
        passed: bool,
        method: &str,
        expected: impl FnOnce() -> Expected,
        actual: impl FnOnce(&T) -> String,
        description: impl FnOnce() -> String,
    ) -> T {
        if passed {
            return self.value;
        }
        fail(
            &self.context,
            self.reason.as_deref(),
            method,
            &expected(),
            &actual(&self.value),
            &description(),
        )
    }
}

/// Resolve, format and raise the failure of `method` at the caller's line
#[track_caller]
fn fail(
    context: &AssertionContext,
    reason: Option<&str>,
    method: &str,
    expected: &Expected,
    actual: &str,
    description: &str,
) -> ! {
    let call_site = CallSite::capture(method);
    let message = context.failure_message(expected, &call_site, actual, description, reason);
    tracing::debug!(call_site = %call_site, "Check failed");
    AssertionFailure::new(message).raise()
}

impl<T: Debug> Subject<T> {
    #[track_caller]
    pub fn be<E>(self, expected: E) -> T
    where
        T: PartialEq<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value == expected;
        self.verify(
            passed,
            "be",
            || Expected::scalar(&expected),
            |v| format!("{v:?}"),
            || format!("to be {expected:?}"),
        )
    }

    #[track_caller]
    pub fn not_be<E>(self, unexpected: E) -> T
    where
        T: PartialEq<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value != unexpected;
        self.verify(
            passed,
            "not_be",
            || Expected::scalar(&unexpected),
            |v| format!("{v:?}"),
            || format!("not to be {unexpected:?}"),
        )
    }

    #[track_caller]
    pub fn be_greater_than<E>(self, bound: E) -> T
    where
        T: PartialOrd<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value > bound;
        self.verify(
            passed,
            "be_greater_than",
            || Expected::scalar(&bound),
            |v| format!("{v:?}"),
            || format!("to be greater than {bound:?}"),
        )
    }

    #[track_caller]
    pub fn be_greater_than_or_equal_to<E>(self, bound: E) -> T
    where
        T: PartialOrd<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value >= bound;
        self.verify(
            passed,
            "be_greater_than_or_equal_to",
            || Expected::scalar(&bound),
            |v| format!("{v:?}"),
            || format!("to be greater than or equal to {bound:?}"),
        )
    }

    #[track_caller]
    pub fn be_less_than<E>(self, bound: E) -> T
    where
        T: PartialOrd<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value < bound;
        self.verify(
            passed,
            "be_less_than",
            || Expected::scalar(&bound),
            |v| format!("{v:?}"),
            || format!("to be less than {bound:?}"),
        )
    }

    #[track_caller]
    pub fn be_less_than_or_equal_to<E>(self, bound: E) -> T
    where
        T: PartialOrd<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value <= bound;
        self.verify(
            passed,
            "be_less_than_or_equal_to",
            || Expected::scalar(&bound),
            |v| format!("{v:?}"),
            || format!("to be less than or equal to {bound:?}"),
        )
    }

    /// Inclusive range check
    #[track_caller]
    pub fn be_between<E>(self, low: E, high: E) -> T
    where
        T: PartialOrd<E>,
        E: Debug + ToScalar,
    {
        let passed = self.value >= low && self.value <= high;
        self.verify(
            passed,
            "be_between",
            || Expected::Sequence(vec![low.to_scalar(), high.to_scalar()]),
            |v| format!("{v:?}"),
            || format!("to be between {low:?} and {high:?}"),
        )
    }

    #[track_caller]
    pub fn be_one_of<E>(self, options: &[E]) -> T
    where
        T: PartialEq<E>,
        E: Debug + ToScalar,
    {
        let passed = options.iter().any(|option| self.value == *option);
        self.verify(
            passed,
            "be_one_of",
            || Expected::sequence(options),
            |v| format!("{v:?}"),
            || format!("to be one of {options:?}"),
        )
    }

    #[track_caller]
    pub fn be_default(self) -> T
    where
        T: Default + PartialEq,
    {
        let passed = self.value == T::default();
        self.verify(
            passed,
            "be_default",
            Expected::none,
            |v| format!("{v:?}"),
            || format!("to be the default value {:?}", T::default()),
        )
    }

    #[track_caller]
    pub fn not_be_default(self) -> T
    where
        T: Default + PartialEq,
    {
        let passed = self.value != T::default();
        self.verify(
            passed,
            "not_be_default",
            Expected::none,
            |v| format!("{v:?}"),
            || "not to be the default value".to_string(),
        )
    }
}

impl Subject<bool> {
    #[track_caller]
    pub fn be_true(self) -> bool {
        let passed = self.value;
        self.verify(
            passed,
            "be_true",
            Expected::none,
            |v| v.to_string(),
            || "to be true".to_string(),
        )
    }

    #[track_caller]
    pub fn be_false(self) -> bool {
        let passed = !self.value;
        self.verify(
            passed,
            "be_false",
            Expected::none,
            |v| v.to_string(),
            || "to be false".to_string(),
        )
    }
}

impl<T: Debug> Subject<Option<T>> {
    /// Check for `Some` and hand back the contained value
    #[track_caller]
    pub fn be_some(self) -> T {
        let Self {
            value,
            context,
            reason,
        } = self;
        match value {
            Some(value) => value,
            None => fail(
                &context,
                reason.as_deref(),
                "be_some",
                &Expected::none(),
                "None",
                "to be Some",
            ),
        }
    }

    #[track_caller]
    pub fn be_none(self) -> Option<T> {
        let passed = self.value.is_none();
        self.verify(
            passed,
            "be_none",
            Expected::none,
            |v| format!("{v:?}"),
            || "to be None".to_string(),
        )
    }
}

macro_rules! text_checks {
    ($($lt:lifetime)?, $ty:ty) => {
        impl<$($lt)?> Subject<$ty> {
            #[track_caller]
            pub fn contain(self, needle: &str) -> $ty {
                let passed = self.value.contains(needle);
                self.verify(
                    passed,
                    "contain",
                    || Expected::scalar(needle),
                    |v| format!("{v:?}"),
                    || format!("to contain {needle:?}"),
                )
            }

            #[track_caller]
            pub fn start_with(self, prefix: &str) -> $ty {
                let passed = self.value.starts_with(prefix);
                self.verify(
                    passed,
                    "start_with",
                    || Expected::scalar(prefix),
                    |v| format!("{v:?}"),
                    || format!("to start with {prefix:?}"),
                )
            }

            #[track_caller]
            pub fn end_with(self, suffix: &str) -> $ty {
                let passed = self.value.ends_with(suffix);
                self.verify(
                    passed,
                    "end_with",
                    || Expected::scalar(suffix),
                    |v| format!("{v:?}"),
                    || format!("to end with {suffix:?}"),
                )
            }

            #[track_caller]
            pub fn be_empty(self) -> $ty {
                let passed = self.value.is_empty();
                self.verify(
                    passed,
                    "be_empty",
                    Expected::none,
                    |v| format!("{v:?}"),
                    || "to be empty".to_string(),
                )
            }
        }
    };
}

text_checks!(, String);
text_checks!('a, &'a str);

macro_rules! collection_checks {
    ($($lt:lifetime)?, $ty:ty) => {
        impl<$($lt,)? I: Debug + PartialEq> Subject<$ty> {
            #[track_caller]
            pub fn have_len(self, len: usize) -> $ty {
                let passed = self.value.len() == len;
                self.verify(
                    passed,
                    "have_len",
                    || Expected::scalar(len),
                    |v| format!("{v:?} with length {}", v.len()),
                    || format!("to have length {len}"),
                )
            }

            #[track_caller]
            pub fn be_empty(self) -> $ty {
                let passed = self.value.is_empty();
                self.verify(
                    passed,
                    "be_empty",
                    Expected::none,
                    |v| format!("{v:?}"),
                    || "to be empty".to_string(),
                )
            }

            #[track_caller]
            pub fn contain_item(self, item: I) -> $ty
            where
                I: ToScalar,
            {
                let passed = self.value.contains(&item);
                self.verify(
                    passed,
                    "contain_item",
                    || Expected::scalar(&item),
                    |v| format!("{v:?}"),
                    || format!("to contain {item:?}"),
                )
            }
        }
    };
}

collection_checks!(, Vec<I>);
collection_checks!('a, &'a [I]);
