use thiserror::Error;

/// A failed check
///
/// Checks panic with this failure's message so the test harness reports it
/// the same way as a failed `assert!`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Abort the current test with this failure
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}", self.message)
    }
}
