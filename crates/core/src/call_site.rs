//! Call-site coordinates of a failed assertion
//!
//! A [`CallSite`] is built once per failing check and handed to the context
//! resolver. File and line come from `#[track_caller]`; the enclosing test
//! name comes from the current thread, which libtest names after the test.

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Name used when the current thread carries no test name
pub const UNKNOWN_TEST: &str = "<unknown>";

/// Where an assertion was invoked in source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Source file path as reported by the compiler (often workspace-relative)
    pub source_file_path: PathBuf,
    /// 1-based line number of the validation call
    pub line_number: usize,
    /// Simple name of the enclosing test function
    pub test_method_name: String,
    /// Name of the validation method that failed, e.g. `be`
    pub validation_method_name: String,
}

impl CallSite {
    /// Create a call site from explicit coordinates
    pub fn new(
        source_file_path: impl Into<PathBuf>,
        line_number: usize,
        test_method_name: impl Into<String>,
        validation_method_name: impl Into<String>,
    ) -> Self {
        Self {
            source_file_path: source_file_path.into(),
            line_number,
            test_method_name: test_method_name.into(),
            validation_method_name: validation_method_name.into(),
        }
    }

    /// Capture the call site of the nearest non-`#[track_caller]` frame
    #[track_caller]
    pub fn capture(validation_method_name: &str) -> Self {
        Self::from_location(Location::caller(), validation_method_name)
    }

    /// Build a call site from a compiler-supplied location
    pub fn from_location(location: &Location<'_>, validation_method_name: &str) -> Self {
        Self {
            source_file_path: PathBuf::from(location.file()),
            line_number: location.line() as usize,
            test_method_name: current_test_name(),
            validation_method_name: validation_method_name.to_string(),
        }
    }

    /// Source path as a `Path`
    pub fn path(&self) -> &Path {
        &self.source_file_path
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} ({} in {})",
            self.source_file_path.display(),
            self.line_number,
            self.validation_method_name,
            self.test_method_name
        )
    }
}

/// Simple name of the test running on this thread
///
/// libtest names test threads after the full test path
/// (`module::tests::test_name`); only the last segment is kept.
pub fn current_test_name() -> String {
    std::thread::current()
        .name()
        .and_then(test_name_from_thread_name)
        .unwrap_or_else(|| UNKNOWN_TEST.to_string())
}

fn test_name_from_thread_name(thread_name: &str) -> Option<String> {
    // The main thread is not a test
    if thread_name == "main" || thread_name.is_empty() {
        return None;
    }
    thread_name.rsplit("::").next().map(str::to_string)
}
