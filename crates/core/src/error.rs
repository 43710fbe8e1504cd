use thiserror::Error;

/// Result type for verdict operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for verdict operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parsing errors when re-reading a test source file
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Source file could not be located on disk
    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates a source-not-found error
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound(path.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let result: std::result::Result<(), _> = Err(io);
        let err = result.context("reading src/lib.rs").unwrap_err();

        assert_eq!(err.to_string(), "reading src/lib.rs: missing");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("tests/a.rs", "tree-sitter returned no tree");
        assert_eq!(
            err.to_string(),
            "Parse error in tests/a.rs: tree-sitter returned no tree"
        );
    }
}
