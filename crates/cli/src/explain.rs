//! Resolve the context of a call site given on the command line

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use verdict_core::call_site::{CallSite, UNKNOWN_TEST};
use verdict_core::config::Config;
use verdict_core::context::ContextResolver;
use verdict_core::expected::{Expected, Scalar};
use verdict_resolver::CallerContextResolver;

/// Printed when the resolver finds nothing
pub const NO_CONTEXT: &str = "<no context>";

/// One `verdict explain` invocation
#[derive(Debug, Clone)]
pub struct ExplainRequest {
    pub file: PathBuf,
    pub line: usize,
    pub method: String,
    pub expected: Vec<String>,
    pub sequence: bool,
    pub test: Option<String>,
}

/// Result of an explain run, serialized for `--json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainReport {
    pub file: PathBuf,
    pub line: usize,
    pub method: String,
    pub context: Option<String>,
}

impl ExplainReport {
    /// Human-readable form: the context line or a placeholder
    pub fn render_text(&self) -> &str {
        match self.context.as_deref() {
            Some("") | None => NO_CONTEXT,
            Some(context) => context,
        }
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize explain report")
    }
}

/// Run the resolver for `request` with the resolver section of `config`
pub fn explain(request: &ExplainRequest, config: &Config) -> ExplainReport {
    let expected = parse_expected(&request.expected, request.sequence);
    let call_site = CallSite::new(
        &request.file,
        request.line,
        request.test.as_deref().unwrap_or(UNKNOWN_TEST),
        &request.method,
    );
    tracing::debug!(call_site = %call_site, expected = ?expected, "Explaining call site");

    let resolver = CallerContextResolver::new(config.resolver.clone());
    ExplainReport {
        file: request.file.clone(),
        line: request.line,
        method: request.method.clone(),
        context: resolver.resolve(&expected, &call_site),
    }
}

/// Build the expected value from raw `--expected` arguments
///
/// A single value is a scalar unless `sequence` is set. No values at all is
/// an empty sequence, which accepts every candidate.
pub fn parse_expected(values: &[String], sequence: bool) -> Expected {
    match values {
        [single] if !sequence => Expected::Scalar(parse_scalar(single)),
        _ => Expected::Sequence(values.iter().map(|v| parse_scalar(v)).collect()),
    }
}

/// Interpret one command-line value the way a literal would be written
pub fn parse_scalar(raw: &str) -> Scalar {
    match raw {
        "null" => return Scalar::Null,
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i128>() {
        return Scalar::Int(int);
    }
    if looks_like_float(raw) {
        if let Ok(float) = raw.parse::<f64>() {
            return Scalar::Float(float);
        }
    }
    if let Some(inner) = quoted(raw, '\'') {
        let mut chars = inner.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Scalar::Char(c);
        }
    }
    if let Some(inner) = quoted(raw, '"') {
        return Scalar::Str(inner.to_string());
    }
    Scalar::Str(raw.to_string())
}

// Keeps words such as "inf" or "NaN" as strings
fn looks_like_float(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

fn quoted(raw: &str, quote: char) -> Option<&str> {
    raw.strip_prefix(quote)?.strip_suffix(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_scalar_kinds() {
        assert_eq!(parse_scalar("42"), Scalar::Int(42));
        assert_eq!(parse_scalar("-7"), Scalar::Int(-7));
        assert_eq!(parse_scalar("2.5"), Scalar::Float(2.5));
        assert_eq!(parse_scalar("1e3"), Scalar::Float(1000.0));
        assert_eq!(parse_scalar("true"), Scalar::Bool(true));
        assert_eq!(parse_scalar("null"), Scalar::Null);
        assert_eq!(parse_scalar("'x'"), Scalar::Char('x'));
        assert_eq!(parse_scalar("\"42\""), Scalar::Str("42".to_string()));
        assert_eq!(parse_scalar("ada"), Scalar::Str("ada".to_string()));
    }

    #[test]
    fn test_non_numeric_words_stay_strings() {
        assert_eq!(parse_scalar("inf"), Scalar::Str("inf".to_string()));
        assert_eq!(parse_scalar("NaN"), Scalar::Str("NaN".to_string()));
        assert_eq!(parse_scalar("'ab'"), Scalar::Str("'ab'".to_string()));
    }

    #[test]
    fn test_parse_expected_shapes() {
        let one = vec!["5".to_string()];
        let two = vec!["1".to_string(), "9".to_string()];

        assert_eq!(parse_expected(&one, false), Expected::Scalar(Scalar::Int(5)));
        assert_eq!(
            parse_expected(&one, true),
            Expected::Sequence(vec![Scalar::Int(5)])
        );
        assert_eq!(
            parse_expected(&two, false),
            Expected::Sequence(vec![Scalar::Int(1), Scalar::Int(9)])
        );
        assert_eq!(parse_expected(&[], false), Expected::none());
    }

    #[test]
    fn test_render_text_placeholder() {
        let report = ExplainReport {
            file: PathBuf::from("tests/orders.rs"),
            line: 3,
            method: "be".to_string(),
            context: Some(String::new()),
        };
        assert_eq!(report.render_text(), NO_CONTEXT);
    }
}
