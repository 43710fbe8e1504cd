//! Failure message formatting
//!
//! A failure message is newline separated:
//!
//! ```text
//! order.total          <- context line, only when resolution succeeded
//! is 41
//! but was expected
//! to be 42
//! because must match   <- only when a reason was given
//! ```

use crate::config::FormatterConfig;

/// Turns the pieces of a failed check into a human-readable message
pub trait MessageFormatter: Send + Sync {
    fn format(
        &self,
        context: Option<&str>,
        actual: &str,
        expected: &str,
        reason: Option<&str>,
    ) -> String;
}

/// Formatter used unless another one is bound
#[derive(Debug, Clone)]
pub struct DefaultMessageFormatter {
    max_value_len: usize,
}

impl DefaultMessageFormatter {
    pub fn new(config: &FormatterConfig) -> Self {
        Self {
            max_value_len: config.max_value_len,
        }
    }

    fn clip<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        if text.chars().count() <= self.max_value_len {
            return text.into();
        }
        let kept: String = text
            .chars()
            .take(self.max_value_len.saturating_sub(3))
            .collect();
        format!("{kept}...").into()
    }
}

impl Default for DefaultMessageFormatter {
    fn default() -> Self {
        Self::new(&FormatterConfig::default())
    }
}

impl MessageFormatter for DefaultMessageFormatter {
    fn format(
        &self,
        context: Option<&str>,
        actual: &str,
        expected: &str,
        reason: Option<&str>,
    ) -> String {
        let mut lines = Vec::with_capacity(5);
        if let Some(context) = context.filter(|c| !c.is_empty()) {
            lines.push(context.to_string());
        }
        lines.push(format!("is {}", self.clip(actual)));
        lines.push("but was expected".to_string());
        lines.push(self.clip(expected).into_owned());
        if let Some(reason) = reason.filter(|r| !r.is_empty()) {
            lines.push(format!("because {reason}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_four_lines_without_reason() {
        let message = DefaultMessageFormatter::default().format(Some("x"), "5", "to be 6", None);

        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines, vec!["x", "is 5", "but was expected", "to be 6"]);
    }

    #[test]
    fn test_reason_line_last() {
        let message = DefaultMessageFormatter::default().format(
            Some("order.total"),
            "41",
            "to be 42",
            Some("must match"),
        );

        assert_eq!(
            message,
            "order.total\nis 41\nbut was expected\nto be 42\nbecause must match"
        );
    }

    #[test]
    fn test_missing_or_empty_context_omits_line() {
        let formatter = DefaultMessageFormatter::default();
        let absent = formatter.format(None, "5", "to be 6", None);
        let empty = formatter.format(Some(""), "5", "to be 6", None);

        assert_eq!(absent, "is 5\nbut was expected\nto be 6");
        assert_eq!(absent, empty);
    }

    #[test]
    fn test_long_values_are_clipped() {
        let formatter = DefaultMessageFormatter::new(&FormatterConfig { max_value_len: 10 });
        let message = formatter.format(None, "abcdefghijklmnop", "to be short", None);

        assert_eq!(message, "is abcdefg...\nbut was expected\nto be s...");
    }
}
