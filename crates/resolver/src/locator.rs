//! Syntax locator
//!
//! Parses one source file with tree-sitter and extracts the nodes whose span
//! lies entirely within a single line.

use std::ops::Range;
use tree_sitter::{Node, Parser, Tree};
use verdict_core::error::{Error, Result};

/// One parsed source file
///
/// Built fresh for every resolution and dropped with it.
pub struct ParsedSource {
    text: String,
    tree: Tree,
    line_starts: Vec<usize>,
}

impl ParsedSource {
    /// Parse Rust source text
    ///
    /// tree-sitter recovers from syntax errors, so only a missing tree is a
    /// parse failure. Error nodes are tolerated: the grammar can lag behind
    /// syntax that rustc already accepts.
    pub fn parse(text: String, file: &str) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::parse(file, format!("Failed to set Rust language: {e}")))?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| Error::parse(file, "Failed to parse source code"))?;

        if tree.root_node().has_error() {
            tracing::debug!(file = file, "Source contains syntax errors, continuing");
        }

        let line_starts = line_starts(&text);
        Ok(Self {
            text,
            tree,
            line_starts,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Byte span of a 1-based line, excluding its line terminator
    pub fn line_span(&self, line_number: usize) -> Option<Range<usize>> {
        let index = line_number.checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let mut end = match self.line_starts.get(index + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Some(start..end)
    }

    /// Every node whose span is contained in the given 1-based line
    ///
    /// Nodes come back in pre-order, which is source order for nodes that
    /// start at different offsets. An out-of-range line yields nothing.
    pub fn nodes_on_line(&self, line_number: usize) -> Vec<Node<'_>> {
        let Some(span) = self.line_span(line_number) else {
            return Vec::new();
        };

        let mut nodes = Vec::new();
        let mut cursor = self.tree.walk();
        loop {
            let node = cursor.node();
            let intersects = node.start_byte() <= span.end && node.end_byte() >= span.start;
            let contained = node.start_byte() >= span.start && node.end_byte() <= span.end;

            if contained && node.end_byte() > node.start_byte() {
                nodes.push(node);
            }

            // Only descend into nodes that reach the line
            if intersects && cursor.goto_first_child() {
                continue;
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return nodes;
                }
            }
        }
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedSource {
        ParsedSource::parse(text.to_string(), "test.rs").unwrap()
    }

    #[test]
    fn test_line_span() {
        let source = parse("fn a() {}\r\nfn b() {}\nfn c() {}");

        assert_eq!(source.line_span(1), Some(0..9));
        assert_eq!(source.line_span(2), Some(11..20));
        assert_eq!(source.line_span(3), Some(21..30));
        assert_eq!(source.line_span(0), None);
        assert_eq!(source.line_span(4), None);
    }

    #[test]
    fn test_nodes_on_line_are_contained() {
        let text = "fn t() {\n    let x = a.should().be(1);\n}\n";
        let source = parse(text);

        let nodes = source.nodes_on_line(2);
        assert!(!nodes.is_empty());
        let span = source.line_span(2).unwrap();
        for node in &nodes {
            assert!(node.start_byte() >= span.start && node.end_byte() <= span.end);
        }
        // The enclosing function spans three lines and is excluded
        assert!(nodes.iter().all(|n| n.kind() != "function_item"));
        assert!(nodes.iter().any(|n| n.kind() == "call_expression"));
    }

    #[test]
    fn test_nodes_on_line_out_of_range() {
        let source = parse("fn t() {}\n");
        assert!(source.nodes_on_line(42).is_empty());
        assert!(source.nodes_on_line(0).is_empty());
    }

    #[test]
    fn test_malformed_source_still_parses() {
        let source = parse("fn (((( {{ ]] let");
        assert!(source.root().has_error());
    }
}
