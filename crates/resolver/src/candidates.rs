//! Candidate matcher
//!
//! Finds the method calls on a line whose invoked member is the validation
//! method, e.g. every `.be(..)` call.

use crate::node_text;
use std::sync::OnceLock;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

/// Rust method call query
///
/// Captures:
/// - @call: the whole call expression
/// - @method: the invoked member name, also under a turbofish (`be::<u8>(..)`)
const RUST_METHOD_CALL_QUERY: &str = r#"
[
  (call_expression
    function: (field_expression
      field: (field_identifier) @method)) @call

  (call_expression
    function: (generic_function
      function: (field_expression
        field: (field_identifier) @method))) @call
]
"#;

fn get_method_call_query() -> Option<&'static Query> {
    static QUERY: OnceLock<Option<Query>> = OnceLock::new();
    QUERY
        .get_or_init(|| {
            let language = tree_sitter_rust::LANGUAGE.into();
            match Query::new(&language, RUST_METHOD_CALL_QUERY) {
                Ok(q) => Some(q),
                Err(e) => {
                    tracing::warn!(
                        query = "RUST_METHOD_CALL_QUERY",
                        error = %e,
                        "Failed to compile tree-sitter query - line-anchored matching disabled"
                    );
                    None
                }
            }
        })
        .as_ref()
}

/// A method call whose member name matched the validation method
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'t> {
    /// The `call_expression` node
    pub call: Node<'t>,
    /// The `field_expression` naming the invoked member
    pub member: Node<'t>,
}

impl<'t> Candidate<'t> {
    /// Build a candidate if `node` is a call of `method_name`
    pub fn from_call(node: Node<'t>, source: &str, method_name: &str) -> Option<Self> {
        if node.kind() != "call_expression" {
            return None;
        }
        let mut function = node.child_by_field_name("function")?;
        if function.kind() == "generic_function" {
            function = function.child_by_field_name("function")?;
        }
        if function.kind() != "field_expression" {
            return None;
        }
        let field = function.child_by_field_name("field")?;
        (node_text(field, source) == method_name).then_some(Self {
            call: node,
            member: function,
        })
    }

    /// Expression the validation method was called on
    pub fn receiver(&self) -> Option<Node<'t>> {
        self.member.child_by_field_name("value")
    }

    /// Positional argument expressions, comments excluded
    pub fn arguments(&self) -> Vec<Node<'t>> {
        let Some(arguments) = self.call.child_by_field_name("arguments") else {
            return Vec::new();
        };
        let mut cursor = arguments.walk();
        arguments
            .named_children(&mut cursor)
            .filter(|n| !matches!(n.kind(), "line_comment" | "block_comment" | "attribute_item"))
            .collect()
    }
}

/// Calls of `method_name` among nodes contained in the target line
///
/// Returned in source order.
pub fn match_candidates<'t>(
    nodes: &[Node<'t>],
    source: &str,
    method_name: &str,
) -> Vec<Candidate<'t>> {
    let mut candidates: Vec<Candidate<'t>> = nodes
        .iter()
        .filter_map(|node| Candidate::from_call(*node, source, method_name))
        .collect();
    candidates.sort_by_key(|c| c.call.start_byte());
    candidates
}

/// Calls of `method_name` anchored on the given 0-based row
///
/// Covers fluent chains split over several lines, where the call expression
/// starts on an earlier line than its member name. rustc reports the line of
/// the member name, so only that row anchors a call.
pub fn match_anchored_candidates<'t>(
    root: Node<'t>,
    source: &str,
    method_name: &str,
    row: usize,
) -> Vec<Candidate<'t>> {
    let Some(query) = get_method_call_query() else {
        return Vec::new();
    };
    let (Some(call_index), Some(method_index)) = (
        query.capture_index_for_name("call"),
        query.capture_index_for_name("method"),
    ) else {
        return Vec::new();
    };

    let mut cursor = QueryCursor::new();
    let mut candidates = Vec::new();
    let mut matches = cursor.matches(query, root, source.as_bytes());
    while let Some(m) = matches.next() {
        let call = m.captures.iter().find(|c| c.index == call_index);
        let method = m.captures.iter().find(|c| c.index == method_index);
        let (Some(call), Some(method)) = (call, method) else {
            continue;
        };
        if method.node.start_position().row != row {
            continue;
        }
        if let Some(candidate) = Candidate::from_call(call.node, source, method_name) {
            candidates.push(candidate);
        }
    }

    candidates.sort_by_key(|c| c.call.start_byte());
    candidates.dedup_by_key(|c| c.call.id());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ParsedSource;

    fn names(candidates: &[Candidate], source: &str) -> Vec<String> {
        candidates
            .iter()
            .map(|c| node_text(c.call, source).to_string())
            .collect()
    }

    #[test]
    fn test_matches_method_calls_in_source_order() {
        let text = "fn t() {\n    a.should().be(1); b.should().not_be(2); c.should().be(3);\n}\n";
        let parsed = ParsedSource::parse(text.to_string(), "t.rs").unwrap();

        let nodes = parsed.nodes_on_line(2);
        let found = match_candidates(&nodes, parsed.text(), "be");
        assert_eq!(
            names(&found, parsed.text()),
            vec!["a.should().be(1)", "c.should().be(3)"]
        );
    }

    #[test]
    fn test_free_function_calls_are_not_candidates() {
        let text = "fn t() {\n    be(1); assert_eq!(x, 1);\n}\n";
        let parsed = ParsedSource::parse(text.to_string(), "t.rs").unwrap();

        let nodes = parsed.nodes_on_line(2);
        assert!(match_candidates(&nodes, parsed.text(), "be").is_empty());
    }

    #[test]
    fn test_turbofish_call_is_candidate() {
        let text = "fn t() {\n    a.should().be::<u8>(1);\n}\n";
        let parsed = ParsedSource::parse(text.to_string(), "t.rs").unwrap();

        let nodes = parsed.nodes_on_line(2);
        let found = match_candidates(&nodes, parsed.text(), "be");
        assert_eq!(found.len(), 1);
        assert_eq!(node_text(found[0].receiver().unwrap(), parsed.text()), "a.should()");
    }

    #[test]
    fn test_arguments_skip_comments() {
        let text = "fn t() {\n    a.should().be_between(1, /* upper */ 2);\n}\n";
        let parsed = ParsedSource::parse(text.to_string(), "t.rs").unwrap();

        let nodes = parsed.nodes_on_line(2);
        let found = match_candidates(&nodes, parsed.text(), "be_between");
        let args: Vec<&str> = found[0]
            .arguments()
            .iter()
            .map(|n| node_text(*n, parsed.text()))
            .collect();
        assert_eq!(args, vec!["1", "2"]);
    }

    #[test]
    fn test_anchored_candidates_for_multiline_chain() {
        let text = "fn t() {\n    order\n        .total\n        .should()\n        .be(42);\n}\n";
        let parsed = ParsedSource::parse(text.to_string(), "t.rs").unwrap();

        assert!(match_candidates(&parsed.nodes_on_line(5), parsed.text(), "be").is_empty());

        let found = match_anchored_candidates(parsed.root(), parsed.text(), "be", 4);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].call.start_position().row, 1);

        assert!(match_anchored_candidates(parsed.root(), parsed.text(), "be", 1).is_empty());
        assert!(match_anchored_candidates(parsed.root(), parsed.text(), "be", 2).is_empty());
    }

    #[test]
    fn test_query_is_valid_tree_sitter() {
        assert!(get_method_call_query().is_some());
    }
}
