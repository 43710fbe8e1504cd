//! Identifier chain builder
//!
//! Turns the receiver of the resolved call into a dotted name such as
//! `order.total`.

use crate::candidates::Candidate;
use crate::node_text;
use tree_sitter::Node;

/// Node kinds whose names do not describe the asserted value
const SKIPPED_SUBTREES: &[&str] = &[
    "arguments",
    "type_arguments",
    "token_tree",
    "closure_expression",
    "block",
];

/// Dotted chain of simple names in the candidate's receiver
///
/// Only names in front of the fluent entry point (or its `_with` form that
/// takes an explicit context) are kept, so modifiers such as `because` in
/// between do not leak into the chain. Without an entry point every name
/// except the validation method is kept. A receiver without names (e.g. a
/// literal) yields an empty string.
pub fn build_chain(
    candidate: &Candidate,
    source: &str,
    validation_method_name: &str,
    entry_point: &str,
) -> String {
    let Some(receiver) = candidate.receiver() else {
        return String::new();
    };

    let mut names = Vec::new();
    collect_names(receiver, source, &mut names);

    if let Some(end) = names.iter().position(|name| is_entry_point(name, entry_point)) {
        names.truncate(end);
    }
    names.retain(|name| *name != validation_method_name);
    names.join(".")
}

fn is_entry_point(name: &str, entry_point: &str) -> bool {
    match name.strip_prefix(entry_point) {
        Some(rest) => rest.is_empty() || rest == "_with",
        None => false,
    }
}

fn collect_names<'s>(node: Node, source: &'s str, names: &mut Vec<&'s str>) {
    if SKIPPED_SUBTREES.contains(&node.kind()) {
        return;
    }
    if matches!(node.kind(), "identifier" | "field_identifier") {
        names.push(node_text(node, source));
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_names(child, source, names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::match_candidates;
    use crate::locator::ParsedSource;
    use pretty_assertions::assert_eq;

    fn chain(line: &str, method: &str, entry_point: &str) -> String {
        let parsed = ParsedSource::parse(format!("fn t() {{ {line} }}"), "t.rs").unwrap();
        let nodes = parsed.nodes_on_line(1);
        let candidates = match_candidates(&nodes, parsed.text(), method);
        build_chain(&candidates[0], parsed.text(), method, entry_point)
    }

    #[test]
    fn test_simple_receiver() {
        assert_eq!(chain("order_total.should().be(42);", "be", "should"), "order_total");
    }

    #[test]
    fn test_explicit_context_entry_point() {
        assert_eq!(chain("total.should_with(ctx).be(6);", "be", "should"), "total");
    }

    #[test]
    fn test_modifiers_after_entry_point_dropped() {
        assert_eq!(
            chain("reading.should().because(\"calibrated\").be_between(1, 2);", "be_between", "should"),
            "reading"
        );
    }

    #[test]
    fn test_field_chain() {
        assert_eq!(chain("order.total.should().be(42);", "be", "should"), "order.total");
    }

    #[test]
    fn test_method_calls_keep_names_drop_arguments() {
        assert_eq!(
            chain("order.lines(idx).first().should().be(1);", "be", "should"),
            "order.lines.first"
        );
    }

    #[test]
    fn test_custom_entry_point() {
        assert_eq!(chain("orderTotal.Should().Be(42);", "Be", "Should"), "orderTotal");
    }

    #[test]
    fn test_self_is_not_a_name() {
        assert_eq!(chain("self.total.should().be(1);", "be", "should"), "total");
    }

    #[test]
    fn test_literal_receiver_yields_empty_chain() {
        assert_eq!(chain("\"text\".should().be(\"other\");", "be", "should"), "");
    }

    #[test]
    fn test_path_and_macro_receivers() {
        assert_eq!(
            chain("Order::default().total.should().be(0);", "be", "should"),
            "Order.default.total"
        );
        assert_eq!(chain("vec![a, b].should().have_len(2);", "have_len", "should"), "vec");
    }
}
