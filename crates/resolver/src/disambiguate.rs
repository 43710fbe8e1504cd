//! Argument disambiguator
//!
//! Several calls of the same validation method can share a line. The one
//! that failed is the one whose literal arguments equal the runtime expected
//! value(s). Non-literal arguments cannot be checked and never disqualify.
//!
//! An expected element with no literal form (`Null`) never rules a
//! candidate in or out.
//!
//! Known limitation: a scalar expected value equal to its type's default is
//! not compared at all, since it may come from an omitted optional argument.
//! Two calls differing only in such a value resolve to the first one.

use crate::candidates::Candidate;
use crate::literal::{compare, LiteralMatch};
use tree_sitter::Node;
use verdict_core::expected::{Expected, Scalar};

/// Pick the candidate that produced the failure
///
/// Candidates must be in source order; when several survive filtering the
/// first wins, matching left-to-right evaluation on a line.
pub fn select<'t>(
    candidates: &[Candidate<'t>],
    expected: &Expected,
    source: &str,
) -> Option<Candidate<'t>> {
    candidates.iter().copied().find(|candidate| {
        let accepted = accepts(candidate, expected, source);
        tracing::trace!(
            call_start = candidate.call.start_byte(),
            accepted,
            "Checked candidate arguments"
        );
        accepted
    })
}

fn accepts(candidate: &Candidate, expected: &Expected, source: &str) -> bool {
    let arguments = candidate.arguments();
    match expected {
        Expected::Scalar(value) => {
            if value.is_default() {
                return true;
            }
            match arguments.first() {
                Some(argument) => argument_accepts(*argument, source, value),
                None => true,
            }
        }
        Expected::Sequence(values) => values
            .iter()
            .zip(sequence_arguments(arguments).iter())
            .all(|(value, argument)| argument_accepts(*argument, source, value)),
    }
}

/// Positional arguments for a sequence, looking into a lone array argument
///
/// `be_one_of(&[1, 2])` carries its sequence as one array expression.
fn sequence_arguments(arguments: Vec<Node<'_>>) -> Vec<Node<'_>> {
    if arguments.len() != 1 {
        return arguments;
    }
    let mut node = arguments[0];
    if node.kind() == "reference_expression" {
        match node.child_by_field_name("value") {
            Some(value) => node = value,
            None => return arguments,
        }
    }
    if node.kind() != "array_expression" {
        return arguments;
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| !matches!(n.kind(), "line_comment" | "block_comment"))
        .collect()
}

fn argument_accepts(argument: Node, source: &str, value: &Scalar) -> bool {
    // Values without a literal form cannot be told apart in source
    if matches!(value, Scalar::Null) {
        return true;
    }
    let outcome = compare(argument, source, value);
    tracing::trace!(
        kind = value.kind(),
        argument_start = argument.start_byte(),
        outcome = ?outcome,
        "Compared argument with expected value"
    );
    outcome != LiteralMatch::NotEqual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::match_candidates;
    use crate::locator::ParsedSource;
    use crate::node_text;
    use verdict_core::expected::ToScalar;

    fn pick(line: &str, method: &str, expected: Expected) -> Option<String> {
        let parsed = ParsedSource::parse(format!("fn t() {{ {line} }}"), "t.rs").unwrap();
        let nodes = parsed.nodes_on_line(1);
        let candidates = match_candidates(&nodes, parsed.text(), method);
        select(&candidates, &expected, parsed.text())
            .map(|c| node_text(c.call, parsed.text()).to_string())
    }

    #[test]
    fn test_scalar_picks_matching_literal() {
        assert_eq!(
            pick("a.should().be(1); b.should().be(2);", "be", Expected::scalar(2)).as_deref(),
            Some("b.should().be(2)")
        );
    }

    #[test]
    fn test_scalar_all_rejected() {
        assert_eq!(
            pick("a.should().be(1); b.should().be(2);", "be", Expected::scalar(3)),
            None
        );
    }

    #[test]
    fn test_non_literal_is_not_disqualifying() {
        assert_eq!(
            pick("a.should().be(limit);", "be", Expected::scalar(7)).as_deref(),
            Some("a.should().be(limit)")
        );
    }

    #[test]
    fn test_default_value_skips_comparison() {
        // Both accepted, first in source order wins
        assert_eq!(
            pick("a.should().be(5); b.should().be(0);", "be", Expected::scalar(0)).as_deref(),
            Some("a.should().be(5)")
        );
    }

    #[test]
    fn test_sequence_compares_in_order() {
        let line = "v.should().be_between(20, 10); w.should().be_between(10, 20);";
        assert_eq!(
            pick(line, "be_between", Expected::sequence([10, 20])).as_deref(),
            Some("w.should().be_between(10, 20)")
        );
    }

    #[test]
    fn test_sequence_with_partial_non_literals() {
        let line = "v.should().be_between(low, 99); w.should().be_between(low, 20);";
        assert_eq!(
            pick(line, "be_between", Expected::sequence([10, 20])).as_deref(),
            Some("w.should().be_between(low, 20)")
        );
    }

    #[test]
    fn test_sequence_longer_than_arguments() {
        let expected = Expected::Sequence(vec![1.to_scalar(), 2.to_scalar(), 3.to_scalar()]);
        assert_eq!(
            pick("v.should().be_one_of(&ALLOWED);", "be_one_of", expected).as_deref(),
            Some("v.should().be_one_of(&ALLOWED)")
        );
    }

    #[test]
    fn test_sequence_null_element_does_not_reject() {
        let expected = Expected::sequence([u128::MAX, 5]);
        let line = "v.should().be_one_of(&[340282366920938463463374607431768211455, 6]); \
                    w.should().be_one_of(&[340282366920938463463374607431768211455, 5]);";
        assert_eq!(
            pick(line, "be_one_of", expected).as_deref(),
            Some("w.should().be_one_of(&[340282366920938463463374607431768211455, 5])")
        );
    }

    #[test]
    fn test_sequence_inside_array_argument() {
        let line = "v.should().be_one_of(&[1, 3]); w.should().be_one_of(&[1, 2]);";
        assert_eq!(
            pick(line, "be_one_of", Expected::sequence([1, 2])).as_deref(),
            Some("w.should().be_one_of(&[1, 2])")
        );
    }

    #[test]
    fn test_argumentless_call_accepted() {
        assert_eq!(
            pick("flag.should().be_true();", "be_true", Expected::none()).as_deref(),
            Some("flag.should().be_true()")
        );
    }
}
