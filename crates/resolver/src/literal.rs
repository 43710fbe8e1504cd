//! Literal argument evaluation
//!
//! Converts a literal argument written in source text to the type of the
//! runtime expected value and compares the two.

use crate::node_text;
use tree_sitter::Node;
use verdict_core::expected::Scalar;

/// Outcome of comparing one argument against one expected value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralMatch {
    /// The argument is not a literal and cannot be checked
    NotLiteral,
    Equal,
    NotEqual,
}

/// Literal value as written in source
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Integer(String),
    Float(String),
    Bool(bool),
    Char(String),
    Str(String),
    RawStr(String),
}

/// Compare an argument expression with an expected value
pub fn compare(argument: Node, source: &str, expected: &Scalar) -> LiteralMatch {
    let Some(literal) = read_literal(argument, source) else {
        return LiteralMatch::NotLiteral;
    };
    if literal_equals(&literal, expected) {
        LiteralMatch::Equal
    } else {
        LiteralMatch::NotEqual
    }
}

fn read_literal(node: Node, source: &str) -> Option<Literal> {
    let text = node_text(node, source);
    match node.kind() {
        "integer_literal" => Some(Literal::Integer(text.to_string())),
        "float_literal" => Some(Literal::Float(text.to_string())),
        "boolean_literal" => Some(Literal::Bool(text == "true")),
        "char_literal" => Some(Literal::Char(text.to_string())),
        "string_literal" => Some(Literal::Str(text.to_string())),
        "raw_string_literal" => Some(Literal::RawStr(text.to_string())),
        "unary_expression" | "negative_literal" => {
            // `-5` is a unary minus applied to a numeric literal
            let operand = node.named_child(node.named_child_count().checked_sub(1)?)?;
            if !text.trim_start().starts_with('-') {
                return None;
            }
            match read_literal(operand, source)? {
                Literal::Integer(digits) => Some(Literal::Integer(format!("-{digits}"))),
                Literal::Float(digits) => Some(Literal::Float(format!("-{digits}"))),
                _ => None,
            }
        }
        "parenthesized_expression" => read_literal(node.named_child(0)?, source),
        _ => None,
    }
}

fn literal_equals(literal: &Literal, expected: &Scalar) -> bool {
    match (literal, expected) {
        (Literal::Integer(text), Scalar::Int(value)) => parse_integer(text) == Some(*value),
        (Literal::Integer(text), Scalar::Float(value)) => {
            parse_integer(text).map(|i| i as f64) == Some(*value)
        }
        (Literal::Float(text), Scalar::Float(value)) => parse_float(text) == Some(*value),
        (Literal::Bool(b), Scalar::Bool(value)) => b == value,
        (Literal::Char(text), Scalar::Char(value)) => {
            let Some(unescaped) = strip_delimiters(text, '\'').and_then(unescape) else {
                return false;
            };
            let mut chars = unescaped.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c == *value)
        }
        (Literal::Str(text), Scalar::Str(value)) => strip_delimiters(text, '"')
            .and_then(unescape)
            .is_some_and(|s| s == *value),
        (Literal::RawStr(text), Scalar::Str(value)) => {
            raw_contents(text).is_some_and(|s| s == value)
        }
        // Different kinds, or a literal against an absent value
        _ => false,
    }
}

/// Parse a Rust integer literal: sign, radix prefix, underscores and suffix
fn parse_integer(text: &str) -> Option<i128> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    let (radix, digits) = if let Some(d) = body.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = body.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = body.strip_prefix("0b") {
        (2, d)
    } else {
        (10, body)
    };

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    // Type suffixes start with `i` or `u`, neither of which is a hex digit
    let digits = match digits.find(['i', 'u']) {
        Some(pos) => &digits[..pos],
        None => digits.as_str(),
    };

    let magnitude = i128::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_' && !c.is_whitespace()).collect();
    let cleaned = cleaned
        .strip_suffix("f32")
        .or_else(|| cleaned.strip_suffix("f64"))
        .unwrap_or(&cleaned);
    cleaned.parse().ok()
}

fn strip_delimiters(text: &str, delimiter: char) -> Option<&str> {
    text.strip_prefix(delimiter)?.strip_suffix(delimiter)
}

fn raw_contents(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('r')?;
    let hashes = rest.len() - rest.trim_start_matches('#').len();
    let rest = &rest[hashes..];
    let rest = rest.strip_prefix('"')?;
    let rest = rest.strip_suffix(&"#".repeat(hashes))?;
    rest.strip_suffix('"')
}

/// Resolve the escape sequences of a string or char literal body
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(char::from(u8::from_str_radix(&hex, 16).ok()?));
            }
            'u' => {
                if chars.next()? != '{' {
                    return None;
                }
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                let hex: String = hex.chars().filter(|c| *c != '_').collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            // Line continuation skips the newline and leading whitespace
            '\n' => {
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
            }
            _ => return None,
        }
    }
    Some(out)
}
