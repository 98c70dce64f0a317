// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).map(|token| token.kind).collect()
}

#[test]
fn test_empty_input() {
    assert!(kinds("").is_empty());
}

#[test]
fn test_instruction_line() {
    use TokenKind::*;
    assert_eq!(
        kinds("h q[0]\n"),
        vec![
            Ident,
            Whitespace,
            Ident,
            OpenBracket,
            Literal {
                kind: LiteralKind::Int
            },
            CloseBracket,
            Newline,
        ]
    );
}

#[test]
fn test_comment_and_newline() {
    use TokenKind::*;
    assert_eq!(kinds("# note\nx"), vec![LineComment, Newline, Ident]);
}

#[test]
fn test_float_shapes() {
    let kinds = kinds("1.0 2. 3e4 5e+ 6");
    let literals: Vec<_> = kinds
        .iter()
        .filter_map(|kind| match kind {
            TokenKind::Literal { kind } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        literals,
        vec![
            LiteralKind::Float {
                empty_exponent: false
            },
            LiteralKind::Float {
                empty_exponent: false
            },
            LiteralKind::Float {
                empty_exponent: false
            },
            LiteralKind::Float {
                empty_exponent: true
            },
            LiteralKind::Int,
        ]
    );
}

#[test]
fn test_version_number_splits_at_second_dot() {
    use TokenKind::*;
    assert_eq!(
        kinds("1.0.3"),
        vec![
            Literal {
                kind: LiteralKind::Float {
                    empty_exponent: false
                }
            },
            Dot,
            Literal {
                kind: LiteralKind::Int
            },
        ]
    );
}

#[test]
fn test_strings() {
    use TokenKind::*;
    assert_eq!(
        kinds(r#""ok" "unterminated"#),
        vec![
            Literal {
                kind: LiteralKind::Str { terminated: true }
            },
            Whitespace,
            Literal {
                kind: LiteralKind::Str { terminated: false }
            },
        ]
    );
}

#[test]
fn test_punctuation() {
    use TokenKind::*;
    assert_eq!(
        kinds(".sub(3) | @a.b, c-x"),
        vec![
            Dot, Ident, OpenParen,
            Literal { kind: LiteralKind::Int },
            CloseParen, Whitespace, Pipe, Whitespace, At, Ident, Dot, Ident,
            Comma, Whitespace, Ident, Minus, Ident,
        ]
    );
}

#[test]
fn test_token_lengths_cover_input() {
    let input = "map q[0], alias # tail\n";
    let total: u32 = tokenize(input).map(|token| token.len).sum();
    assert_eq!(total as usize, input.len());
}

#[test]
fn test_scan_json_literal() {
    assert_eq!(scan_json_literal(r#"{"a": 1}"#), Some(8));
    assert_eq!(scan_json_literal(r#"{"a": {"b": []}} tail"#), Some(16));
    // Braces inside strings do not count.
    assert_eq!(scan_json_literal(r#"{"a": "}"}"#), Some(10));
    assert_eq!(scan_json_literal("{unbalanced"), None);
    assert_eq!(scan_json_literal("no brace"), None);
}
