//! Property-based tests with proptest.
//!
//! Generate random token soups and expression chains and check the
//! lexer and parser invariants that must hold for any input.

use proptest::prelude::*;
use vanadium::{Node, TokenKind, parse_str, tokenize};

// -- Leaf strategies --

/// Identifier that is never a keyword: the `v_` prefix is reserved
/// for generated names.
fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_map(|s| format!("v_{s}"))
}

fn integer() -> impl Strategy<Value = String> {
    "[0-9]{1,6}"
}

fn operator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")]
}

/// One lexable fragment, followed by some whitespace.
fn fragment() -> impl Strategy<Value = String> {
    let atom = prop_oneof![
        identifier(),
        integer(),
        "[0-9]{1,3}\\.[0-9]{0,3}",
        "\"[a-z ]{0,8}\"",
        Just("let".to_string()),
        Just("func".to_string()),
        "[-+*/^=<>&|(){}\\[\\]:.,;]",
        "@@[a-z ]{0,8}\n",
        "@\\*[a-z \n]{0,8}\\*@",
    ];
    (atom, "[ \t\n]{1,2}").prop_map(|(a, ws)| format!("{a}{ws}"))
}

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn spans_cover_their_lexemes(src in source()) {
        let tokens = tokenize(&src).expect("generated source should lex");
        for token in &tokens {
            prop_assert_eq!(&src[token.span.start..token.span.end], token.lexeme.as_str());
        }
    }

    #[test]
    fn exactly_one_trailing_eoi(src in source()) {
        let tokens = tokenize(&src).expect("generated source should lex");
        let slice = tokens.as_slice();
        prop_assert_eq!(slice.iter().filter(|t| t.is_eoi()).count(), 1);
        prop_assert!(slice.last().is_some_and(|t| t.kind == TokenKind::Eoi));
        let eoi = slice[slice.len() - 1].span;
        prop_assert_eq!((eoi.start, eoi.end), (src.len(), src.len()));
    }

    #[test]
    fn tokenize_is_deterministic(src in source()) {
        let a = tokenize(&src).expect("lex").into_inner();
        let b = tokenize(&src).expect("lex").into_inner();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn one_identifier_per_line(names in prop::collection::vec(identifier(), 1..8)) {
        let src = names.join("\n");
        let tokens = tokenize(&src).expect("lex");
        for (i, name) in names.iter().enumerate() {
            let token = &tokens.as_slice()[i];
            prop_assert_eq!(token.kind, TokenKind::Ident);
            prop_assert_eq!(&token.lexeme, name);
            prop_assert_eq!((token.span.line, token.span.column), (i + 1, 1));
        }
    }

    #[test]
    fn same_precedence_chains_fold_left(
        first in integer(),
        rest in prop::collection::vec(
            (prop_oneof![Just("+"), Just("-")], integer()),
            1..6,
        ),
    ) {
        let mut src = first.clone();
        let mut expected = first;
        for (op, operand) in &rest {
            src.push_str(&format!(" {op} {operand}"));
            expected = format!("({op} {expected} {operand})");
        }

        let nodes = parse_str(&src).expect("chain should parse").into_inner();
        let Node::ImplicitReturn(inner) = &nodes[0] else {
            panic!("expected expression statement");
        };
        prop_assert_eq!(inner.to_string(), expected);
        prop_assert!(nodes[1].is_end_of_input());
    }

    #[test]
    fn factor_binds_tighter_than_term(
        a in integer(),
        b in integer(),
        c in integer(),
        op in operator(),
    ) {
        let src = format!("{a} {op} {b} * {c}");
        let nodes = parse_str(&src).expect("should parse").into_inner();
        let expected = if matches!(op, "*" | "/") {
            format!("(* ({op} {a} {b}) {c})")
        } else {
            format!("({op} {a} (* {b} {c}))")
        };
        prop_assert_eq!(nodes[0].to_string(), format!("(implicit-return {expected})"));
    }
}
