//! Lexer behaviour and error tests.

use vanadium::{Error, TokenKind, tokenize};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("tokenize")
        .iter()
        .map(|t| t.kind)
        .collect()
}

fn lexemes(input: &str) -> Vec<String> {
    tokenize(input)
        .expect("tokenize")
        .iter()
        .map(|t| t.lexeme.clone())
        .collect()
}

// -----------------------------------------------------------
// Token classes.
// -----------------------------------------------------------

#[test]
fn lex_only_whitespace() {
    assert_eq!(kinds("  \t\r\n\n  "), [TokenKind::Eoi]);
}

#[test]
fn lex_declaration() {
    assert_eq!(
        kinds("let x = 42;"),
        [
            TokenKind::Let,
            TokenKind::Ident,
            TokenKind::Op,
            TokenKind::Int,
            TokenKind::Eos,
            TokenKind::Eoi,
        ]
    );
}

#[test]
fn lex_numbers() {
    assert_eq!(lexemes("42 3.14 3."), ["42", "3.14", "3.", ""]);
    assert_eq!(
        kinds("42 3.14 3."),
        [
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Eoi
        ]
    );
}

#[test]
fn lex_keyword_needs_whole_word() {
    assert_eq!(kinds("func"), [TokenKind::Func, TokenKind::Eoi]);
    assert_eq!(kinds("function"), [TokenKind::Ident, TokenKind::Eoi]);
    assert_eq!(kinds("letter"), [TokenKind::Ident, TokenKind::Eoi]);
}

#[test]
fn lex_every_keyword() {
    for (word, kind) in vanadium::token::KEYWORDS {
        assert_eq!(kinds(word), [*kind, TokenKind::Eoi], "keyword {word}");
    }
}

#[test]
fn lex_identifier_with_markers() {
    assert_eq!(lexemes("ok? fail! snake_case"), ["ok?", "fail!", "snake_case", ""]);
}

#[test]
fn lex_operators_are_single_chars() {
    assert_eq!(lexemes("a += b"), ["a", "+", "=", "b", ""]);
    assert_eq!(
        kinds("1 < 2 ^ 3 | 4"),
        [
            TokenKind::Int,
            TokenKind::Op,
            TokenKind::Int,
            TokenKind::Op,
            TokenKind::Int,
            TokenKind::Op,
            TokenKind::Int,
            TokenKind::Eoi,
        ]
    );
}

#[test]
fn lex_punctuation() {
    let tokens = tokenize("f(a, b.c)[0]{}:").expect("tokenize");
    let puncts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Punct)
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(puncts, ["(", ",", ".", ")", "[", "]", "{", "}", ":"]);
}

#[test]
fn lex_string_literal() {
    let tokens = tokenize("\"hello world\"").expect("tokenize");
    let token = tokens.current();
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.lexeme, "\"hello world\"");
    assert_eq!(token.string_value(), "hello world");
}

#[test]
fn lex_string_spans_lines() {
    let tokens = tokenize("\"a\nb\" x").expect("tokenize");
    assert_eq!(tokens.current().lexeme, "\"a\nb\"");
    let x = tokens.peek(1);
    assert_eq!((x.span.line, x.span.column), (2, 4));
}

// -----------------------------------------------------------
// Comments.
// -----------------------------------------------------------

#[test]
fn lex_line_comment() {
    assert_eq!(lexemes("a @@ the rest\nb"), ["a", "b", ""]);
}

#[test]
fn lex_block_comment() {
    assert_eq!(lexemes("a @* one\ntwo *@ b"), ["a", "b", ""]);
    let tokens = tokenize("@* x\ny *@ z").expect("tokenize");
    assert_eq!(tokens.current().span.line, 2);
}

#[test]
fn lex_comment_at_end_of_input() {
    assert_eq!(kinds("x @@"), [TokenKind::Ident, TokenKind::Eoi]);
}

// -----------------------------------------------------------
// Positions.
// -----------------------------------------------------------

#[test]
fn lex_lines_and_columns() {
    let tokens = tokenize("a\nb\n  c").expect("tokenize");
    let positions: Vec<(usize, usize)> = tokens
        .iter()
        .map(|t| (t.span.line, t.span.column))
        .collect();
    assert_eq!(positions, [(1, 1), (2, 1), (3, 3), (3, 4)]);
}

#[test]
fn lex_spans_match_source() {
    let source = "let s = \"hi\"; @@ note\nfunc f(): int { 1.5 }";
    let tokens = tokenize(source).expect("tokenize");
    for token in &tokens {
        assert_eq!(&source[token.span.start..token.span.end], token.lexeme);
    }
}

#[test]
fn lex_eoi_is_last_and_unique() {
    let tokens = tokenize("a b c").expect("tokenize");
    let eois = tokens.iter().filter(|t| t.is_eoi()).count();
    assert_eq!(eois, 1);
    assert!(tokens.as_slice().last().is_some_and(|t| t.is_eoi()));
    assert_eq!(tokens.as_slice()[3].span.start, 5);
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn lex_unexpected_char() {
    let err = tokenize("let x = 1 # 2").unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedChar {
            ch: '#',
            offset: 10,
            line: 1,
            column: 11,
        }
    ));
}

#[test]
fn lex_unexpected_non_ascii() {
    let err = tokenize("x\n  é").unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedChar {
            ch: 'é',
            line: 2,
            column: 3,
            ..
        }
    ));
}

#[test]
fn lex_unterminated_string() {
    let err = tokenize("x = \"abc").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEndOfInput { .. }));
    assert_eq!(err.span().start, 4);
}

#[test]
fn lex_unterminated_block_comment() {
    let err = tokenize("x @* never closed").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEndOfInput { .. }));
    assert!(err.to_string().contains("unterminated block comment"));
}

#[test]
fn lex_is_deterministic() {
    let source = "static const x = f(1, 2.5) unless y ifso \"z\";";
    let a: Vec<_> = tokenize(source).expect("tokenize").into_inner();
    let b: Vec<_> = tokenize(source).expect("tokenize").into_inner();
    assert_eq!(a, b);
}
