use std::fmt;

use crate::diagnostics::{Diagnostic, Label};
use crate::token::{Span, Token, TokenKind};

/// What the parser wanted to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Any token of this kind.
    Kind(TokenKind),
    /// A token with exactly this text.
    Lexeme(&'static str),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => write!(f, "{kind}"),
            Self::Lexeme(text) => write!(f, "'{text}'"),
        }
    }
}

/// Failure raised while lexing or parsing. Both stages stop at the
/// first error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Character that cannot start any token.
    #[error("unexpected character '{ch}' at line {line}, column {column}")]
    UnexpectedChar {
        ch: char,
        offset: usize,
        line: usize,
        column: usize,
    },

    #[error("unexpected token '{}' at {}{}", token.lexeme, token.span, note_suffix(note.as_deref()))]
    UnexpectedToken { token: Token, note: Option<String> },

    #[error(
        "expected token {expected} but got '{}' at {}{}",
        got.lexeme,
        got.span,
        note_suffix(note.as_deref())
    )]
    ExpectedToken {
        expected: Expected,
        got: Token,
        note: Option<String>,
    },

    #[error(
        "expected {} but got '{}' at {}{}",
        one_of(expected),
        got.lexeme,
        got.span,
        note_suffix(note.as_deref())
    )]
    ExpectedOneOfTokens {
        expected: Vec<Expected>,
        got: Token,
        note: Option<String>,
    },

    #[error("unexpected end of input at {span}{}", note_suffix(note.as_deref()))]
    UnexpectedEndOfInput { note: Option<String>, span: Span },

    #[error("syntax error at {span}: {detail}")]
    SyntaxError { detail: String, span: Span },

    #[error("invalid token '{}' at {}{}", token.lexeme, token.span, note_suffix(reason.as_deref()))]
    InvalidToken {
        token: Token,
        reason: Option<String>,
    },

    /// Recognized production without a grammar yet.
    #[error("{construct} declarations are not supported yet (at {})", token.span)]
    Unsupported {
        construct: &'static str,
        token: Token,
    },
}

fn note_suffix(note: Option<&str>) -> String {
    note.map_or_else(String::new, |n| format!(": {n}"))
}

fn one_of(expected: &[Expected]) -> String {
    match expected {
        [single] => format!("token {single}"),
        _ => {
            let parts: Vec<String> = expected.iter().map(ToString::to_string).collect();
            format!("either {}", parts.join(", "))
        }
    }
}

impl Error {
    /// Error for `token` found where it does not belong. End of input
    /// gets its own variant so callers can tell truncated input apart.
    #[must_use]
    pub fn unexpected(token: &Token, note: impl Into<String>) -> Self {
        if token.is_eoi() {
            Self::UnexpectedEndOfInput {
                note: Some(note.into()),
                span: token.span,
            }
        } else {
            Self::UnexpectedToken {
                token: token.clone(),
                note: Some(note.into()),
            }
        }
    }

    #[must_use]
    pub fn expected(expected: Expected, got: &Token) -> Self {
        Self::ExpectedToken {
            expected,
            got: got.clone(),
            note: None,
        }
    }

    /// Short headline for diagnostics.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::UnexpectedChar { .. } => "Unexpected character",
            Self::UnexpectedToken { .. } => "Unexpected token",
            Self::ExpectedToken { .. } => "Expected token",
            Self::ExpectedOneOfTokens { .. } => "Expected one of tokens",
            Self::UnexpectedEndOfInput { .. } => "Unexpected end of input",
            Self::SyntaxError { .. } => "Syntax error",
            Self::InvalidToken { .. } => "Invalid token",
            Self::Unsupported { .. } => "Unsupported construct",
        }
    }

    /// Where the error occurred.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedChar {
                ch,
                offset,
                line,
                column,
            } => Span::new(*offset, offset + ch.len_utf8(), *line, *column),
            Self::UnexpectedToken { token, .. }
            | Self::InvalidToken { token, .. }
            | Self::Unsupported { token, .. } => token.span,
            Self::ExpectedToken { got, .. } | Self::ExpectedOneOfTokens { got, .. } => got.span,
            Self::UnexpectedEndOfInput { span, .. } | Self::SyntaxError { span, .. } => *span,
        }
    }

    /// Offending token, when the error is about one.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::UnexpectedToken { token, .. }
            | Self::InvalidToken { token, .. }
            | Self::Unsupported { token, .. }
            | Self::ExpectedToken { got: token, .. }
            | Self::ExpectedOneOfTokens { got: token, .. } => Some(token),
            _ => None,
        }
    }

    /// Build a report with one positioned label.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        let note = match self {
            Self::UnexpectedChar { ch, offset, .. } => {
                format!("character {ch:?} at byte offset {offset} cannot start a token")
            }
            Self::UnexpectedEndOfInput { .. } => "input ends here".to_string(),
            Self::SyntaxError { detail, .. } => detail.clone(),
            _ => self.token().map_or_else(String::new, |token| {
                format!("found {} '{}'", token.kind, token.lexeme)
            }),
        };
        let label_title = if self.token().is_some() {
            "Token"
        } else {
            "Location"
        };

        Diagnostic::error(self.title(), self.to_string())
            .with_label(Label::new(label_title, note).at(span.line, span.column))
    }

    /// Plain-text diagnostic for this error.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_diagnostic().render()
    }
}
