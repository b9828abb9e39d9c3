use std::fmt;

/// Source location of a token.
///
/// `start` and `end` are byte offsets into the source (`end` exclusive),
/// `line` and `column` are 1-based and point at the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Number of source bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Synthetic end-of-input marker, always the last token.
    Eoi,
    Ident,
    Float,
    Int,
    /// Double-quoted string, no escape processing.
    String,
    /// `true` or `false`.
    Bool,
    /// `null`.
    Null,
    /// Single-character operator.
    Op,
    /// Single-character punctuation.
    Punct,
    /// Statement terminator `;`.
    Eos,

    If,
    Else,
    Elif,
    While,
    For,
    In,
    Repeat,
    Until,
    Defer,
    Delete,
    Match,
    Case,
    Default,
    Func,
    Return,
    Class,
    Public,
    Private,
    Override,
    Struct,
    Iface,
    Impl,
    Enum,
    Let,
    Const,
    Static,
    Sealed,
    Export,
    Comptime,
    Discard,
    From,
    Include,
    Typeof,
    Throw,
    Try,
    Catch,
    Guard,
    As,
    Unless,
    Ifso,
    Ifnot,
    New,
    Destruct,
    And,
    Or,
    Not,
}

/// Reserved words. Lookup is by whole identifier run only.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("elif", TokenKind::Elif),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("repeat", TokenKind::Repeat),
    ("until", TokenKind::Until),
    ("defer", TokenKind::Defer),
    ("delete", TokenKind::Delete),
    ("match", TokenKind::Match),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("func", TokenKind::Func),
    ("return", TokenKind::Return),
    ("class", TokenKind::Class),
    ("public", TokenKind::Public),
    ("private", TokenKind::Private),
    ("override", TokenKind::Override),
    ("struct", TokenKind::Struct),
    ("iface", TokenKind::Iface),
    ("impl", TokenKind::Impl),
    ("enum", TokenKind::Enum),
    ("let", TokenKind::Let),
    ("const", TokenKind::Const),
    ("static", TokenKind::Static),
    ("sealed", TokenKind::Sealed),
    ("export", TokenKind::Export),
    ("comptime", TokenKind::Comptime),
    ("discard", TokenKind::Discard),
    ("from", TokenKind::From),
    ("include", TokenKind::Include),
    ("typeof", TokenKind::Typeof),
    ("throw", TokenKind::Throw),
    ("try", TokenKind::Try),
    ("catch", TokenKind::Catch),
    ("guard", TokenKind::Guard),
    ("as", TokenKind::As),
    ("unless", TokenKind::Unless),
    ("ifso", TokenKind::Ifso),
    ("ifnot", TokenKind::Ifnot),
    ("new", TokenKind::New),
    ("destruct", TokenKind::Destruct),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("true", TokenKind::Bool),
    ("false", TokenKind::Bool),
    ("null", TokenKind::Null),
];

/// Operator characters, each lexed as a one-character `Op` token.
pub const OPERATORS: &[u8] = b"-+*/^=<>!?&|";

/// Punctuation characters, each lexed as a one-character `Punct` token.
pub const PUNCTUATION: &[u8] = b"(){}[]:.,";

impl TokenKind {
    /// Classify an identifier run, falling back to `Ident`.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == word)
            .map_or(Self::Ident, |&(_, kind)| kind)
    }

    /// Whether this kind comes from the keyword table (bool and null
    /// literals excluded).
    #[must_use]
    pub fn is_keyword(self) -> bool {
        !matches!(
            self,
            Self::Eoi
                | Self::Ident
                | Self::Float
                | Self::Int
                | Self::String
                | Self::Bool
                | Self::Null
                | Self::Op
                | Self::Punct
                | Self::Eos
        )
    }

    /// Display name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eoi => "EOI",
            Self::Ident => "Identifier",
            Self::Float => "Float",
            Self::Int => "Int",
            Self::String => "String",
            Self::Bool => "Boolean",
            Self::Null => "Null",
            Self::Op => "Operator",
            Self::Punct => "Punctuation",
            Self::Eos => "EOS",
            Self::If => "If",
            Self::Else => "Else",
            Self::Elif => "Elif",
            Self::While => "While",
            Self::For => "For",
            Self::In => "In",
            Self::Repeat => "Repeat",
            Self::Until => "Until",
            Self::Defer => "Defer",
            Self::Delete => "Delete",
            Self::Match => "Match",
            Self::Case => "Case",
            Self::Default => "Default",
            Self::Func => "Func",
            Self::Return => "Return",
            Self::Class => "Class",
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Override => "Override",
            Self::Struct => "Struct",
            Self::Iface => "Iface",
            Self::Impl => "Impl",
            Self::Enum => "Enum",
            Self::Let => "Let",
            Self::Const => "Const",
            Self::Static => "Static",
            Self::Sealed => "Sealed",
            Self::Export => "Export",
            Self::Comptime => "Comptime",
            Self::Discard => "Discard",
            Self::From => "From",
            Self::Include => "Include",
            Self::Typeof => "Typeof",
            Self::Throw => "Throw",
            Self::Try => "Try",
            Self::Catch => "Catch",
            Self::Guard => "Guard",
            Self::As => "As",
            Self::Unless => "Unless",
            Self::Ifso => "Ifso",
            Self::Ifnot => "Ifnot",
            Self::New => "New",
            Self::Destruct => "Destruct",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its kind, source text, and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Compare the literal text, regardless of kind.
    #[must_use]
    pub fn is_lexeme(&self, lexeme: &str) -> bool {
        self.lexeme == lexeme
    }

    /// Punctuation token with the given character.
    #[must_use]
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punct && self.lexeme.len() == 1 && self.lexeme.starts_with(ch)
    }

    #[must_use]
    pub fn is_eoi(&self) -> bool {
        self.kind == TokenKind::Eoi
    }

    /// Contents of a string literal without the surrounding quotes.
    /// Other tokens return their lexeme unchanged.
    #[must_use]
    pub fn string_value(&self) -> &str {
        if self.kind != TokenKind::String {
            return &self.lexeme;
        }
        self.lexeme
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&self.lexeme)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' at {}:{} ({}..{})",
            self.kind, self.lexeme, self.span.line, self.span.column, self.span.start, self.span.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_exact() {
        assert_eq!(TokenKind::from_word("func"), TokenKind::Func);
        assert_eq!(TokenKind::from_word("function"), TokenKind::Ident);
        assert_eq!(TokenKind::from_word("fun"), TokenKind::Ident);
        assert_eq!(TokenKind::from_word("Func"), TokenKind::Ident);
    }

    #[test]
    fn literal_words() {
        assert_eq!(TokenKind::from_word("true"), TokenKind::Bool);
        assert_eq!(TokenKind::from_word("false"), TokenKind::Bool);
        assert_eq!(TokenKind::from_word("null"), TokenKind::Null);
        assert!(!TokenKind::Bool.is_keyword());
        assert!(TokenKind::Unless.is_keyword());
    }

    #[test]
    fn keyword_table_has_no_duplicates() {
        for (i, (a, _)) in KEYWORDS.iter().enumerate() {
            assert!(
                KEYWORDS[i + 1..].iter().all(|(b, _)| a != b),
                "duplicate keyword {a}"
            );
        }
    }

    #[test]
    fn string_value_strips_quotes() {
        let tok = Token::new(TokenKind::String, "\"lib/io\"", Span::new(0, 8, 1, 1));
        assert_eq!(tok.string_value(), "lib/io");
        let ident = Token::new(TokenKind::Ident, "x", Span::new(0, 1, 1, 1));
        assert_eq!(ident.string_value(), "x");
    }

    #[test]
    fn punct_check() {
        let tok = Token::new(TokenKind::Punct, "(", Span::new(0, 1, 1, 1));
        assert!(tok.is_punct('('));
        assert!(!tok.is_punct(')'));
        let op = Token::new(TokenKind::Op, "-", Span::new(0, 1, 1, 1));
        assert!(!op.is_punct('-'));
    }
}
