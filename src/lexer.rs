use crate::cursor::TokenStream;
use crate::error::Error;
use crate::token::{OPERATORS, PUNCTUATION, Span, Token, TokenKind};

/// Tokenize source text into a token sequence ending with an `Eoi`
/// token.
///
/// Comments (`@@ ...` to end of line, `@* ... *@`) and whitespace are
/// skipped. The first unrecognized character aborts the whole call.
///
/// # Errors
///
/// Returns `Error::UnexpectedChar` for a character that cannot start a
/// token, or `Error::UnexpectedEndOfInput` for an unterminated string
/// literal or block comment.
pub fn tokenize(input: &str) -> Result<TokenStream, Error> {
    let tokens = Lexer::new(input).tokenize()?;
    tracing::debug!(tokens = tokens.len(), bytes = input.len(), "tokenized source");
    Ok(TokenStream::new(tokens))
}

struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    const fn new(source: &'a str) -> Self {
        Self {
            source,
            input: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                b'@' if self.peek_at(1) == Some(b'@') => self.skip_line_comment(),
                b'@' if self.peek_at(1) == Some(b'*') => self.skip_block_comment()?,
                b' ' | b'\t' | b'\r' | b'\n' => self.advance(),
                b'0'..=b'9' => tokens.push(self.read_number()),
                b'"' => tokens.push(self.read_string()?),
                _ if is_word_byte(ch) => tokens.push(self.read_word()),
                _ if OPERATORS.contains(&ch) => tokens.push(self.read_single(TokenKind::Op)),
                _ if PUNCTUATION.contains(&ch) => tokens.push(self.read_single(TokenKind::Punct)),
                b';' => tokens.push(self.read_single(TokenKind::Eos)),
                _ => return Err(self.unexpected_char()),
            }
        }

        let end = self.input.len();
        tokens.push(Token::new(
            TokenKind::Eoi,
            "",
            Span::new(end, end, self.line, self.column()),
        ));
        Ok(tokens)
    }

    const fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    const fn span_from(&self, start: usize, line: usize, column: usize) -> Span {
        Span::new(start, self.pos, line, column)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == b'\n' {
                self.line += 1;
                self.line_start = self.pos + 1;
            }
            self.pos += 1;
        }
    }

    fn token(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token {
        Token {
            kind,
            lexeme: self.source[start..self.pos].to_string(),
            span: self.span_from(start, line, column),
        }
    }

    fn skip_line_comment(&mut self) {
        // the newline itself is left for the whitespace rule
        while self.peek().is_some_and(|b| b != b'\n') {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), Error> {
        let span = Span::new(self.pos, self.pos + 2, self.line, self.column());
        self.advance(); // @
        self.advance(); // *

        loop {
            match self.peek() {
                None => {
                    return Err(Error::UnexpectedEndOfInput {
                        note: Some("unterminated block comment".to_string()),
                        span,
                    });
                }
                Some(b'*') if self.peek_at(1) == Some(b'@') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => self.advance(),
            }
        }
    }

    fn read_number(&mut self) -> Token {
        let (start, line, column) = (self.pos, self.line, self.column());

        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }

        let kind = if self.peek() == Some(b'.') {
            self.advance();
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.advance();
            }
            TokenKind::Float
        } else {
            TokenKind::Int
        };

        self.token(kind, start, line, column)
    }

    fn read_string(&mut self) -> Result<Token, Error> {
        let (start, line, column) = (self.pos, self.line, self.column());
        self.advance(); // opening quote

        loop {
            match self.peek() {
                None => {
                    return Err(Error::UnexpectedEndOfInput {
                        note: Some("unterminated string literal".to_string()),
                        span: Span::new(start, start + 1, line, column),
                    });
                }
                Some(b'"') => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        Ok(self.token(TokenKind::String, start, line, column))
    }

    fn read_word(&mut self) -> Token {
        let (start, line, column) = (self.pos, self.line, self.column());

        while self.peek().is_some_and(is_word_byte) {
            self.advance();
        }

        let kind = TokenKind::from_word(&self.source[start..self.pos]);
        self.token(kind, start, line, column)
    }

    fn read_single(&mut self, kind: TokenKind) -> Token {
        let (start, line, column) = (self.pos, self.line, self.column());
        self.advance();
        self.token(kind, start, line, column)
    }

    fn unexpected_char(&self) -> Error {
        // Only ASCII is ever consumed outside strings and comments, so
        // `pos` sits on a char boundary here.
        let ch = self.source[self.pos..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Error::UnexpectedChar {
            ch,
            offset: self.pos,
            line: self.line,
            column: self.column(),
        }
    }
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'!' | b'?')
}
