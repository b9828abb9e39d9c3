//! Recursive-descent parser with precedence climbing for expressions.
//!
//! Declarations and statements are parsed top-down. Expressions go
//! through [`Parser::pratt`], which parses a prefix term and then keeps
//! folding infix operators while their precedence is strictly above the
//! current floor. The right operand of a binary operator is parsed with
//! the operator's own precedence as the floor, so equal-precedence
//! chains associate to the left: `1 - 2 - 3` is `(1 - 2) - 3`.

use tracing::trace;

use crate::ast::{
    Block, FuncDecl, Include, LiteralKind, Modifier, Node, Param, Type, TypeModifiers, TypeShape,
    VarDecl,
};
use crate::cursor::{NodeStream, TokenStream};
use crate::error::{Error, Expected};
use crate::token::{Token, TokenKind};

/// Binding strength of infix operators, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Lowest = 0,
    /// `=` and the `unless` guard.
    Assignment = 1,
    /// `+ -`
    Term = 2,
    /// `* /`
    Factor = 3,
    /// Unary operators.
    Prefix = 4,
    /// Calls `(` and member access `.`.
    Call = 5,
}

impl Precedence {
    /// Infix precedence of `token`. Tokens outside the table, including
    /// comparison and bitwise operators, get `Lowest` and so never
    /// continue an expression.
    #[must_use]
    pub fn of(token: &Token) -> Self {
        match token.kind {
            TokenKind::Punct if token.is_punct('.') || token.is_punct('(') => Self::Call,
            TokenKind::Op => match token.lexeme.as_str() {
                "=" => Self::Assignment,
                "+" | "-" => Self::Term,
                "*" | "/" => Self::Factor,
                _ => Self::Lowest,
            },
            TokenKind::Unless => Self::Assignment,
            _ => Self::Lowest,
        }
    }
}

/// Parse a token sequence into top-level nodes.
///
/// The returned sequence always ends with one [`Node::EndOfInput`].
///
/// # Errors
///
/// Returns the first grammar violation. No partial tree is produced.
pub fn parse(tokens: TokenStream) -> Result<NodeStream, Error> {
    Parser::new(tokens).parse()
}

/// Deepest nesting of blocks, types, and expressions before parsing
/// gives up instead of exhausting the stack.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: TokenStream,
    depth: usize,
}

impl Parser {
    const fn new(tokens: TokenStream) -> Self {
        Self { tokens, depth: 0 }
    }

    fn parse(mut self) -> Result<NodeStream, Error> {
        let mut nodes = Vec::new();

        while !self.current().is_eoi() {
            nodes.push(self.parse_start()?);
            self.eat_terminator();
        }

        tracing::debug!(nodes = nodes.len(), "parsed top-level nodes");
        nodes.push(Node::EndOfInput);
        Ok(NodeStream::new(nodes))
    }

    // -- Cursor helpers --

    fn current(&self) -> &Token {
        self.tokens.current()
    }

    /// Step past the current token. Never moves beyond `Eoi`.
    fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eoi() {
            self.tokens.advance();
        }
        token
    }

    fn at_punct(&self, ch: char) -> bool {
        self.current().is_punct(ch)
    }

    fn at_lexeme(&self, lexeme: &str) -> bool {
        self.current().is_lexeme(lexeme)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    fn eat_terminator(&mut self) {
        if self.at(TokenKind::Eos) {
            self.bump();
        }
    }

    fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(Error::expected(Expected::Kind(kind), self.current()))
        }
    }

    fn expect_punct(&mut self, punct: &'static str) -> Result<Token, Error> {
        if self.current().kind == TokenKind::Punct && self.at_lexeme(punct) {
            Ok(self.bump())
        } else {
            Err(Error::expected(Expected::Lexeme(punct), self.current()))
        }
    }

    fn expect_lexeme(&mut self, lexeme: &'static str) -> Result<Token, Error> {
        if self.at_lexeme(lexeme) {
            Ok(self.bump())
        } else {
            Err(Error::expected(Expected::Lexeme(lexeme), self.current()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, Error> {
        self.expect_kind(TokenKind::Ident).map(|t| t.lexeme)
    }

    /// Run `rule` one nesting level deeper.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::SyntaxError {
                detail: "nesting too deep".to_string(),
                span: self.current().span,
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // -- Statements and declarations --

    fn parse_start(&mut self) -> Result<Node, Error> {
        trace!(rule = "start", at = %self.current().lexeme, "starting rule");

        match self.current().kind {
            TokenKind::From | TokenKind::Include => return self.parse_include(),
            TokenKind::Throw => return self.parse_throw(),
            _ => {}
        }

        let checkpoint = self.tokens.checkpoint();
        let speculative = match self.parse_expr() {
            Ok(expr) => return Ok(Node::implicit_return(expr)),
            Err(err) => {
                trace!(error = %err, "not an expression statement, rewinding");
                self.tokens.restore(checkpoint);
                err
            }
        };

        let modifiers = self.parse_modifiers();
        let token = self.current().clone();

        match token.kind {
            TokenKind::Eoi if modifiers.is_empty() => Ok(Node::EndOfInput),
            TokenKind::Eoi => Err(Error::UnexpectedEndOfInput {
                note: Some("after declaration modifiers".to_string()),
                span: token.span,
            }),
            TokenKind::Let | TokenKind::Const => {
                let modifiers = reject_sealed(&modifiers)?;
                self.parse_var_decl(modifiers)
            }
            TokenKind::Func => {
                let modifiers = reject_sealed(&modifiers)?;
                self.parse_func_decl(modifiers)
            }
            TokenKind::Class => self.parse_class_decl(),
            TokenKind::Struct => {
                reject_sealed(&modifiers)?;
                self.parse_struct_decl()
            }
            // Nothing declaration-like here; the expression attempt got
            // at least as far and has the more useful message.
            _ if modifiers.is_empty() => Err(speculative),
            _ => Err(Error::unexpected(&token, "at start of declaration")),
        }
    }

    /// Zero or more of `static`, `sealed`, `export`, in any order.
    fn parse_modifiers(&mut self) -> Vec<Token> {
        trace!(rule = "modifiers", "starting rule");

        let mut modifiers = Vec::new();
        while Modifier::from_token(self.current().kind).is_some() {
            modifiers.push(self.bump());
        }
        modifiers
    }

    fn parse_include(&mut self) -> Result<Node, Error> {
        trace!(rule = "include", "starting rule");

        let mut items = Vec::new();
        let path = match self.current().kind {
            TokenKind::From => {
                self.bump();
                let path = self.expect_kind(TokenKind::String)?;
                self.expect_kind(TokenKind::Include)?;
                items.push(self.expect_ident()?);
                while self.at_punct(',') {
                    self.bump();
                    items.push(self.expect_ident()?);
                }
                path
            }
            TokenKind::Include => {
                self.bump();
                self.expect_kind(TokenKind::String)?
            }
            _ => {
                return Err(Error::ExpectedOneOfTokens {
                    expected: vec![
                        Expected::Kind(TokenKind::Include),
                        Expected::Kind(TokenKind::From),
                    ],
                    got: self.current().clone(),
                    note: None,
                });
            }
        };

        Ok(Node::Include(Include {
            path: path.string_value().to_string(),
            items,
        }))
    }

    fn parse_var_decl(&mut self, modifiers: Vec<Modifier>) -> Result<Node, Error> {
        trace!(rule = "var_decl", "starting rule");

        let is_const = match self.current().kind {
            TokenKind::Let => false,
            TokenKind::Const => true,
            _ => {
                return Err(Error::ExpectedOneOfTokens {
                    expected: vec![
                        Expected::Kind(TokenKind::Let),
                        Expected::Kind(TokenKind::Const),
                    ],
                    got: self.current().clone(),
                    note: None,
                });
            }
        };
        self.bump();

        let name = self.expect_ident()?;
        self.expect_lexeme("=")?;
        let value = self.parse_expr()?;
        let is_static = modifiers.contains(&Modifier::Static);

        Ok(Node::VarDecl(VarDecl {
            name,
            value: Box::new(value),
            modifiers,
            is_const,
            is_static,
        }))
    }

    fn parse_func_decl(&mut self, modifiers: Vec<Modifier>) -> Result<Node, Error> {
        trace!(rule = "func_decl", "starting rule");

        self.expect_kind(TokenKind::Func)?;
        let name = self.expect_ident()?;
        let params = self.parse_parameters()?;

        let return_type = if self.at_punct(':') {
            self.bump();
            self.parse_type()?
        } else {
            Type::void()
        };

        let body = self.parse_block()?;

        Ok(Node::FuncDecl(FuncDecl {
            name,
            modifiers,
            params,
            return_type,
            body,
        }))
    }

    /// `( [name: Type {, name: Type}] )`
    fn parse_parameters(&mut self) -> Result<Vec<Param>, Error> {
        trace!(rule = "parameters", "starting rule");

        let mut params = Vec::new();
        self.expect_punct("(")?;

        if self.at_punct(')') {
            self.bump();
            return Ok(params);
        }

        loop {
            let name = self.expect_ident()?;
            self.expect_punct(":")?;
            let ty = self.parse_type()?;
            params.push(Param { name, ty });

            if self.at_punct(')') {
                self.bump();
                return Ok(params);
            }

            let comma = self.expect_punct(",")?;
            if self.at_punct(')') {
                return Err(Error::SyntaxError {
                    detail: "trailing comma in parameter list".to_string(),
                    span: comma.span,
                });
            }
        }
    }

    fn parse_class_decl(&mut self) -> Result<Node, Error> {
        trace!(rule = "class_decl", "starting rule");

        Err(Error::Unsupported {
            construct: "class",
            token: self.current().clone(),
        })
    }

    fn parse_struct_decl(&mut self) -> Result<Node, Error> {
        trace!(rule = "struct_decl", "starting rule");

        Err(Error::Unsupported {
            construct: "struct",
            token: self.current().clone(),
        })
    }

    fn parse_block(&mut self) -> Result<Block, Error> {
        self.nested(Self::block)
    }

    fn block(&mut self) -> Result<Block, Error> {
        trace!(rule = "block", "starting rule");

        self.expect_punct("{")?;

        let mut statements = Vec::new();
        while !self.at_punct('}') {
            if self.current().is_eoi() {
                return Err(Error::expected(Expected::Lexeme("}"), self.current()));
            }
            statements.push(self.parse_start()?);
            self.eat_terminator();
        }
        self.bump();

        Ok(Block { statements })
    }

    // -- Types --

    /// `{const | comptime | & | !} ( [size]Type | {Key}Value | name ) [?]`
    fn parse_type(&mut self) -> Result<Type, Error> {
        self.nested(Self::type_expr)
    }

    fn type_expr(&mut self) -> Result<Type, Error> {
        trace!(rule = "type", "starting rule");

        let mut modifiers = TypeModifiers::default();
        loop {
            if self.at(TokenKind::Const) {
                modifiers.is_const = true;
            } else if self.at(TokenKind::Comptime) {
                modifiers.is_comptime = true;
            } else if self.at_lexeme("&") {
                modifiers.is_reference = true;
            } else if self.at_lexeme("!") {
                modifiers.is_throwable = true;
            } else {
                break;
            }
            self.bump();
        }

        let mut ty = if self.at_punct('[') {
            self.bump();
            let size = if self.at(TokenKind::Int) {
                let token = self.bump();
                match token.lexeme.parse::<u64>() {
                    Ok(size) => Some(size),
                    Err(_) => {
                        return Err(Error::InvalidToken {
                            token,
                            reason: Some("array size does not fit in 64 bits".to_string()),
                        });
                    }
                }
            } else {
                None
            };
            self.expect_punct("]")?;
            let element = self.parse_type()?;
            Type::new(TypeShape::Array {
                size,
                element: Box::new(element),
            })
        } else if self.at_punct('{') {
            self.bump();
            let key = self.parse_type()?;
            self.expect_punct("}")?;
            let value = self.parse_type()?;
            Type::new(TypeShape::Map {
                key: Box::new(key),
                value: Box::new(value),
            })
        } else if self.at(TokenKind::Ident) {
            Type::simple(self.bump().lexeme)
        } else {
            return Err(Error::unexpected(self.current(), "at start of type"));
        };

        if self.at_lexeme("?") {
            self.bump();
            modifiers.is_nullable = true;
        }

        ty.set_modifiers(modifiers);
        Ok(ty)
    }

    // -- Expressions --

    fn parse_expr(&mut self) -> Result<Node, Error> {
        self.nested(Self::expr)
    }

    fn expr(&mut self) -> Result<Node, Error> {
        trace!(rule = "expr", "starting rule");

        if self.at_punct('{') {
            return self.parse_block().map(Node::Block);
        }
        match self.current().kind {
            TokenKind::New => self.parse_new(),
            TokenKind::Throw => self.parse_throw(),
            _ => self.pratt(Precedence::Lowest),
        }
    }

    fn parse_throw(&mut self) -> Result<Node, Error> {
        trace!(rule = "throw", "starting rule");

        self.expect_kind(TokenKind::Throw)?;
        let operand = self.parse_expr()?;
        Ok(Node::Throw(Box::new(operand)))
    }

    /// `new Type [ ( args ) ]`
    fn parse_new(&mut self) -> Result<Node, Error> {
        trace!(rule = "new", "starting rule");

        self.expect_kind(TokenKind::New)?;
        let ty = self.parse_type()?;

        let args = if self.at_punct('(') {
            self.bump();
            self.parse_arguments()?
        } else {
            Vec::new()
        };

        Ok(Node::NewExpr { ty, args })
    }

    /// Comma-separated arguments after an opening `(`, through `)`.
    /// Each argument is parsed above assignment precedence, so a bare
    /// `a = b` is not an argument.
    fn parse_arguments(&mut self) -> Result<Vec<Node>, Error> {
        let mut args = Vec::new();

        if self.at_punct(')') {
            self.bump();
            return Ok(args);
        }

        loop {
            args.push(self.pratt(Precedence::Assignment)?);

            if self.at_punct(')') {
                self.bump();
                return Ok(args);
            }

            let comma = self.expect_punct(",")?;
            if self.at_punct(')') {
                return Err(Error::SyntaxError {
                    detail: "trailing comma in argument list".to_string(),
                    span: comma.span,
                });
            }
        }
    }

    fn pratt(&mut self, floor: Precedence) -> Result<Node, Error> {
        self.nested(|p| p.climb(floor))
    }

    fn climb(&mut self, floor: Precedence) -> Result<Node, Error> {
        trace!(rule = "pratt", ?floor, "starting rule");

        let mut left = self.parse_prefix()?;

        loop {
            let precedence = Precedence::of(self.current());
            if precedence <= floor {
                break;
            }
            left = self.parse_infix(left, precedence)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Node, Error> {
        trace!(rule = "prefix", "starting rule");

        let token = self.current().clone();

        if let Some(kind) = LiteralKind::from_token(token.kind) {
            self.bump();
            return Ok(Node::Literal {
                value: token.lexeme,
                kind,
            });
        }

        if token.is_punct('(') {
            self.bump();
            let inner = self.pratt(Precedence::Lowest)?;
            self.expect_punct(")")?;
            return Ok(inner);
        }

        if token.kind == TokenKind::New {
            return self.parse_new();
        }

        if is_unary_operator(&token) {
            self.bump();
            let operand = self.pratt(Precedence::Prefix)?;
            return Ok(Node::UnaryExpr {
                op: token.lexeme,
                operand: Box::new(operand),
            });
        }

        Err(Error::unexpected(&token, "at start of expression"))
    }

    fn parse_infix(&mut self, left: Node, precedence: Precedence) -> Result<Node, Error> {
        trace!(rule = "infix", op = %self.current().lexeme, "starting rule");

        if self.at_punct('(') {
            self.bump();
            let args = self.parse_arguments()?;
            return Ok(Node::CallExpr {
                callee: Box::new(left),
                args,
            });
        }

        if self.at_punct('.') {
            self.bump();
            let member = self.expect_ident()?;
            return Ok(Node::MemberAccess {
                object: Box::new(left),
                member,
            });
        }

        if self.at(TokenKind::Unless) {
            self.bump();
            let condition = self.parse_expr()?;
            let otherwise = if self.at(TokenKind::Ifso) {
                self.bump();
                Some(Box::new(self.parse_expr()?))
            } else {
                None
            };
            return Ok(Node::UnlessExpr {
                value: Box::new(left),
                condition: Box::new(condition),
                otherwise,
            });
        }

        let op = self.bump().lexeme;
        let right = self.pratt(precedence)?;
        Ok(Node::BinaryExpr {
            lhs: Box::new(left),
            op,
            rhs: Box::new(right),
        })
    }
}

fn is_unary_operator(token: &Token) -> bool {
    match token.kind {
        TokenKind::Op => matches!(token.lexeme.as_str(), "-" | "*"),
        TokenKind::Discard
        | TokenKind::Typeof
        | TokenKind::Delete
        | TokenKind::Defer
        | TokenKind::Not
        | TokenKind::Throw => true,
        _ => false,
    }
}

/// `sealed` only applies to classes.
fn reject_sealed(modifiers: &[Token]) -> Result<Vec<Modifier>, Error> {
    if let Some(sealed) = modifiers.iter().find(|t| t.is(TokenKind::Sealed)) {
        return Err(Error::UnexpectedToken {
            token: sealed.clone(),
            note: Some("at a non-class declaration".to_string()),
        });
    }
    Ok(modifiers
        .iter()
        .filter_map(|t| Modifier::from_token(t.kind))
        .collect())
}
