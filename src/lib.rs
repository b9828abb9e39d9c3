//! Front end for the Vanadium language: lexer, parser, syntax tree, and
//! diagnostics.
//!
//! Source text is tokenized into a [`TokenStream`], which the parser
//! turns into a [`NodeStream`] of top-level declarations and
//! statements. Both stages stop at the first error and return a single
//! [`Error`], which can be rendered as a [`Diagnostic`].
//!
//! # Quick start
//!
//! ```
//! use vanadium::{Node, parse, tokenize};
//!
//! let tokens = tokenize("let answer = 40 + 2;").unwrap();
//! let nodes = parse(tokens).unwrap();
//! assert_eq!(nodes.current().to_string(), "(let answer (+ 40 2))");
//! assert!(matches!(nodes.peek(1), Node::EndOfInput));
//! ```
//!
//! ## Reporting errors
//!
//! ```
//! let err = vanadium::parse_str("let = 1").unwrap_err();
//! let report = err.render();
//! assert!(report.starts_with("error: Expected token\n"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod cursor;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use ast::{
    Block, FuncDecl, Include, LiteralKind, Modifier, Node, NodeKind, Param, Type, TypeModifiers,
    TypeShape, VarDecl,
};
pub use cursor::{Checkpoint, Cursor, NodeStream, TokenStream};
pub use diagnostics::{Diagnostic, Label, Palette, Severity};
pub use error::{Error, Expected};
pub use lexer::tokenize;
pub use parser::{Precedence, parse};
pub use printer::pretty;
pub use token::{Span, Token, TokenKind};

/// Tokenize and parse a source string in one step.
pub fn parse_str(input: &str) -> Result<NodeStream, Error> {
    let tokens = tokenize(input)?;
    parse(tokens)
}
