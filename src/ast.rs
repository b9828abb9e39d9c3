//! Syntax tree produced by the parser.
//!
//! Nodes own their children exclusively and carry no source spans;
//! positions live on tokens only. Apart from a [`Type`]'s modifier
//! flags, nodes are not changed after construction.

use crate::token::TokenKind;

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Include,
    Block,
    FuncDecl,
    VarDecl,
    BinaryExpr,
    UnaryExpr,
    Literal,
    CallExpr,
    MemberAccess,
    EndOfInput,
    Type,
    ImplicitReturn,
    NewExpr,
    Throw,
    UnlessExpr,
}

impl NodeKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Include => "Include",
            Self::Block => "Block",
            Self::FuncDecl => "FuncDecl",
            Self::VarDecl => "VarDecl",
            Self::BinaryExpr => "BinaryExpr",
            Self::UnaryExpr => "UnaryExpr",
            Self::Literal => "Literal",
            Self::CallExpr => "CallExpr",
            Self::MemberAccess => "MemberAccess",
            Self::EndOfInput => "End of input",
            Self::Type => "Type",
            Self::ImplicitReturn => "ImplicitReturn",
            Self::NewExpr => "NewExpr",
            Self::Throw => "Throw",
            Self::UnlessExpr => "UnlessExpr",
        }
    }
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Include(Include),
    Block(Block),
    FuncDecl(FuncDecl),
    VarDecl(VarDecl),
    BinaryExpr {
        lhs: Box<Self>,
        op: String,
        rhs: Box<Self>,
    },
    UnaryExpr {
        op: String,
        operand: Box<Self>,
    },
    /// Literal or identifier; `value` is the lexeme as written.
    Literal {
        value: String,
        kind: LiteralKind,
    },
    CallExpr {
        callee: Box<Self>,
        args: Vec<Self>,
    },
    MemberAccess {
        object: Box<Self>,
        member: String,
    },
    /// Terminal sentinel of a node sequence.
    EndOfInput,
    Type(Type),
    /// Bare expression in statement position.
    ImplicitReturn(Box<Self>),
    NewExpr {
        ty: Type,
        args: Vec<Self>,
    },
    Throw(Box<Self>),
    /// `value unless condition [ifso otherwise]`.
    UnlessExpr {
        value: Box<Self>,
        condition: Box<Self>,
        otherwise: Option<Box<Self>>,
    },
}

impl Node {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Include(_) => NodeKind::Include,
            Self::Block(_) => NodeKind::Block,
            Self::FuncDecl(_) => NodeKind::FuncDecl,
            Self::VarDecl(_) => NodeKind::VarDecl,
            Self::BinaryExpr { .. } => NodeKind::BinaryExpr,
            Self::UnaryExpr { .. } => NodeKind::UnaryExpr,
            Self::Literal { .. } => NodeKind::Literal,
            Self::CallExpr { .. } => NodeKind::CallExpr,
            Self::MemberAccess { .. } => NodeKind::MemberAccess,
            Self::EndOfInput => NodeKind::EndOfInput,
            Self::Type(_) => NodeKind::Type,
            Self::ImplicitReturn(_) => NodeKind::ImplicitReturn,
            Self::NewExpr { .. } => NodeKind::NewExpr,
            Self::Throw(_) => NodeKind::Throw,
            Self::UnlessExpr { .. } => NodeKind::UnlessExpr,
        }
    }

    #[must_use]
    pub const fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    #[must_use]
    pub fn literal(value: impl Into<String>, kind: LiteralKind) -> Self {
        Self::Literal {
            value: value.into(),
            kind,
        }
    }

    #[must_use]
    pub fn int(value: impl Into<String>) -> Self {
        Self::literal(value, LiteralKind::Int)
    }

    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::literal(name, LiteralKind::Ident)
    }

    #[must_use]
    pub fn binary(lhs: Self, op: impl Into<String>, rhs: Self) -> Self {
        Self::BinaryExpr {
            lhs: Box::new(lhs),
            op: op.into(),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn unary(op: impl Into<String>, operand: Self) -> Self {
        Self::UnaryExpr {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    #[must_use]
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            args,
        }
    }

    #[must_use]
    pub fn member(object: Self, member: impl Into<String>) -> Self {
        Self::MemberAccess {
            object: Box::new(object),
            member: member.into(),
        }
    }

    #[must_use]
    pub fn implicit_return(value: Self) -> Self {
        Self::ImplicitReturn(Box::new(value))
    }
}

/// Token kinds a [`Node::Literal`] can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Ident,
    Bool,
    Null,
}

impl LiteralKind {
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(Self::Int),
            TokenKind::Float => Some(Self::Float),
            TokenKind::String => Some(Self::String),
            TokenKind::Ident => Some(Self::Ident),
            TokenKind::Bool => Some(Self::Bool),
            TokenKind::Null => Some(Self::Null),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Ident => "ident",
            Self::Bool => "bool",
            Self::Null => "null",
        }
    }
}

/// `include "path";` or `from "path" include a, b;`.
///
/// An empty `items` list means everything is imported. The path is
/// kept as written, without quotes, and never resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub path: String,
    pub items: Vec<String>,
}

/// Braced statement list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Node>,
}

/// Declaration modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Static,
    Sealed,
    Export,
}

impl Modifier {
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Static => Some(Self::Static),
            TokenKind::Sealed => Some(Self::Sealed),
            TokenKind::Export => Some(Self::Export),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Sealed => "sealed",
            Self::Export => "export",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: String,
    pub value: Box<Node>,
    pub modifiers: Vec<Modifier>,
    /// Declared with `const` instead of `let`.
    pub is_const: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Param>,
    /// `void` when no return type is written.
    pub return_type: Type,
    pub body: Block,
}

/// Structural part of a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// Named type, e.g. `int`.
    Simple(String),
    /// `[size]Element`; `size` is `None` for `[]Element`.
    Array { size: Option<u64>, element: Box<Type> },
    /// `{Key}Value`.
    Map { key: Box<Type>, value: Box<Type> },
}

/// Flags that decorate any type shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct TypeModifiers {
    pub is_const: bool,
    pub is_comptime: bool,
    pub is_reference: bool,
    pub is_throwable: bool,
    pub is_nullable: bool,
}

/// A type expression.
///
/// Built in two steps: the shape first, then [`Type::set_modifiers`]
/// once the surrounding prefix and suffix markers are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub shape: TypeShape,
    pub modifiers: TypeModifiers,
}

impl Type {
    #[must_use]
    pub fn new(shape: TypeShape) -> Self {
        Self {
            shape,
            modifiers: TypeModifiers::default(),
        }
    }

    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(TypeShape::Simple(name.into()))
    }

    #[must_use]
    pub fn array(size: Option<u64>, element: Self) -> Self {
        Self::new(TypeShape::Array {
            size,
            element: Box::new(element),
        })
    }

    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::new(TypeShape::Map {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    /// Implicit return type of functions without an annotation.
    #[must_use]
    pub fn void() -> Self {
        Self::simple("void")
    }

    pub const fn set_modifiers(&mut self, modifiers: TypeModifiers) {
        self.modifiers = modifiers;
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: TypeModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.modifiers.is_nullable = true;
        self
    }

    #[must_use]
    pub fn constant(mut self) -> Self {
        self.modifiers.is_const = true;
        self
    }

    #[must_use]
    pub fn comptime(mut self) -> Self {
        self.modifiers.is_comptime = true;
        self
    }

    #[must_use]
    pub fn reference(mut self) -> Self {
        self.modifiers.is_reference = true;
        self
    }

    #[must_use]
    pub fn throwable(mut self) -> Self {
        self.modifiers.is_throwable = true;
        self
    }
}
