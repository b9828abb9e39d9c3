//! Debug rendering of syntax trees.
//!
//! Two forms: a compact s-expression (the `Display` impls, handy in
//! assertions) and an indented tree via [`pretty`]. Neither aims to
//! reproduce the source text.

use std::fmt::{self, Write as _};

use crate::ast::{Block, FuncDecl, Include, Modifier, Node, Param, Type, TypeShape, VarDecl};

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        if m.is_const {
            f.write_str("const ")?;
        }
        if m.is_comptime {
            f.write_str("comptime ")?;
        }
        if m.is_reference {
            f.write_char('&')?;
        }
        if m.is_throwable {
            f.write_char('!')?;
        }

        match &self.shape {
            TypeShape::Simple(name) => f.write_str(name)?,
            TypeShape::Array {
                size: Some(n),
                element,
            } => write!(f, "[{n}]{element}")?,
            TypeShape::Array {
                size: None,
                element,
            } => write!(f, "[]{element}")?,
            TypeShape::Map { key, value } => write!(f, "{{{key}}}{value}")?,
        }

        if m.is_nullable {
            f.write_char('?')?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include(include) => write_include(f, include),
            Self::Block(block) => write_block(f, block),
            Self::FuncDecl(func) => write_func(f, func),
            Self::VarDecl(var) => write_var(f, var),
            Self::BinaryExpr { lhs, op, rhs } => write!(f, "({op} {lhs} {rhs})"),
            Self::UnaryExpr { op, operand } => write!(f, "({op} {operand})"),
            Self::Literal { value, .. } => f.write_str(value),
            Self::CallExpr { callee, args } => {
                write!(f, "(call {callee}")?;
                write_list(f, args)?;
                f.write_char(')')
            }
            Self::MemberAccess { object, member } => write!(f, "(. {object} {member})"),
            Self::EndOfInput => f.write_str("<eoi>"),
            Self::Type(ty) => write!(f, "(type {ty})"),
            Self::ImplicitReturn(value) => write!(f, "(implicit-return {value})"),
            Self::NewExpr { ty, args } => {
                write!(f, "(new {ty}")?;
                write_list(f, args)?;
                f.write_char(')')
            }
            Self::Throw(value) => write!(f, "(throw {value})"),
            Self::UnlessExpr {
                value,
                condition,
                otherwise,
            } => {
                write!(f, "(unless {value} {condition}")?;
                if let Some(alt) = otherwise {
                    write!(f, " ifso {alt}")?;
                }
                f.write_char(')')
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        write!(f, " {node}")?;
    }
    Ok(())
}

fn write_modifiers(f: &mut fmt::Formatter<'_>, modifiers: &[Modifier]) -> fmt::Result {
    for modifier in modifiers {
        write!(f, "{} ", modifier.as_str())?;
    }
    Ok(())
}

fn write_include(f: &mut fmt::Formatter<'_>, include: &Include) -> fmt::Result {
    write!(f, "(include \"{}\"", include.path)?;
    for item in &include.items {
        write!(f, " {item}")?;
    }
    f.write_char(')')
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block) -> fmt::Result {
    f.write_str("(block")?;
    write_list(f, &block.statements)?;
    f.write_char(')')
}

fn write_var(f: &mut fmt::Formatter<'_>, var: &VarDecl) -> fmt::Result {
    f.write_char('(')?;
    write_modifiers(f, &var.modifiers)?;
    let keyword = if var.is_const { "const" } else { "let" };
    write!(f, "{keyword} {} {})", var.name, var.value)
}

fn write_func(f: &mut fmt::Formatter<'_>, func: &FuncDecl) -> fmt::Result {
    f.write_char('(')?;
    write_modifiers(f, &func.modifiers)?;
    write!(f, "func {} (", func.name)?;
    for (i, Param { name, ty }) in func.params.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, "({name} {ty})")?;
    }
    f.write_str(") ")?;
    write!(f, "{} ", func.return_type)?;
    write_block(f, &func.body)?;
    f.write_char(')')
}

/// Render nodes as an indented tree, one node per line.
#[must_use]
pub fn pretty(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        format_node(&mut out, node, 0);
    }
    out
}

fn format_children(out: &mut String, nodes: &[Node], indent: usize) {
    for node in nodes {
        format_node(out, node, indent);
    }
}

fn line(out: &mut String, indent: usize, text: fmt::Arguments<'_>) {
    out.push_str(&"  ".repeat(indent));
    let _ = out.write_fmt(text);
    out.push('\n');
}

fn modifier_suffix(modifiers: &[Modifier]) -> String {
    if modifiers.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = modifiers.iter().map(|m| m.as_str()).collect();
    format!(" [{}]", names.join(", "))
}

fn format_node(out: &mut String, node: &Node, indent: usize) {
    let kind = node.kind().name();

    match node {
        Node::Include(include) => {
            if include.items.is_empty() {
                line(out, indent, format_args!("{kind} \"{}\" (all)", include.path));
            } else {
                line(
                    out,
                    indent,
                    format_args!("{kind} \"{}\": {}", include.path, include.items.join(", ")),
                );
            }
        }
        Node::Block(block) => {
            line(out, indent, format_args!("{kind}"));
            format_children(out, &block.statements, indent + 1);
        }
        Node::FuncDecl(func) => {
            line(
                out,
                indent,
                format_args!(
                    "{kind} {}{} -> {}",
                    func.name,
                    modifier_suffix(&func.modifiers),
                    func.return_type
                ),
            );
            for param in &func.params {
                line(out, indent + 1, format_args!("Param {}: {}", param.name, param.ty));
            }
            line(out, indent + 1, format_args!("Block"));
            format_children(out, &func.body.statements, indent + 2);
        }
        Node::VarDecl(var) => {
            let keyword = if var.is_const { "const" } else { "let" };
            line(
                out,
                indent,
                format_args!(
                    "{kind} {keyword} {}{}",
                    var.name,
                    modifier_suffix(&var.modifiers)
                ),
            );
            format_node(out, &var.value, indent + 1);
        }
        Node::BinaryExpr { lhs, op, rhs } => {
            line(out, indent, format_args!("{kind} {op}"));
            format_node(out, lhs, indent + 1);
            format_node(out, rhs, indent + 1);
        }
        Node::UnaryExpr { op, operand } => {
            line(out, indent, format_args!("{kind} {op}"));
            format_node(out, operand, indent + 1);
        }
        Node::Literal { value, kind: lit } => {
            line(out, indent, format_args!("{kind} {} {value}", lit.name()));
        }
        Node::CallExpr { callee, args } => {
            line(out, indent, format_args!("{kind}"));
            format_node(out, callee, indent + 1);
            format_children(out, args, indent + 1);
        }
        Node::MemberAccess { object, member } => {
            line(out, indent, format_args!("{kind} .{member}"));
            format_node(out, object, indent + 1);
        }
        Node::EndOfInput => line(out, indent, format_args!("{kind}")),
        Node::Type(ty) => line(out, indent, format_args!("{kind} {ty}")),
        Node::ImplicitReturn(value) | Node::Throw(value) => {
            line(out, indent, format_args!("{kind}"));
            format_node(out, value, indent + 1);
        }
        Node::NewExpr { ty, args } => {
            line(out, indent, format_args!("{kind} {ty}"));
            format_children(out, args, indent + 1);
        }
        Node::UnlessExpr {
            value,
            condition,
            otherwise,
        } => {
            line(out, indent, format_args!("{kind}"));
            format_node(out, value, indent + 1);
            line(out, indent + 1, format_args!("Unless"));
            format_node(out, condition, indent + 2);
            if let Some(alt) = otherwise {
                line(out, indent + 1, format_args!("Ifso"));
                format_node(out, alt, indent + 2);
            }
        }
    }
}
