//! End-to-end tests: whole programs through `parse_str`.

mod common;

use common::parse_ok;
use vanadium::{Error, Modifier, Node, NodeKind, parse_str, pretty};

const PROGRAM: &str = r#"
@* Geometry helpers.
   Nothing here is evaluated. *@
include "std/io"
from "std/math" include sqrt, pow

export const origin = new Point(0, 0);
static let scale = 2.5;

func length(p: &Point, precise: bool ?): float {
    let dx = p.x * scale;
    let dy = p.y * scale
    sqrt(pow(dx, 2) + pow(dy, 2))
}

export func main() {
    io.print(length(origin, null)) unless quiet ifso io.flush()
}
"#;

#[test]
fn full_program_structure() {
    let nodes = parse_ok(PROGRAM);
    let kinds: Vec<NodeKind> = nodes.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        [
            NodeKind::Include,
            NodeKind::Include,
            NodeKind::VarDecl,
            NodeKind::VarDecl,
            NodeKind::FuncDecl,
            NodeKind::FuncDecl,
            NodeKind::EndOfInput,
        ]
    );
}

#[test]
fn full_program_details() {
    let nodes = parse_ok(PROGRAM);

    let Node::VarDecl(origin) = &nodes[2] else {
        panic!("expected var decl");
    };
    assert!(origin.is_const);
    assert_eq!(origin.modifiers, [Modifier::Export]);
    assert_eq!(origin.value.to_string(), "(new Point 0 0)");

    let Node::FuncDecl(length) = &nodes[4] else {
        panic!("expected func decl");
    };
    assert_eq!(length.params[0].ty.to_string(), "&Point");
    assert_eq!(length.params[1].ty.to_string(), "bool?");
    assert_eq!(length.return_type.to_string(), "float");
    assert_eq!(length.body.statements.len(), 3);
    assert_eq!(
        length.body.statements[2].to_string(),
        "(implicit-return (call sqrt (+ (call pow dx 2) (call pow dy 2))))"
    );

    let Node::FuncDecl(main) = &nodes[5] else {
        panic!("expected func decl");
    };
    assert_eq!(
        main.body.statements[0].to_string(),
        "(implicit-return (unless (call (. io print) (call length origin null)) quiet \
         ifso (call (. io flush))))"
    );
}

#[test]
fn full_program_pretty_is_stable() {
    let first = pretty(&parse_ok(PROGRAM));
    let second = pretty(&parse_ok(PROGRAM));
    assert_eq!(first, second);
    assert!(first.ends_with("End of input\n"));
    assert!(first.starts_with("Include \"std/io\" (all)\n"));
}

#[test]
fn error_in_nested_function_is_reported_once() {
    let source = "func ok() { 1 }\nfunc broken() {\n    let = 2\n}\n";
    let err = parse_str(source).unwrap_err();
    assert!(matches!(err, Error::ExpectedToken { .. }));
    assert_eq!((err.span().line, err.span().column), (3, 9));

    let report = err.render();
    assert!(report.starts_with("error: Expected token\n"));
    assert!(report.contains("| At: 3:9\n"));
}

#[test]
fn lex_error_surfaces_through_parse_str() {
    let err = parse_str("let x = \"open").unwrap_err();
    assert!(matches!(err, Error::UnexpectedEndOfInput { .. }));
}
