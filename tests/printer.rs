//! Tree printer tests.

mod common;

use common::parse_ok;
use vanadium::pretty;

#[test]
fn pretty_var_decl() {
    let nodes = parse_ok("static const x = 1 + y * 2");
    let expected = "\
VarDecl const x [static]
  BinaryExpr +
    Literal int 1
    BinaryExpr *
      Literal ident y
      Literal int 2
End of input
";
    assert_eq!(pretty(&nodes), expected);
}

#[test]
fn pretty_func_decl() {
    let nodes = parse_ok("export func greet(name: string?): void { io.print(name) }");
    let expected = "\
FuncDecl greet [export] -> void
  Param name: string?
  Block
    ImplicitReturn
      CallExpr
        MemberAccess .print
          Literal ident io
        Literal ident name
End of input
";
    assert_eq!(pretty(&nodes), expected);
}

#[test]
fn pretty_includes() {
    let nodes = parse_ok("include \"std\"\nfrom \"m\" include a, b");
    let expected = "\
Include \"std\" (all)
Include \"m\": a, b
End of input
";
    assert_eq!(pretty(&nodes), expected);
}

#[test]
fn pretty_unless() {
    let nodes = parse_ok("x unless empty ifso null");
    let expected = "\
ImplicitReturn
  UnlessExpr
    Literal ident x
    Unless
      Literal ident empty
    Ifso
      Literal null null
End of input
";
    assert_eq!(pretty(&nodes), expected);
}

#[test]
fn pretty_new_and_throw() {
    let nodes = parse_ok("throw new Error(\"boom\")");
    let expected = "\
Throw
  NewExpr Error
    Literal string \"boom\"
End of input
";
    assert_eq!(pretty(&nodes), expected);
}

#[test]
fn sexpr_of_types() {
    let nodes = parse_ok("func f(m: {string}[]int, r: const & Node ?) {}");
    assert_eq!(
        nodes[0].to_string(),
        "(func f ((m {string}[]int) (r const &Node?)) void (block))"
    );
}
