#![allow(dead_code)]

use vanadium::{Error, Node, parse_str};

/// Parse `input` and return the top-level nodes, sentinel included.
pub fn parse_ok(input: &str) -> Vec<Node> {
    parse_str(input)
        .unwrap_or_else(|e| panic!("failed to parse:\n{input}\n--- error ---\n{e}"))
        .into_inner()
}

/// Parse `input` and return the error it fails with.
pub fn parse_err(input: &str) -> Error {
    match parse_str(input) {
        Ok(nodes) => panic!(
            "expected a parse error for:\n{input}\n--- got ---\n{}",
            vanadium::pretty(nodes.as_slice())
        ),
        Err(e) => e,
    }
}

/// First top-level node.
pub fn first(input: &str) -> Node {
    parse_ok(input).remove(0)
}

/// S-expression of a single expression statement.
pub fn expr(input: &str) -> String {
    match first(input) {
        Node::ImplicitReturn(inner) => inner.to_string(),
        other => panic!("expected an expression statement, got {other}"),
    }
}
