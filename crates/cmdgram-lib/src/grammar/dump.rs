//! Indented tree dump, one node per line.
//!
//! Modifiers follow the node: `?` optional, `+` repeat. Empty nodes are
//! always optional, so they carry no marker.

use std::fmt::Write;

use crate::Colors;

use super::node::{Node, NodeKind};

impl Node {
    pub fn dump(&self) -> String {
        self.dump_with(Colors::OFF)
    }

    pub fn dump_with(&self, colors: Colors) -> String {
        let mut out = String::new();
        dump_node(&mut out, self, 0, colors);
        out
    }
}

fn dump_node(out: &mut String, node: &Node, depth: usize, c: Colors) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}");

    let _ = match node.kind() {
        NodeKind::Empty => write!(out, "{}Empty{}", c.dim, c.reset),
        NodeKind::Plain(content) => write!(out, "Plain {}{:?}{}", c.green, content, c.reset),
        NodeKind::Var { name, multi_word } => write!(
            out,
            "Var {}<{}{}>{}",
            c.blue,
            name,
            if *multi_word { "..." } else { "" },
            c.reset
        ),
        NodeKind::FloatingArg { key, .. } => write!(out, "Flag {}--{}{}", c.blue, key, c.reset),
        NodeKind::List(_) => write!(out, "List"),
        NodeKind::Or(_) => write!(out, "Or"),
    };

    if node.is_optional() && !node.is_empty() {
        out.push_str(" ?");
    }
    if node.is_repeat() {
        out.push_str(" +");
    }
    out.push('\n');

    match node.kind() {
        NodeKind::List(children) | NodeKind::Or(children) => {
            for child in children {
                dump_node(out, child, depth + 1, c);
            }
        }
        NodeKind::FloatingArg {
            value: Some(value), ..
        } => dump_node(out, value, depth + 1, c),
        _ => {}
    }
}
