//! Text and Graphviz renderings of a [`Graph`].
//!
//! Both renumber the reachable nodes in BFS order from the root, so the
//! output does not depend on arena layout.

use std::collections::HashMap;
use std::fmt::Write;

use crate::Colors;
use crate::grammar::{Node, NodeKind};

use super::{Backing, END, Graph, NodeId};

impl Graph<'_> {
    /// One line per reachable node:
    ///
    /// ```text
    /// N0: a → N1, N2
    /// N1: c → END
    /// N2: b → N1
    /// ```
    pub fn dump(&self) -> String {
        self.dump_with(Colors::OFF)
    }

    pub fn dump_with(&self, c: Colors) -> String {
        let numbering = Numbering::new(self);
        let mut out = String::new();

        for &id in &numbering.order {
            let node = self.node(id);
            let label = match node.backing {
                Backing::End => continue,
                Backing::Phi => format!("{}φ{}", c.dim, c.reset),
                Backing::Flags => format!("{}flags{}", c.dim, c.reset),
                Backing::Leaf(leaf) => colored_label(leaf, c),
            };
            let targets = if node.next.is_empty() {
                "∅".to_owned()
            } else {
                node.next
                    .iter()
                    .map(|&n| numbering.name(n, "N", "END"))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(out, "{}: {label} → {targets}", numbering.name(id, "N", "END"))
                .expect("String write never fails");
        }
        out
    }

    /// Graphviz `digraph` text.
    pub fn to_dot(&self) -> String {
        let numbering = Numbering::new(self);
        let name = |id: NodeId| numbering.name(id, "n", "end");

        let mut out = String::from("digraph usage {\n");
        out.push_str("  node [shape=box];\n");
        out.push_str("  end [label=\"END\", shape=doublecircle];\n");

        for &id in &numbering.order {
            let attrs = match self.node(id).backing {
                Backing::End => continue,
                Backing::Phi => "label=\"φ\", shape=circle".to_owned(),
                Backing::Flags => "label=\"flags\", shape=ellipse".to_owned(),
                Backing::Leaf(leaf) => format!("label=\"{}\"", escape(&label(leaf))),
            };
            writeln!(out, "  {} [{attrs}];", name(id)).expect("String write never fails");
        }

        for &id in &numbering.order {
            for &next in self.successors(id) {
                writeln!(out, "  {} -> {};", name(id), name(next))
                    .expect("String write never fails");
            }
        }

        out.push_str("}\n");
        out
    }
}

struct Numbering {
    /// Reachable nodes except `END`, root first.
    order: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
}

impl Numbering {
    fn new(graph: &Graph<'_>) -> Self {
        let order: Vec<NodeId> = graph.reachable().into_iter().filter(|&id| id != END).collect();
        let index = order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Self { order, index }
    }

    fn name(&self, id: NodeId, prefix: &str, end: &str) -> String {
        match self.index.get(&id) {
            Some(n) => format!("{prefix}{n}"),
            None => end.to_owned(),
        }
    }
}

/// A leaf as written in a usage, without its own `[]`/`...` which the
/// graph already spells out as edges.
fn label(node: &Node) -> String {
    Node::from_parts(node.kind().clone(), false, false).to_string()
}

fn colored_label(node: &Node, c: Colors) -> String {
    let color = match node.kind() {
        NodeKind::Plain(_) => c.green,
        _ => c.blue,
    };
    format!("{color}{}{}", label(node), c.reset)
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
