//! Usage graphs: the tree lowered into a directed graph of steps.
//!
//! Every path from the root to [`END`] spells one accepted sequence of
//! leaves. Optional nodes become bypass edges, repeats become back edges,
//! alternations fan out and merge again.
//!
//! # Architecture
//!
//! ```text
//! Node → lower (with φ junctions) → [flag injection] → φ splicing → Graph
//! ```
//!
//! Nodes live in an arena addressed by [`NodeId`]; edges are successor
//! lists. Synthetic φ nodes only exist while building and are spliced out
//! before the graph is handed out, except for a φ root.

mod compiler;
mod dump;
mod lower;


use std::collections::{HashSet, VecDeque};

use crate::grammar::Node;

pub use compiler::{DEFAULT_EXPANSION_LIMIT, GraphCompiler, compile_graph};

/// Index into the graph's node arena.
pub type NodeId = u32;

/// The shared terminal node: a path may stop wherever it reaches `END`.
pub const END: NodeId = 0;

/// What a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing<'a> {
    End,
    /// Synthetic junction without a leaf.
    Phi,
    /// Absorbs any number of floating args before moving on.
    Flags,
    /// A `Plain`, `Var` or `FloatingArg` step.
    Leaf(&'a Node),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode<'a> {
    pub backing: Backing<'a>,
    /// Ordered, without duplicates.
    pub next: Vec<NodeId>,
}

impl<'a> GraphNode<'a> {
    pub fn is_end(&self) -> bool {
        matches!(self.backing, Backing::End)
    }

    pub fn is_phi(&self) -> bool {
        matches!(self.backing, Backing::Phi)
    }

    pub fn leaf(&self) -> Option<&'a Node> {
        match self.backing {
            Backing::Leaf(node) => Some(node),
            _ => None,
        }
    }
}

/// A compiled usage graph. Borrows leaves from the tree it was built from.
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    nodes: Vec<GraphNode<'a>>,
    root: NodeId,
    floating: Vec<&'a Node>,
}

impl<'a> Graph<'a> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &GraphNode<'a> {
        &self.nodes[id as usize]
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id as usize].next
    }

    /// Every node reachable from the root, in BFS order starting at it.
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut order = vec![self.root];
        let mut seen: HashSet<NodeId> = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);

        while let Some(id) = queue.pop_front() {
            for &next in self.successors(id) {
                if seen.insert(next) {
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// The floating-arg subtrees found while lowering, each once.
    pub fn floating_nodes(&self) -> &[&'a Node] {
        &self.floating
    }

    /// Arena size, unreachable leftovers included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
