//! Tree → graph lowering and the passes that run on the raw arena.
//!
//! Every fresh node starts out pointing at `END`. Those `END` edges are the
//! node's open tails: chaining a follower means rewiring every `END` edge
//! reachable from the predecessor to the follower (`set_tails`). Keeping
//! the `END` edge while adding the follower is what makes a step optional.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::grammar::{Node, NodeKind};

use super::{Backing, END, Graph, GraphNode, NodeId};

pub(super) struct GraphBuilder<'a> {
    nodes: Vec<GraphNode<'a>>,
    floating: Vec<&'a Node>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new() -> Self {
        Self {
            nodes: vec![GraphNode {
                backing: Backing::End,
                next: Vec::new(),
            }],
            floating: Vec::new(),
        }
    }

    pub fn floating(&self) -> &[&'a Node] {
        &self.floating
    }

    fn add(&mut self, backing: Backing<'a>) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(GraphNode {
            backing,
            next: vec![END],
        });
        id
    }

    fn add_phi(&mut self) -> NodeId {
        self.add(Backing::Phi)
    }

    fn is_phi(&self, id: NodeId) -> bool {
        self.nodes[id as usize].is_phi()
    }

    fn next(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id as usize].next
    }

    fn next_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        &mut self.nodes[id as usize].next
    }

    fn connect(&mut self, from: NodeId, to: NodeId) {
        push_unique(self.next_mut(from), to);
    }

    fn remove_end(&mut self, id: NodeId) {
        let next = self.next_mut(id);
        if let Some(idx) = next.iter().position(|&n| n == END) {
            next.remove(idx);
        }
    }

    /// Rewires every `END` edge reachable from `start` to `tails`, keeping
    /// the `END` edge too if `keep_ends`. The tails themselves are not
    /// walked into.
    fn set_tails(&mut self, start: NodeId, tails: &[NodeId], keep_ends: bool) {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            let old = std::mem::take(self.next_mut(id));
            let mut new = Vec::with_capacity(old.len() + tails.len());
            for next in old {
                if next == END {
                    if keep_ends {
                        push_unique(&mut new, END);
                    }
                    for &tail in tails {
                        push_unique(&mut new, tail);
                    }
                } else {
                    push_unique(&mut new, next);
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            *self.next_mut(id) = new;
        }
    }

    /// Lowers the whole tree, collecting floating args on the side.
    pub fn lower_root(&mut self, root: &'a Node) -> NodeId {
        self.lower_sequence(std::slice::from_ref(root), false, true)
    }

    /// Chains `items` one after another and returns the entry node.
    ///
    /// With `ignore_optional` the caller handles skipping the whole chain,
    /// so an entry φ drops its own `END` bypass.
    fn lower_sequence(&mut self, items: &'a [Node], ignore_optional: bool, collect: bool) -> NodeId {
        let mut entry = None;
        let mut prev: Option<NodeId> = None;

        for node in items {
            if node.is_empty() {
                continue;
            }

            if collect && !node.is_position_dependent() {
                if prev.is_none() {
                    let phi = self.add_phi();
                    entry = Some(phi);
                    prev = Some(phi);
                }
                self.floating.push(node);
                continue;
            }

            let optional = node.is_optional();
            let step = self.lower_node(node, collect);
            if node.is_repeat() {
                self.set_tails(step, &[step], true);
            }

            let Some(prev_id) = prev else {
                let start = if optional {
                    let phi = self.add_phi();
                    self.connect(phi, step);
                    phi
                } else {
                    step
                };
                entry = Some(start);
                prev = Some(start);
                continue;
            };

            if self.is_phi(step) {
                // φ is inlined: the predecessor links straight to its successors
                if self.next(prev_id).contains(&END) {
                    self.remove_end(step);
                }
                let tails = self.next(step).to_vec();
                self.set_tails(prev_id, &tails, optional);
            } else {
                self.set_tails(prev_id, &[step], optional);
            }

            if !optional {
                prev = Some(step);
            }
        }

        let entry = entry.unwrap_or_else(|| self.add_phi());
        if ignore_optional && self.is_phi(entry) {
            self.remove_end(entry);
        }
        entry
    }

    fn lower_node(&mut self, node: &'a Node, collect: bool) -> NodeId {
        match node.kind() {
            NodeKind::Or(options) => {
                let tails: Vec<NodeId> = options
                    .iter()
                    .map(|option| {
                        self.lower_sequence(std::slice::from_ref(option), node.is_optional(), collect)
                    })
                    .collect();
                let phi = self.add_phi();
                self.set_tails(phi, &tails, false);
                phi
            }
            NodeKind::List(children) => self.lower_sequence(children, node.is_optional(), collect),
            _ => self.add(Backing::Leaf(node)),
        }
    }

    /// Puts a φ in front of a leaf root so flags can be injected before it.
    pub fn phi_root(&mut self, root: NodeId) -> NodeId {
        if self.is_phi(root) {
            return root;
        }
        let phi = self.add_phi();
        self.set_tails(phi, &[root], false);
        phi
    }

    /// `id`'s successors with φ nodes resolved to what they lead to.
    /// Direct successors keep their place; resolved ones are appended.
    /// φ cycles contribute nothing.
    fn resolved_successors(&self, id: NodeId) -> Vec<NodeId> {
        let next = self.next(id);
        let mut out: Vec<NodeId> = next.iter().copied().filter(|&n| !self.is_phi(n)).collect();
        let mut queue: VecDeque<NodeId> = next.iter().copied().filter(|&n| self.is_phi(n)).collect();
        let mut seen = HashSet::new();

        while let Some(phi) = queue.pop_front() {
            if !seen.insert(phi) {
                continue;
            }
            for &n in self.next(phi) {
                if self.is_phi(n) {
                    queue.push_back(n);
                } else {
                    push_unique(&mut out, n);
                }
            }
        }
        out
    }

    /// Every `(node, successor)` edge reachable from `root`, looking
    /// through φ nodes.
    fn connections(&self, root: NodeId) -> Vec<(NodeId, NodeId)> {
        let mut out = Vec::new();
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(id) = queue.pop_front() {
            for next in self.resolved_successors(id) {
                out.push((id, next));
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        out
    }

    /// Copies the subgraph at `id`, φ nodes resolved away. `copies` maps
    /// originals to copies so shared successors stay shared.
    fn deep_copy(&mut self, id: NodeId, copies: &mut HashMap<NodeId, NodeId>) -> NodeId {
        if id == END {
            return END;
        }
        if let Some(&copy) = copies.get(&id) {
            return copy;
        }

        let backing = self.nodes[id as usize].backing;
        let copy = self.add(backing);
        copies.insert(id, copy);
        self.next_mut(copy).clear();

        for next in self.resolved_successors(id) {
            let next_copy = self.deep_copy(next, copies);
            self.connect(copy, next_copy);
        }
        copy
    }

    /// Inserts one self-looping flags node per distinct successor, next to
    /// every existing edge.
    pub fn inject_flags(&mut self, root: NodeId) {
        let mut inserts: HashMap<NodeId, NodeId> = HashMap::new();

        for (current, next) in self.connections(root) {
            let insert = match inserts.get(&next) {
                Some(&insert) => insert,
                None => {
                    let flags = self.add(Backing::Flags);
                    self.connect(flags, flags);
                    self.set_tails(flags, &[next], false);
                    inserts.insert(next, flags);
                    flags
                }
            };
            self.connect(current, insert);
        }
    }

    /// For each floating arg in turn, offers it on every edge in front of
    /// a copy of the edge's continuation. The copies grow with every round.
    pub fn expand_flags(&mut self, root: NodeId) {
        for target in self.floating.clone() {
            let mut copies = HashMap::new();
            let mut inserts: HashMap<NodeId, NodeId> = HashMap::new();
            let mut edges = Vec::new();

            for (current, next) in self.connections(root) {
                let insert = match inserts.get(&next) {
                    Some(&insert) => insert,
                    None => {
                        let insert = self.lower_sequence(std::slice::from_ref(target), true, false);
                        let continuation = self.deep_copy(next, &mut copies);
                        self.set_tails(insert, &[continuation], false);
                        inserts.insert(next, insert);
                        insert
                    }
                };
                edges.push((current, insert));
            }

            for (current, insert) in edges {
                self.connect(current, insert);
            }
        }
    }

    /// Replaces every φ successor by the non-φ nodes it leads to. Only the
    /// root may remain a φ.
    pub fn splice_phis(&mut self, root: NodeId) {
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(id) = queue.pop_front() {
            let next = self.resolved_successors(id);
            for &n in &next {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
            *self.next_mut(id) = next;
        }
    }

    pub fn finish(self, root: NodeId) -> Graph<'a> {
        Graph {
            nodes: self.nodes,
            root,
            floating: self.floating,
        }
    }
}

fn push_unique(list: &mut Vec<NodeId>, id: NodeId) {
    if !list.contains(&id) {
        list.push(id);
    }
}
