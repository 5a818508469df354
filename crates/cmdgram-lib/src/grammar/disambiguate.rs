//! Position-dependence fix.
//!
//! `[a] [b]` accepts a single token without saying which slot it fills. The
//! rewrite turns every sequence with two or more optional positional elements
//! into an alternation where the k-th option keeps the k-th optional slot
//! optional, makes the earlier ones mandatory and drops the later ones:
//!
//! ```text
//! [a] x [b] [c]   →   [a] x | a x [b] | a x b [c]
//! ```
//!
//! Afterwards no sequence contains two optional position-dependent children.

use super::node::{Node, NodeKind};

/// Rewrites the tree bottom-up.
pub fn fix_position_dependence(node: Node) -> Node {
    let (kind, optional, repeat) = node.into_parts();
    match kind {
        NodeKind::List(children) => {
            let children = children.into_iter().map(fix_position_dependence).collect();
            disambiguate_list(children, optional, repeat)
        }
        NodeKind::Or(options) => {
            let options = options.into_iter().map(fix_position_dependence).collect();
            Node::from_parts(NodeKind::Or(options), optional, repeat)
        }
        NodeKind::FloatingArg { key, value } => {
            let value = value.map(|value| Box::new(fix_position_dependence(*value)));
            Node::from_parts(NodeKind::FloatingArg { key, value }, optional, repeat)
        }
        kind => Node::from_parts(kind, optional, repeat),
    }
}

fn is_ambiguous(node: &Node) -> bool {
    node.is_optional() && node.is_position_dependent()
}

fn disambiguate_list(children: Vec<Node>, optional: bool, repeat: bool) -> Node {
    let slots: Vec<usize> = children
        .iter()
        .enumerate()
        .filter(|(_, child)| is_ambiguous(child))
        .map(|(i, _)| i)
        .collect();

    if slots.len() < 2 {
        return Node::from_parts(NodeKind::List(children), optional, repeat);
    }

    let options = slots
        .iter()
        .map(|&slot| {
            let alternative = children
                .iter()
                .enumerate()
                .filter_map(|(i, child)| {
                    if !is_ambiguous(child) || i == slot {
                        Some(child.clone())
                    } else if i < slot {
                        Some(child.to_required())
                    } else {
                        None
                    }
                })
                .collect();
            Node::sequence(alternative)
        })
        .collect();

    let mut or = Node::or(options);
    if optional {
        or.set_optional();
    }
    if repeat {
        or.set_repeat();
    }
    or
}
