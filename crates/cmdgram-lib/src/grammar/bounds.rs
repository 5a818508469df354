//! Token count bounds of a usage tree.
//!
//! Counts positional tokens only; floating arguments are stripped from the
//! input before positional matching, so they contribute nothing.

use std::fmt;

use super::node::{Node, NodeKind};

/// How many positional tokens a node can consume. `max` is `None` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBounds {
    pub min: usize,
    pub max: Option<usize>,
}

impl TokenBounds {
    pub const ZERO: Self = Self {
        min: 0,
        max: Some(0),
    };

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

/// `min..=max`, with `∞` for an unbounded max.
impl fmt::Display for TokenBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..={max}", self.min),
            None => write!(f, "{}..=∞", self.min),
        }
    }
}

pub fn token_bounds(node: &Node) -> TokenBounds {
    let TokenBounds { min, max } = match node.kind() {
        NodeKind::Empty | NodeKind::FloatingArg { .. } => TokenBounds::ZERO,
        NodeKind::Plain(_) => TokenBounds {
            min: 1,
            max: Some(1),
        },
        NodeKind::Var { multi_word, .. } => TokenBounds {
            min: 1,
            max: if *multi_word { None } else { Some(1) },
        },
        NodeKind::List(children) => children.iter().map(token_bounds).fold(
            TokenBounds::ZERO,
            |acc, child| TokenBounds {
                min: acc.min + child.min,
                max: acc.max.zip(child.max).map(|(a, b)| a + b),
            },
        ),
        NodeKind::Or(options) => {
            let bounds: Vec<TokenBounds> = options.iter().map(token_bounds).collect();
            TokenBounds {
                min: bounds.iter().map(|b| b.min).min().unwrap_or(0),
                max: bounds
                    .iter()
                    .try_fold(0, |acc, b| b.max.map(|max| acc.max(max))),
            }
        }
    };

    TokenBounds {
        min: if node.is_optional() { 0 } else { min },
        max: match max {
            Some(0) => Some(0),
            _ if node.is_repeat() => None,
            max => max,
        },
    }
}
