//! Usage tree nodes.
//!
//! A [`Node`] is built once per usage string and never mutated afterwards.
//! The `optional`/`repeat` flags are only set by construction-time
//! transforms (brackets, `...`, alternation simplification, disambiguation).

use std::fmt;

/// A node of the usage tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    optional: bool,
    repeat: bool,
}

/// What a node matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Nothing. Always optional, never position-dependent.
    Empty,

    /// Literal token that must appear verbatim.
    Plain(String),

    /// Captures one token (or one-or-more tokens for `<name...>`) under `name`.
    Var { name: String, multi_word: bool },

    /// Order-independent `--key`, `--key=value` or `--key[=value]`.
    FloatingArg {
        key: String,
        value: Option<Box<Node>>,
    },

    /// Sequential composition.
    List(Vec<Node>),

    /// Mutually exclusive alternatives, tried in order.
    Or(Vec<Node>),
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            optional: false,
            repeat: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            kind: NodeKind::Empty,
            optional: true,
            repeat: false,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Plain(content.into()))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Var {
            name: name.into(),
            multi_word: false,
        })
    }

    /// Variable capturing one or more tokens (`<name...>`).
    pub fn multi_word_var(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Var {
            name: name.into(),
            multi_word: true,
        })
    }

    pub fn floating_arg(key: impl Into<String>, value: Option<Node>) -> Self {
        Self::new(NodeKind::FloatingArg {
            key: key.into(),
            value: value.map(Box::new),
        })
    }

    /// Sequence of children; optional iff every child is optional.
    pub fn list(children: Vec<Node>) -> Self {
        let optional = children.iter().all(Node::is_optional);
        Self {
            kind: NodeKind::List(children),
            optional,
            repeat: false,
        }
    }

    /// Alternation; optional if any option can match nothing.
    pub fn or(options: Vec<Node>) -> Self {
        let optional = options.iter().any(Node::is_optional);
        Self {
            kind: NodeKind::Or(options),
            optional,
            repeat: false,
        }
    }

    /// Wraps children without creating a `List` for fewer than two of them.
    pub(crate) fn sequence(mut children: Vec<Node>) -> Self {
        match children.len() {
            0 => Self::empty(),
            1 => children.pop().unwrap_or_else(Self::empty),
            _ => Self::list(children),
        }
    }

    /// Marks the node optional (`[x]`).
    pub fn into_optional(mut self) -> Self {
        self.set_optional();
        self
    }

    /// Marks the node repeating (`x...`).
    pub fn into_repeat(mut self) -> Self {
        self.set_repeat();
        self
    }

    pub(crate) fn set_optional(&mut self) {
        if !self.is_empty() {
            self.optional = true;
        }
    }

    pub(crate) fn set_repeat(&mut self) {
        if !self.is_empty() {
            self.repeat = true;
        }
    }

    /// Copy of this node with the optional flag cleared.
    pub(crate) fn to_required(&self) -> Self {
        let mut copy = self.clone();
        if !copy.is_empty() {
            copy.optional = false;
        }
        copy
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn into_parts(self) -> (NodeKind, bool, bool) {
        (self.kind, self.optional, self.repeat)
    }

    pub(crate) fn from_parts(kind: NodeKind, optional: bool, repeat: bool) -> Self {
        let optional = optional || matches!(kind, NodeKind::Empty);
        let repeat = repeat && !matches!(kind, NodeKind::Empty);
        Self {
            kind,
            optional,
            repeat,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, NodeKind::Empty)
    }

    /// Leaf nodes are the ones a graph step can be backed by.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Plain(_) | NodeKind::Var { .. } | NodeKind::FloatingArg { .. }
        )
    }

    /// Whether matching this node depends on token order.
    pub fn is_position_dependent(&self) -> bool {
        match &self.kind {
            NodeKind::Plain(_) | NodeKind::Var { .. } => true,
            NodeKind::Empty | NodeKind::FloatingArg { .. } => false,
            NodeKind::List(children) | NodeKind::Or(children) => {
                children.iter().any(Node::is_position_dependent)
            }
        }
    }

    /// Leaf nodes of this tree in pre-order.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match &self.kind {
            NodeKind::Empty => {}
            NodeKind::Plain(_) | NodeKind::Var { .. } | NodeKind::FloatingArg { .. } => {
                out.push(self)
            }
            NodeKind::List(children) | NodeKind::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Where a node is printed, which decides whether a composite needs parens.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Top,
    Sequence,
    Alternative,
}

impl Node {
    fn write(&self, f: &mut fmt::Formatter<'_>, position: Position) -> fmt::Result {
        let (composite, needs_group, implied_optional) = match &self.kind {
            NodeKind::List(children) => (
                true,
                position == Position::Sequence,
                children.iter().all(Node::is_optional),
            ),
            NodeKind::Or(options) => (
                true,
                position != Position::Top,
                options.iter().any(Node::is_optional),
            ),
            NodeKind::Empty => (false, false, true),
            _ => (false, false, false),
        };
        let brackets = self.optional && !implied_optional;
        let parens = composite && (self.repeat || (needs_group && !brackets));

        if brackets {
            f.write_str("[")?;
        }
        if parens {
            f.write_str("(")?;
        }

        self.write_core(f)?;

        if parens {
            f.write_str(")")?;
        }
        if self.repeat {
            f.write_str("...")?;
        }
        if brackets {
            f.write_str("]")?;
        }
        Ok(())
    }

    fn write_core(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Empty => f.write_str("()"),
            NodeKind::Plain(content) => f.write_str(content),
            NodeKind::Var { name, multi_word } => {
                write!(f, "<{}{}>", name, if *multi_word { "..." } else { "" })
            }
            NodeKind::FloatingArg { key, value } => {
                write!(f, "--{}", key)?;
                match value {
                    None => Ok(()),
                    Some(value) if value.is_optional() && !value.is_empty() => {
                        f.write_str("[=")?;
                        value.to_required().write(f, Position::Sequence)?;
                        f.write_str("]")
                    }
                    Some(value) => {
                        f.write_str("=")?;
                        value.write(f, Position::Sequence)
                    }
                }
            }
            NodeKind::List(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    child.write(f, Position::Sequence)?;
                }
                Ok(())
            }
            NodeKind::Or(options) => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    option.write(f, Position::Alternative)?;
                }
                Ok(())
            }
        }
    }
}

/// Renders the node back into usage grammar syntax.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, Position::Top)
    }
}
