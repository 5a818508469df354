//! Graph compilation entry points.

use crate::grammar::{Node, NodeKind};
use crate::{Error, Result};

use super::Graph;
use super::lower::GraphBuilder;

/// Floating args beyond which expansion is refused by default.
pub const DEFAULT_EXPANSION_LIMIT: usize = 6;

/// Builder for [`Graph`]s.
///
/// By default floating args are handled by shared "flags" nodes that absorb
/// any number of them in any order. [`expand_flags`](Self::expand_flags)
/// instead spells out every placement of every floating arg, which is exact
/// but grows factorially in their count.
///
/// ```
/// use cmdgram_lib::{GraphCompiler, parse_grammar};
///
/// let usage = parse_grammar("a [b] c", false).unwrap();
/// let graph = GraphCompiler::new(&usage).compile().unwrap();
/// assert_eq!(graph.dump(), "N0: a → N1, N2\nN1: c → END\nN2: b → N1\n");
/// ```
#[derive(Debug, Clone)]
pub struct GraphCompiler<'a> {
    root: &'a Node,
    expand_flags: bool,
    expansion_limit: Option<usize>,
}

impl<'a> GraphCompiler<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self {
            root,
            expand_flags: false,
            expansion_limit: Some(DEFAULT_EXPANSION_LIMIT),
        }
    }

    pub fn expand_flags(mut self, expand: bool) -> Self {
        self.expand_flags = expand;
        self
    }

    /// Maximum number of floating args to expand. `None` disables the check.
    pub fn expansion_limit(mut self, limit: Option<usize>) -> Self {
        self.expansion_limit = limit;
        self
    }

    pub fn compile(&self) -> Result<Graph<'a>> {
        if self.expand_flags
            && let Some(limit) = self.expansion_limit
        {
            let count = floating_count(self.root);
            if count > limit {
                return Err(Error::ExpansionLimitExceeded { count, limit });
            }
        }
        Ok(self.build())
    }

    fn build(&self) -> Graph<'a> {
        let mut builder = GraphBuilder::new();
        let mut root = builder.lower_root(self.root);

        if !builder.floating().is_empty() {
            root = builder.phi_root(root);
            if self.expand_flags {
                builder.expand_flags(root);
            } else {
                builder.inject_flags(root);
            }
        }

        builder.splice_phis(root);
        builder.finish(root)
    }
}

/// Lowers `root` into a graph without any expansion limit.
pub fn compile_graph(root: &Node, expand_flags: bool) -> Graph<'_> {
    GraphCompiler::new(root).expand_flags(expand_flags).build()
}

/// Number of subtrees lowering sets aside as floating args.
fn floating_count(node: &Node) -> usize {
    if node.is_empty() {
        return 0;
    }
    if !node.is_position_dependent() {
        return 1;
    }
    match node.kind() {
        NodeKind::List(children) | NodeKind::Or(children) => {
            children.iter().map(floating_count).sum()
        }
        _ => 0,
    }
}
