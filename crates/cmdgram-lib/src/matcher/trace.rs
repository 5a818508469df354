//! Tracing infrastructure for debugging matches.
//!
//! `NoopTracer` methods are `#[inline(always)]` and empty, so an untraced
//! [`Matcher`](super::Matcher) compiles down to the bare walk. `PrintTracer`
//! keeps its own indentation stack; no tracing state lives in the matcher.

use crate::Colors;
use crate::grammar::{Node, NodeKind, TokenBounds};

/// Final outcome of a match, reported once per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Matched,
    /// Positional token count outside what the usage accepts.
    OutOfBounds {
        count: usize,
        bounds: TokenBounds,
    },
    /// The tree walk failed.
    Mismatch,
    /// A flag was given that the taken path does not allow.
    UnexpectedFlag(&'a str),
}

/// Instrumentation hooks, called by the matcher as it walks the tree.
pub trait Tracer {
    /// Before trying `node` at token `pos`.
    fn trace_enter(&mut self, node: &Node, pos: usize);

    /// After trying `node`; `result` is the new cursor.
    fn trace_exit(&mut self, node: &Node, result: Option<usize>);

    /// A literal or variable compared against a token (`None` at end of input).
    fn trace_leaf(&mut self, node: &Node, token: Option<&str>, matched: bool);

    /// A floating arg looked up; `given` is `None` when the flag is absent.
    fn trace_flag(&mut self, key: &str, given: Option<Option<&str>>, matched: bool);

    /// An optional node failed and was skipped.
    fn trace_skip(&mut self, node: &Node, pos: usize);

    /// Captures dropped after a failure.
    fn trace_rollback(&mut self, captures: usize);

    fn trace_verdict(&mut self, verdict: Verdict<'_>);
}

/// No-op tracer that gets optimized away completely.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _node: &Node, _pos: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _node: &Node, _result: Option<usize>) {}

    #[inline(always)]
    fn trace_leaf(&mut self, _node: &Node, _token: Option<&str>, _matched: bool) {}

    #[inline(always)]
    fn trace_flag(&mut self, _key: &str, _given: Option<Option<&str>>, _matched: bool) {}

    #[inline(always)]
    fn trace_skip(&mut self, _node: &Node, _pos: usize) {}

    #[inline(always)]
    fn trace_rollback(&mut self, _captures: usize) {}

    #[inline(always)]
    fn trace_verdict(&mut self, _verdict: Verdict<'_>) {}
}

/// Tracer that collects an indented, human-readable trace.
///
/// Composite nodes (sequences, alternations, repeats) open a level; leaves
/// and flags print one line each.
#[derive(Debug, Default)]
pub struct PrintTracer {
    lines: Vec<String>,
    /// One entry per `trace_enter`, true if it opened a level.
    levels: Vec<bool>,
    depth: usize,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(colors: Colors) -> Self {
        Self {
            colors,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, content: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{content}"));
    }

    fn mark(&self, matched: bool) -> String {
        let c = self.colors;
        if matched {
            format!("{}✓{}", c.green, c.reset)
        } else {
            format!("{}✗{}", c.red, c.reset)
        }
    }
}

fn opens_level(node: &Node) -> bool {
    node.is_repeat() || matches!(node.kind(), NodeKind::List(_) | NodeKind::Or(_))
}

impl Tracer for PrintTracer {
    fn trace_enter(&mut self, node: &Node, pos: usize) {
        let opens = opens_level(node);
        self.levels.push(opens);
        if opens {
            let c = self.colors;
            self.push(format!("{}{}{} @{}", c.dim, node, c.reset, pos));
            self.depth += 1;
        }
    }

    fn trace_exit(&mut self, _node: &Node, result: Option<usize>) {
        if self.levels.pop() != Some(true) {
            return;
        }
        self.depth = self.depth.saturating_sub(1);
        let line = match result {
            Some(end) => format!("→ @{end}"),
            None => self.mark(false),
        };
        self.push(line);
    }

    fn trace_leaf(&mut self, node: &Node, token: Option<&str>, matched: bool) {
        let mark = self.mark(matched);
        let token = match token {
            Some(text) => format!("{text:?}"),
            None => "end of input".to_owned(),
        };
        self.push(format!("{mark} {node} {token}"));
    }

    fn trace_flag(&mut self, key: &str, given: Option<Option<&str>>, matched: bool) {
        let mark = self.mark(matched);
        let c = self.colors;
        let given = match given {
            None => "absent".to_owned(),
            Some(None) => "given".to_owned(),
            Some(Some(value)) => format!("= {value:?}"),
        };
        self.push(format!("{mark} {}--{key}{} {given}", c.blue, c.reset));
    }

    fn trace_skip(&mut self, node: &Node, pos: usize) {
        let c = self.colors;
        self.push(format!("{}~ skip {node} @{pos}{}", c.dim, c.reset));
    }

    fn trace_rollback(&mut self, captures: usize) {
        let c = self.colors;
        self.push(format!("{}↩ rollback {captures}{}", c.red, c.reset));
    }

    fn trace_verdict(&mut self, verdict: Verdict<'_>) {
        let c = self.colors;
        let line = match verdict {
            Verdict::Matched => format!("{}match{}", c.green, c.reset),
            Verdict::OutOfBounds { count, bounds } => {
                format!(
                    "{}no match:{} {count} tokens, expected {bounds}",
                    c.red, c.reset
                )
            }
            Verdict::Mismatch => format!("{}no match{}", c.red, c.reset),
            Verdict::UnexpectedFlag(key) => {
                format!("{}no match:{} --{key} not allowed here", c.red, c.reset)
            }
        };
        self.depth = 0;
        self.push(line);
    }
}
