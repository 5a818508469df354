//! Matching raw input against a usage tree.
//!
//! The walk is recursive descent with rollback: every node attempt records
//! how many captures and allowed flags existed on entry and truncates back
//! to that on failure. An `Or` commits to the first option that succeeds;
//! there is no backtracking into it if a later sibling fails.
//!
//! Success additionally requires that every positional token was consumed
//! and that every flag in the input was matched somewhere on the taken path.

mod state;
mod trace;

#[cfg(test)]
mod matcher_tests;
#[cfg(test)]
mod trace_tests;

use indexmap::IndexMap;

use crate::grammar::{Node, TokenBounds, token_bounds};
use crate::input::{InputError, InputTokens, tokenize_input};

use state::{Capture, MatchState};

pub use trace::{NoopTracer, PrintTracer, Tracer, Verdict};

/// Captured arguments in capture order, flags last.
///
/// Variables are keyed by name, literals by `unnamed_<n>` (ordinal among
/// literals), flags by key with `""` for a flag given without a value.
pub type Captures = IndexMap<String, String>;

/// Matches input against one usage tree. Reusable, but not shareable while
/// a match is running.
pub struct Matcher<'n, T: Tracer = NoopTracer> {
    node: &'n Node,
    bounds: TokenBounds,
    tracer: T,
}

impl<'n> Matcher<'n, NoopTracer> {
    pub fn new(node: &'n Node) -> Self {
        Self {
            node,
            bounds: token_bounds(node),
            tracer: NoopTracer,
        }
    }
}

impl<'n, T: Tracer> Matcher<'n, T> {
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> Matcher<'n, U> {
        Matcher {
            node: self.node,
            bounds: self.bounds,
            tracer,
        }
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn into_tracer(self) -> T {
        self.tracer
    }

    /// Tokenizes and matches. Malformed input is an error; input that does
    /// not fit the usage is `Ok(None)`.
    pub fn match_input(&mut self, input: &str) -> Result<Option<Captures>, InputError> {
        let tokens = tokenize_input(input)?;
        Ok(self.match_tokens(&tokens))
    }

    pub fn match_tokens(&mut self, input: &InputTokens<'_>) -> Option<Captures> {
        let count = input.len();
        if !self.bounds.contains(count) {
            self.tracer.trace_verdict(Verdict::OutOfBounds {
                count,
                bounds: self.bounds,
            });
            return None;
        }

        let mut state = MatchState::new(input, &mut self.tracer);
        let matched = state.try_match(self.node, 0, true, 0).is_some();
        let MatchState {
            captures, allowed, ..
        } = state;

        if !matched {
            self.tracer.trace_verdict(Verdict::Mismatch);
            return None;
        }

        if let Some(key) = input
            .flags()
            .keys()
            .find(|key| !allowed.contains(&key.as_str()))
        {
            self.tracer.trace_verdict(Verdict::UnexpectedFlag(key));
            return None;
        }

        self.tracer.trace_verdict(Verdict::Matched);
        Some(collect_captures(captures, input))
    }
}

/// Tokenizes `input` and matches it against `node`.
pub fn match_input(input: &str, node: &Node) -> Result<Option<Captures>, InputError> {
    Matcher::new(node).match_input(input)
}

fn collect_captures(captures: Vec<Capture<'_>>, input: &InputTokens<'_>) -> Captures {
    let mut out = Captures::new();
    let mut unnamed = 0;

    for Capture { name, value } in captures {
        match name {
            Some(name) => match out.get_mut(name) {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(&value);
                }
                None => {
                    out.insert(name.to_owned(), value);
                }
            },
            None => {
                out.insert(format!("unnamed_{unnamed}"), value);
                unnamed += 1;
            }
        }
    }

    for (key, value) in input.flags() {
        out.insert(key.clone(), value.clone().unwrap_or_default());
    }

    out
}
