//! Per-call match state: the tree walk with explicit rollback.

use crate::grammar::{Node, NodeKind, token_bounds};
use crate::input::{InputToken, InputTokens};

use super::Tracer;

/// One positional capture; `name` is `None` for literals.
#[derive(Debug)]
pub(super) struct Capture<'n> {
    pub name: Option<&'n str>,
    pub value: String,
}

pub(super) struct MatchState<'a, 's, 'n, T: Tracer> {
    input: &'a InputTokens<'s>,
    tracer: &'a mut T,
    pub captures: Vec<Capture<'n>>,
    /// Flag keys matched on the current path.
    pub allowed: Vec<&'n str>,
    /// Cap on the words the next multi-word variable may take.
    word_limit: Option<usize>,
    /// Cap on the repetitions the next repeat node may take.
    repeat_limit: Option<usize>,
    /// Repetitions taken by the last node `try_match` returned for.
    repeats: usize,
}

impl<'a, 's, 'n, T: Tracer> MatchState<'a, 's, 'n, T> {
    pub fn new(input: &'a InputTokens<'s>, tracer: &'a mut T) -> Self {
        Self {
            input,
            tracer,
            captures: Vec::new(),
            allowed: Vec::new(),
            word_limit: None,
            repeat_limit: None,
            repeats: 0,
        }
    }

    /// Matches `node` at token `pos`, returning the cursor after it.
    ///
    /// `is_last` demands that the match end exactly at the end of input.
    /// `reserve` is the number of tokens later siblings need at minimum.
    pub fn try_match(
        &mut self,
        node: &'n Node,
        pos: usize,
        is_last: bool,
        reserve: usize,
    ) -> Option<usize> {
        self.tracer.trace_enter(node, pos);
        let captures_mark = self.captures.len();
        let allowed_mark = self.allowed.len();
        let len = self.input.len();

        let result = self
            .match_repeated(node, pos, is_last, reserve)
            .filter(|&end| !is_last || end == len);

        let result = match result {
            Some(end) => Some(end),
            None => {
                self.rollback(captures_mark, allowed_mark);
                if node.is_optional() && (!is_last || pos == len) {
                    self.repeats = 0;
                    self.tracer.trace_skip(node, pos);
                    Some(pos)
                } else {
                    None
                }
            }
        };

        self.tracer.trace_exit(node, result);
        result
    }

    fn rollback(&mut self, captures_mark: usize, allowed_mark: usize) {
        let dropped = self.captures.len() - captures_mark;
        if dropped > 0 {
            self.tracer.trace_rollback(dropped);
        }
        self.captures.truncate(captures_mark);
        self.allowed.truncate(allowed_mark);
    }

    /// Greedy: once matched, a repeat node is matched again while that
    /// succeeds, advances and leaves `reserve` tokens for later siblings.
    fn match_repeated(
        &mut self,
        node: &'n Node,
        pos: usize,
        is_last: bool,
        reserve: usize,
    ) -> Option<usize> {
        if !node.is_repeat() {
            return self.match_kind(node, pos, is_last, reserve);
        }

        let limit = self.repeat_limit.take().unwrap_or(usize::MAX);
        let len = self.input.len();
        let mut end = self.match_kind(node, pos, false, reserve)?;
        let mut count = 1;
        while count < limit && len - end > reserve {
            let captures_mark = self.captures.len();
            let allowed_mark = self.allowed.len();
            match self.match_kind(node, end, false, reserve) {
                Some(next) if next > end => {
                    end = next;
                    count += 1;
                }
                _ => {
                    self.rollback(captures_mark, allowed_mark);
                    break;
                }
            }
        }
        self.repeats = count;
        Some(end)
    }

    fn match_kind(
        &mut self,
        node: &'n Node,
        pos: usize,
        is_last: bool,
        reserve: usize,
    ) -> Option<usize> {
        match node.kind() {
            NodeKind::Empty => Some(pos),
            NodeKind::Plain(content) => {
                let input = self.input;
                let token = input.get(pos).map(|t| t.text.as_str());
                let matched = token == Some(content.as_str());
                self.tracer.trace_leaf(node, token, matched);
                if !matched {
                    return None;
                }
                self.captures.push(Capture {
                    name: None,
                    value: content.clone(),
                });
                Some(pos + 1)
            }
            NodeKind::Var { name, multi_word } => {
                let input = self.input;
                let Some(InputToken { text, .. }) = input.get(pos) else {
                    self.tracer.trace_leaf(node, None, false);
                    return None;
                };

                let (value, consumed) = if *multi_word {
                    let remaining = input.len() - pos;
                    let words = remaining.saturating_sub(reserve).max(1);
                    let words = self.word_limit.take().map_or(words, |limit| words.min(limit));
                    (input.joined(pos..pos + words), words)
                } else {
                    (text.clone(), 1)
                };

                self.tracer.trace_leaf(node, Some(&value), true);
                self.captures.push(Capture {
                    name: Some(name.as_str()),
                    value,
                });
                Some(pos + consumed)
            }
            NodeKind::FloatingArg { key, value } => self.match_flag(key, value.as_deref(), pos),
            NodeKind::List(children) => self.match_sequence(children, pos, is_last, reserve),
            NodeKind::Or(options) => {
                for option in options {
                    if let Some(end) = self.try_match(option, pos, is_last, reserve) {
                        return Some(end);
                    }
                }
                None
            }
        }
    }

    /// Matches `children` in order starting at `pos`.
    ///
    /// A multi-word variable first takes every token its followers can spare;
    /// if the rest of the sequence then fails it is retried with one word less.
    /// Repeat nodes are retried the same way with one repetition less.
    ///
    /// Floating args consume no tokens, so a child followed only by them
    /// still has to reach the end of input when the sequence does.
    fn match_sequence(
        &mut self,
        children: &'n [Node],
        pos: usize,
        is_last: bool,
        reserve: usize,
    ) -> Option<usize> {
        let Some((child, rest)) = children.split_first() else {
            return Some(pos);
        };
        let rest_min: usize = rest.iter().map(|node| token_bounds(node).min).sum();
        let child_last = is_last && !rest.iter().any(Node::is_position_dependent);

        let mut limit = None;
        loop {
            let captures_mark = self.captures.len();
            let allowed_mark = self.allowed.len();

            if child.is_repeat() {
                self.repeat_limit = limit;
            } else {
                self.word_limit = limit;
            }
            self.repeats = 0;
            let end = self.try_match(child, pos, child_last, reserve + rest_min);
            self.word_limit = None;
            self.repeat_limit = None;
            let end = end?;
            let repeats = self.repeats;

            if let Some(done) = self.match_sequence(rest, end, is_last, reserve) {
                return Some(done);
            }
            self.rollback(captures_mark, allowed_mark);

            let taken = if child.is_repeat() { repeats } else { end - pos };
            if !(child.is_repeat() || is_multi_word(child)) || taken <= 1 {
                return None;
            }
            limit = Some(taken - 1);
        }
    }

    /// Flags are looked up by key, never by position, and consume no tokens.
    fn match_flag(
        &mut self,
        key: &'n str,
        value: Option<&'n Node>,
        pos: usize,
    ) -> Option<usize> {
        let input = self.input;
        let Some(given) = input.flags().get(key) else {
            self.tracer.trace_flag(key, None, false);
            return None;
        };

        let matched = match (given, value) {
            (None, None) => true,
            (None, Some(value)) => value.is_optional(),
            (Some(_), None) => false,
            (Some(text), Some(value)) => self.value_matches(text, value),
        };

        self.tracer.trace_flag(key, Some(given.as_deref()), matched);
        if matched {
            self.allowed.push(key);
            Some(pos)
        } else {
            None
        }
    }

    /// Matches a flag value as a single token against the value node.
    fn value_matches(&mut self, text: &str, node: &'n Node) -> bool {
        let input = InputTokens::single(text);
        let mut state = MatchState::new(&input, &mut *self.tracer);
        state.try_match(node, 0, true, 0).is_some()
    }
}

fn is_multi_word(node: &Node) -> bool {
    !node.is_repeat() && matches!(node.kind(), NodeKind::Var { multi_word: true, .. })
}
