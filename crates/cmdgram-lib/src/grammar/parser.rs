//! Usage string to [`Node`] tree.
//!
//! Works recursively over token ranges: a group is located by scanning for
//! its matching close delimiter and then built as its own range.
//!
//! Precedence, from loosest to tightest: `|`, juxtaposition, `...`.

use rowan::TextRange;

use super::disambiguate::fix_position_dependence;
use super::error::{GrammarError, GrammarErrorKind};
use super::lexer::{Token, TokenKind, lex, token_text};
use super::node::{Node, NodeKind};

/// Default nesting limit for `(`/`[` groups.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Builder-pattern parser for usage strings.
///
/// ```
/// use cmdgram_lib::GrammarParser;
///
/// let node = GrammarParser::new("[a] [b]")
///     .fix_position_dependence(true)
///     .parse()
///     .unwrap();
/// assert_eq!(node.to_string(), "[a]|a [b]");
/// ```
pub struct GrammarParser<'s> {
    source: &'s str,
    fix_position_dependence: bool,
    recursion_limit: Option<u32>,
}

impl<'s> GrammarParser<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            fix_position_dependence: false,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Rewrite sequences of adjacent optional positional elements into
    /// alternations so that no prefix is ambiguous.
    pub fn fix_position_dependence(mut self, value: bool) -> Self {
        self.fix_position_dependence = value;
        self
    }

    /// Maximum group nesting depth. `None` disables the check.
    pub fn recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(self) -> Result<Node, GrammarError> {
        let tokens = lex(self.source)?;
        let mut builder = TreeBuilder {
            source: self.source,
            tokens,
            depth: 0,
            recursion_limit: self.recursion_limit,
        };
        let node = builder.build(0, builder.tokens.len())?;

        if self.fix_position_dependence {
            Ok(fix_position_dependence(node))
        } else {
            Ok(node)
        }
    }
}

/// Parses `usage` with default limits.
pub fn parse_grammar(usage: &str, fix_position_dependence: bool) -> Result<Node, GrammarError> {
    GrammarParser::new(usage)
        .fix_position_dependence(fix_position_dependence)
        .parse()
}

struct TreeBuilder<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    depth: u32,
    recursion_limit: Option<u32>,
}

impl<'s> TreeBuilder<'s> {
    fn text(&self, idx: usize) -> &'s str {
        token_text(self.source, &self.tokens[idx])
    }

    fn error(&self, kind: GrammarErrorKind, idx: usize) -> GrammarError {
        GrammarError::new(kind, self.tokens[idx].span)
    }

    /// Builds the tokens in `start..end` into a single node.
    fn build(&mut self, start: usize, end: usize) -> Result<Node, GrammarError> {
        let mut alternation: Option<Alternation> = None;
        let mut sequence = Sequence::default();
        let mut idx = start;

        while idx < end {
            let token = self.tokens[idx];
            match token.kind {
                TokenKind::ParenOpen | TokenKind::BracketOpen => {
                    let close = self.find_close(idx, end)?;
                    let mut node = self.build_group(idx, close)?;
                    if token.kind == TokenKind::BracketOpen {
                        node.set_optional();
                    }
                    sequence.push(node);
                    idx = close + 1;
                }
                TokenKind::ParenClose | TokenKind::BracketClose => {
                    return Err(self.error(GrammarErrorKind::UnexpectedClose, idx));
                }
                TokenKind::Pipe => {
                    let branch = std::mem::take(&mut sequence).finish();
                    alternation.get_or_insert_default().push(branch);
                    idx += 1;
                }
                TokenKind::Ellipsis => {
                    sequence.repeat_last(token.span)?;
                    idx += 1;
                }
                TokenKind::Variable => {
                    sequence.push(self.variable(idx)?);
                    idx += 1;
                }
                TokenKind::Literal if self.text(idx).starts_with("--") => {
                    let (flag, next) = self.flag(idx, end)?;
                    sequence.push(flag);
                    idx = next;
                }
                TokenKind::Literal | TokenKind::Equals => {
                    sequence.push(Node::plain(self.text(idx)));
                    idx += 1;
                }
            }
        }

        let last = sequence.finish();
        Ok(match alternation {
            Some(mut alternation) => {
                alternation.push(last);
                alternation.finish()
            }
            None => last,
        })
    }

    /// Builds the inside of the group opened at `open` and closed at `close`.
    fn build_group(&mut self, open: usize, close: usize) -> Result<Node, GrammarError> {
        self.depth += 1;
        if self.recursion_limit.is_some_and(|limit| self.depth > limit) {
            return Err(self.error(GrammarErrorKind::RecursionLimitExceeded, open));
        }
        let node = self.build(open + 1, close);
        self.depth -= 1;
        node
    }

    /// Index of the delimiter closing the group opened at `open`.
    ///
    /// Only delimiters of the same type are counted, so `([)]` fails inside.
    fn find_close(&self, open: usize, end: usize) -> Result<usize, GrammarError> {
        let open_kind = self.tokens[open].kind;
        let close_kind = match open_kind {
            TokenKind::ParenOpen => TokenKind::ParenClose,
            _ => TokenKind::BracketClose,
        };

        let mut depth = 0usize;
        for idx in open..end {
            let kind = self.tokens[idx].kind;
            if kind == open_kind {
                depth += 1;
            } else if kind == close_kind {
                depth -= 1;
                if depth == 0 {
                    return Ok(idx);
                }
            }
        }

        let kind = match open_kind {
            TokenKind::ParenOpen => GrammarErrorKind::UnclosedGroup,
            _ => GrammarErrorKind::UnclosedOptional,
        };
        Err(self.error(kind, open))
    }

    fn variable(&self, idx: usize) -> Result<Node, GrammarError> {
        let text = self.text(idx);
        let name = &text[1..text.len() - 1];

        if let Some(stem) = name.strip_suffix("...") {
            if stem.is_empty() {
                return Err(self.error(GrammarErrorKind::EmptyVariableName, idx));
            }
            return Ok(Node::multi_word_var(stem));
        }
        if name.is_empty() {
            return Err(self.error(GrammarErrorKind::EmptyVariableName, idx));
        }
        Ok(Node::var(name))
    }

    /// Parses `--key`, `--key=atom` or `--key[=atom]` starting at `idx`.
    ///
    /// Returns the flag node and the index just past it.
    fn flag(&mut self, idx: usize, end: usize) -> Result<(Node, usize), GrammarError> {
        let key = &self.text(idx)[2..];
        if key.is_empty() {
            return Err(self.error(GrammarErrorKind::MissingFlagKey, idx));
        }

        let kind_at = |i: usize| (i < end).then(|| self.tokens[i].kind);

        match (kind_at(idx + 1), kind_at(idx + 2)) {
            (Some(TokenKind::Equals), _) => {
                let value_start = idx + 2;
                let value_end = self.atom_end(value_start, end, idx + 1)?;
                let value = self.build_atom(value_start, value_end)?;
                Ok((Node::floating_arg(key, Some(value)), value_end))
            }
            (Some(TokenKind::BracketOpen), Some(TokenKind::Equals)) => {
                let value_start = idx + 3;
                let value_end = self.atom_end(value_start, end, idx + 2)?;
                if kind_at(value_end) != Some(TokenKind::BracketClose) {
                    return Err(GrammarError::new(
                        GrammarErrorKind::UnclosedFlagValue,
                        self.tokens[idx + 1].span,
                    ));
                }
                let value = self.build_atom(value_start, value_end)?.into_optional();
                Ok((Node::floating_arg(key, Some(value)), value_end + 1))
            }
            _ => Ok((Node::floating_arg(key, None), idx + 1)),
        }
    }

    /// End (exclusive) of the single atom starting at `idx`.
    ///
    /// `equals` is the `=` the atom belongs to, used to locate errors.
    fn atom_end(&self, idx: usize, end: usize, equals: usize) -> Result<usize, GrammarError> {
        if idx >= end {
            return Err(self.error(GrammarErrorKind::MissingFlagValue, equals));
        }
        match self.tokens[idx].kind {
            kind if kind.is_open() => Ok(self.find_close(idx, end)? + 1),
            TokenKind::Pipe | TokenKind::Ellipsis | TokenKind::Equals => {
                Err(self.error(GrammarErrorKind::MissingFlagValue, equals))
            }
            kind if kind.is_close() => Err(self.error(GrammarErrorKind::MissingFlagValue, equals)),
            _ => Ok(idx + 1),
        }
    }

    fn build_atom(&mut self, start: usize, end: usize) -> Result<Node, GrammarError> {
        if self.tokens[start].kind == TokenKind::Variable {
            return self.variable(start);
        }
        if self.tokens[start].kind == TokenKind::Literal {
            return Ok(Node::plain(self.text(start)));
        }
        self.build(start, end)
    }
}

/// Juxtaposed atoms between two `|` (or group boundaries).
#[derive(Default)]
struct Sequence {
    atoms: Vec<Node>,
    last: Option<Last>,
}

/// What the most recent atom was, for `...`.
enum Last {
    Atom,
    Empty,
}

impl Sequence {
    fn push(&mut self, node: Node) {
        if node.is_empty() {
            self.last = Some(Last::Empty);
        } else {
            self.atoms.push(node);
            self.last = Some(Last::Atom);
        }
    }

    fn repeat_last(&mut self, span: TextRange) -> Result<(), GrammarError> {
        match self.last {
            None => Err(GrammarError::new(
                GrammarErrorKind::StandaloneEllipsis,
                span,
            )),
            // `()...` repeats nothing
            Some(Last::Empty) => Ok(()),
            Some(Last::Atom) => {
                if let Some(atom) = self.atoms.last_mut() {
                    atom.set_repeat();
                }
                Ok(())
            }
        }
    }

    fn finish(self) -> Node {
        Node::sequence(self.atoms)
    }
}

/// Options collected so far for an `a|b|...` alternation.
#[derive(Default)]
struct Alternation {
    options: Vec<Node>,
    optional: bool,
}

impl Alternation {
    fn push(&mut self, option: Node) {
        if option.is_empty() {
            self.optional = true;
            return;
        }
        if option.is_optional() {
            self.optional = true;
        }

        let (kind, optional, repeat) = option.into_parts();
        match kind {
            NodeKind::Or(nested) if !repeat => {
                for nested_option in nested {
                    self.push(nested_option);
                }
            }
            kind => self.options.push(Node::from_parts(kind, optional, repeat)),
        }
    }

    fn finish(mut self) -> Node {
        match self.options.len() {
            0 => Node::empty(),
            1 => {
                let option = self.options.pop().unwrap_or_else(Node::empty);
                if self.optional {
                    option.into_optional()
                } else {
                    option
                }
            }
            _ => {
                let or = Node::or(self.options);
                if self.optional { or.into_optional() } else { or }
            }
        }
    }
}
