//! Raw command input: positional tokens plus floating `--key[=value]` args.
//!
//! Splitting rules:
//! - whitespace separates tokens, `\` escapes the next character
//! - `'...'` and `"..."` open only at the start of a token and run to the
//!   matching unescaped quote
//! - `--key` and `--key=value` at the start of a token are pulled out of the
//!   positional stream into an ordered key → value map
//! - `\n \r \t \b` decode to control characters, `\x` to `x`

mod tokenizer;


use std::ops::Range;

use indexmap::IndexMap;
use rowan::TextRange;

use crate::diagnostics::Diagnostic;

pub use tokenizer::tokenize_input;

/// Why raw input was rejected before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputErrorKind {
    /// The quote character that was never closed.
    UnterminatedQuote(char),
    MissingFlagKey,
}

impl InputErrorKind {
    pub fn message(self) -> String {
        match self {
            Self::UnterminatedQuote(quote) => format!("unterminated {quote} quote"),
            Self::MissingFlagKey => "`--` is not followed by a flag key".to_owned(),
        }
    }
}

/// Malformed raw input, located in the input string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} at {:?}", .kind.message(), .span)]
pub struct InputError {
    pub kind: InputErrorKind,
    pub span: TextRange,
}

impl InputError {
    pub fn new(kind: InputErrorKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

impl Diagnostic for InputError {
    fn message(&self) -> String {
        self.kind.message()
    }

    fn span(&self) -> TextRange {
        self.span
    }

    fn hint(&self) -> Option<&'static str> {
        match self.kind {
            InputErrorKind::UnterminatedQuote(_) => Some("close the quote or escape it with `\\`"),
            InputErrorKind::MissingFlagKey => None,
        }
    }
}

/// One positional token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputToken {
    /// Decoded text.
    pub text: String,
    /// Raw extent in the input, inside the quotes for quoted tokens.
    pub span: TextRange,
}

/// Tokenized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTokens<'s> {
    source: &'s str,
    tokens: Vec<InputToken>,
    flags: IndexMap<String, Option<String>>,
}

impl<'s> InputTokens<'s> {
    /// A lone, already decoded token with no flags.
    pub(crate) fn single(text: &'s str) -> Self {
        Self {
            source: text,
            tokens: vec![InputToken {
                text: text.to_owned(),
                span: TextRange::up_to((text.len() as u32).into()),
            }],
            flags: IndexMap::new(),
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn tokens(&self) -> &[InputToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&InputToken> {
        self.tokens.get(idx)
    }

    /// Floating args in input order; `None` for a flag given without `=`.
    pub fn flags(&self) -> &IndexMap<String, Option<String>> {
        &self.flags
    }

    /// Decoded texts of tokens `range`, joined by the whitespace written
    /// between them. Quote marks and floating args in between are left out.
    pub fn joined(&self, range: Range<usize>) -> String {
        let Some(tokens) = self.tokens.get(range) else {
            return String::new();
        };

        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                let start: usize = tokens[i - 1].span.end().into();
                let end: usize = token.span.start().into();
                out.push_str(separator(&self.source[start..end]));
            }
            out.push_str(&token.text);
        }
        out
    }
}

/// The whitespace run right before the next token, or a single space when
/// only a quote mark or a floating arg stands between the two.
fn separator(gap: &str) -> &str {
    let gap = gap.trim_end_matches(['"', '\'']);
    let space = &gap[gap.trim_end().len()..];
    if space.is_empty() && !gap.trim_start_matches(['"', '\'']).is_empty() {
        " "
    } else {
        space
    }
}

/// Decodes backslash escapes. A trailing lone `\` is kept.
pub(crate) fn decode(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_owned();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
