//! Lexer for usage grammars.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! usage string only when the tree builder needs it.
//!
//! ## Ellipses
//!
//! `...` is never lexed on its own. Literal runs are split around every `...`
//! they contain, so `<a>...`, `x...y` and a bare `...` all yield `Ellipsis`
//! tokens. An ellipsis must be glued to whatever precedes it: one at the very
//! start of the usage or after whitespace is rejected here.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::error::{GrammarError, GrammarErrorKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("|")]
    Pipe,

    #[token("=")]
    Equals,

    /// `<name>` or `<name...>`, any characters up to the first `>`.
    #[regex(r"<[^>]*>")]
    Variable,

    /// Maximal run of non-structural characters. A `>` outside a variable is
    /// literal text.
    #[regex(r"[^\s()\[\]|=<>]+|>[^\s()\[\]|=<>]*", allow_greedy = true)]
    Literal,

    /// `...` split out of a literal run.
    Ellipsis,
}

impl TokenKind {
    pub fn is_open(self) -> bool {
        matches!(self, Self::ParenOpen | Self::BracketOpen)
    }

    pub fn is_close(self) -> bool {
        matches!(self, Self::ParenClose | Self::BracketClose)
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

pub(crate) fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes a usage string.
///
/// The only input logos cannot lex is a `<` without a closing `>`, which is
/// reported as [`GrammarErrorKind::UnterminatedVariable`].
pub fn lex(source: &str) -> Result<Vec<Token>, GrammarError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        match kind {
            Ok(TokenKind::Literal) => split_ellipses(source, span, &mut tokens)?,
            Ok(kind) => tokens.push(Token::new(kind, range_to_text_range(span))),
            Err(()) => {
                return Err(GrammarError::new(
                    GrammarErrorKind::UnterminatedVariable,
                    range_to_text_range(span.start..source.len()),
                ));
            }
        }
    }

    Ok(tokens)
}

/// Splits a literal run into literal and `Ellipsis` tokens.
fn split_ellipses(
    source: &str,
    span: Range<usize>,
    tokens: &mut Vec<Token>,
) -> Result<(), GrammarError> {
    let mut start = span.start;

    while let Some(offset) = source[start..span.end].find("...") {
        let dots = start + offset;
        if dots > start {
            tokens.push(Token::new(
                TokenKind::Literal,
                range_to_text_range(start..dots),
            ));
        }

        let detached = source[..dots]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        if detached {
            return Err(GrammarError::new(
                GrammarErrorKind::DetachedEllipsis,
                range_to_text_range(dots..dots + 3),
            ));
        }

        tokens.push(Token::new(
            TokenKind::Ellipsis,
            range_to_text_range(dots..dots + 3),
        ));
        start = dots + 3;
    }

    if start < span.end {
        tokens.push(Token::new(
            TokenKind::Literal,
            range_to_text_range(start..span.end),
        ));
    }

    Ok(())
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}
