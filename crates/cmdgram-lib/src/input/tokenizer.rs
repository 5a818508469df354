use std::ops::Range;

use indexmap::IndexMap;

use crate::grammar::lexer::range_to_text_range;

use super::{InputError, InputErrorKind, InputToken, InputTokens, decode};

/// Splits raw command input into positional tokens and floating args.
pub fn tokenize_input(input: &str) -> Result<InputTokens<'_>, InputError> {
    Tokenizer {
        source: input,
        pos: 0,
        tokens: Vec::new(),
        flags: IndexMap::new(),
    }
    .run()
}

struct Tokenizer<'s> {
    source: &'s str,
    pos: usize,
    tokens: Vec<InputToken>,
    flags: IndexMap<String, Option<String>>,
}

impl<'s> Tokenizer<'s> {
    fn run(mut self) -> Result<InputTokens<'s>, InputError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '"' || c == '\'' {
                let span = self.quoted(c)?;
                self.push_token(span);
            } else if self.rest().starts_with("--") {
                self.flag()?;
            } else {
                let start = self.pos;
                let end = self.unquoted_end();
                self.push_token(start..end);
            }
        }

        Ok(InputTokens {
            source: self.source,
            tokens: self.tokens,
            flags: self.flags,
        })
    }

    fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn push_token(&mut self, span: Range<usize>) {
        self.tokens.push(InputToken {
            text: decode(&self.source[span.clone()]),
            span: range_to_text_range(span),
        });
    }

    /// Consumes a quoted run starting at the opening quote; returns the content span.
    fn quoted(&mut self, quote: char) -> Result<Range<usize>, InputError> {
        let open = self.pos;
        self.bump();
        let start = self.pos;

        loop {
            match self.bump() {
                None => {
                    return Err(InputError::new(
                        InputErrorKind::UnterminatedQuote(quote),
                        range_to_text_range(open..self.source.len()),
                    ));
                }
                Some(c) if c == quote => return Ok(start..self.pos - c.len_utf8()),
                Some('\\') => {
                    self.bump();
                }
                Some(_) => {}
            }
        }
    }

    /// Consumes up to the next unescaped whitespace; returns the end offset.
    fn unquoted_end(&mut self) -> usize {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            self.bump();
            if c == '\\' {
                self.bump();
            }
        }
        self.pos
    }

    fn flag(&mut self) -> Result<(), InputError> {
        let dashes = self.pos;
        self.pos += 2;

        let key_start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '=' {
                break;
            }
            self.bump();
        }
        if self.pos == key_start {
            return Err(InputError::new(
                InputErrorKind::MissingFlagKey,
                range_to_text_range(dashes..self.pos),
            ));
        }
        let key = decode(&self.source[key_start..self.pos]);

        let value = if self.peek() == Some('=') {
            self.bump();
            let span = match self.peek() {
                Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
                _ => {
                    let start = self.pos;
                    start..self.unquoted_end()
                }
            };
            Some(decode(&self.source[span]))
        } else {
            None
        };

        self.flags.insert(key, value);
        Ok(())
    }
}
