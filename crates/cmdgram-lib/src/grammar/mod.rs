//! Usage grammar: lexing, tree building and tree transforms.
//!
//! The entry point is [`parse_grammar`] (or [`GrammarParser`] for limits).

mod bounds;
mod disambiguate;
mod dump;
mod error;
pub mod lexer;
mod node;
mod parser;

#[cfg(test)]
mod bounds_tests;
#[cfg(test)]
mod node_tests;
#[cfg(test)]
mod parser_tests;

pub use bounds::{TokenBounds, token_bounds};
pub use disambiguate::fix_position_dependence;
pub use error::{GrammarError, GrammarErrorKind};
pub use node::{Node, NodeKind};
pub use parser::{DEFAULT_RECURSION_LIMIT, GrammarParser, parse_grammar};
