//! cmdgram: usage grammars for chat commands.
//!
//! A usage grammar describes the accepted shape of a command's arguments:
//!
//! ```text
//! a b        sequence, both required
//! a|b        alternation, lowest precedence
//! [a]        optional
//! a...       one-or-more repeat, highest precedence
//! (a b)      grouping
//! x          literal "x"
//! <x>        variable capturing one token, named x
//! <x...>     variable capturing one or more tokens
//! --x        floating flag, no value
//! --x=a      floating flag, mandatory value shaped like a
//! --x[=a]    floating flag, optional value shaped like a
//! ```
//!
//! The pipeline:
//!
//! ```text
//! usage ─→ grammar::lex ─→ GrammarParser ─→ [disambiguate] ─→ Node
//!                                                              │
//!                          ┌───────────────────────────────────┤
//!                          ↓                                   ↓
//! input ─→ tokenize_input ─→ Matcher ─→ Captures      GraphCompiler ─→ Graph
//! ```
//!
//! # Example
//!
//! ```
//! use cmdgram_lib::{match_input, parse_grammar};
//!
//! let usage = parse_grammar("(class <class> | id <id>) [<dimId>] [--clear]", false).unwrap();
//! let captures = match_input("id minecraft:chest nether --clear", &usage)
//!     .unwrap()
//!     .expect("input conforms to usage");
//!
//! assert_eq!(captures["id"], "minecraft:chest");
//! assert_eq!(captures["dimId"], "nether");
//! assert_eq!(captures["clear"], "");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod colors;
pub mod command;
pub mod diagnostics;
pub mod grammar;
pub mod graph;
pub mod input;
pub mod matcher;

pub use colors::Colors;
pub use command::{Command, CommandError, CommandRegistry, Dispatch, DispatchError, RegistryError};
pub use diagnostics::{Diagnostic, DiagnosticPrinter};
pub use grammar::{
    GrammarError, GrammarErrorKind, GrammarParser, Node, NodeKind, TokenBounds, parse_grammar,
    token_bounds,
};
pub use graph::{Backing, END, Graph, GraphCompiler, GraphNode, NodeId, compile_graph};
pub use input::{InputError, InputErrorKind, InputToken, InputTokens, tokenize_input};
pub use matcher::{Captures, Matcher, NoopTracer, PrintTracer, Tracer, match_input};

/// Errors surfaced by the high-level entry points.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The usage grammar is malformed.
    #[error("invalid usage grammar: {0}")]
    Grammar(#[from] GrammarError),

    /// The raw command input is malformed.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Expanding floating arguments would grow the graph factorially.
    #[error("cannot expand {count} floating arguments (limit is {limit})")]
    ExpansionLimitExceeded { count: usize, limit: usize },
}

/// Result type for cmdgram operations.
pub type Result<T> = std::result::Result<T, Error>;
