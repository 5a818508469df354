//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use clap::{Arg, ArgAction};

/// Usage grammar text (positional).
pub fn usage_arg() -> Arg {
    Arg::new("usage")
        .value_name("USAGE")
        .required(true)
        .help("Usage grammar, e.g. 'add <name> [--force]'")
}

/// Raw command arguments (positional).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("INPUT")
        .default_value("")
        .hide_default_value(true)
        .allow_hyphen_values(true)
        .help("Arguments to match against the usage")
}

/// Disambiguate adjacent optionals (--fix).
pub fn fix_arg() -> Arg {
    Arg::new("fix")
        .long("fix")
        .action(ArgAction::SetTrue)
        .help("Rewrite runs of optional positional arguments into ordered alternatives")
}

/// Expand floating args into explicit paths (--expand).
pub fn expand_arg() -> Arg {
    Arg::new("expand")
        .long("expand")
        .action(ArgAction::SetTrue)
        .help("Spell out every placement of each floating argument")
}

/// Graphviz output (--dot).
pub fn dot_arg() -> Arg {
    Arg::new("dot")
        .long("dot")
        .action(ArgAction::SetTrue)
        .help("Print Graphviz dot instead of the node list")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the match result as JSON")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
