//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("cmdgram")
        .about("Inspect command usage grammars and match arguments against them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tree_command())
        .subcommand(graph_command())
        .subcommand(match_command())
        .subcommand(trace_command())
}

/// Show the parsed usage tree.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the parsed usage tree")
        .after_help(
            r#"EXAMPLES:
  cmdgram tree 'add <name> [<count>]'
  cmdgram tree '[a] [b] [c]' --fix"#,
        )
        .arg(usage_arg())
        .arg(fix_arg())
        .arg(color_arg())
}

/// Show the usage lowered to a graph.
pub fn graph_command() -> Command {
    Command::new("graph")
        .about("Show the usage lowered to a graph")
        .after_help(
            r#"EXAMPLES:
  cmdgram graph 'a [b] c'
  cmdgram graph 'a [--x] [--y]' --expand
  cmdgram graph '(list|add <name>)' --dot | dot -Tsvg"#,
        )
        .arg(usage_arg())
        .arg(fix_arg())
        .arg(expand_arg())
        .arg(dot_arg())
        .arg(color_arg())
}

/// Match arguments against a usage.
pub fn match_command() -> Command {
    Command::new("match")
        .about("Match arguments against a usage")
        .after_help(
            r#"EXAMPLES:
  cmdgram match 'tp <target>' 'tp steve'
  cmdgram match '[--filter[=<x>]]' '--filter=test' --json"#,
        )
        .arg(usage_arg())
        .arg(input_arg())
        .arg(fix_arg())
        .arg(json_arg())
        .arg(color_arg())
}

/// Trace the matcher's walk.
pub fn trace_command() -> Command {
    Command::new("trace")
        .about("Trace how arguments are matched against a usage")
        .after_help(
            r#"EXAMPLES:
  cmdgram trace '[a b] c' 'a c'"#,
        )
        .arg(usage_arg())
        .arg(input_arg())
        .arg(fix_arg())
        .arg(color_arg())
}
