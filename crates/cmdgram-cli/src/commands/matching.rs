//! Match arguments against a usage and print the captures.

use std::fmt::Write;

use cmdgram_lib::{Captures, Colors, match_input};
use serde::Serialize;

use super::common::{exit_with, parse_usage};

pub struct MatchArgs {
    pub usage: String,
    pub input: String,
    pub fix: bool,
    pub json: bool,
    pub color: bool,
}

/// Result of one `match` run, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    /// Canonical form of the parsed usage.
    pub usage: String,
    pub input: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captures: Option<Captures>,
}

pub fn run(args: MatchArgs) {
    let node = parse_usage(&args.usage, args.fix)
        .unwrap_or_else(|e| exit_with(e, &args.usage, &args.input, args.color));
    let captures = match_input(&args.input, &node)
        .unwrap_or_else(|e| exit_with(e.into(), &args.usage, &args.input, args.color));

    let report = MatchReport {
        usage: node.to_string(),
        input: args.input,
        matched: captures.is_some(),
        captures,
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        }
    } else if report.matched {
        print!("{}", format_report(&report, Colors::new(args.color)));
    } else {
        eprint!("{}", format_report(&report, Colors::new(args.color)));
    }

    if !report.matched {
        std::process::exit(1);
    }
}

/// `key = "value"` lines for a match, a usage hint otherwise.
pub fn format_report(report: &MatchReport, c: Colors) -> String {
    let mut out = String::new();
    match &report.captures {
        None => {
            writeln!(out, "{}no match{}", c.red, c.reset).expect("String write never fails");
            writeln!(out, "{}usage:{} {}", c.dim, c.reset, report.usage)
                .expect("String write never fails");
        }
        Some(captures) if captures.is_empty() => {
            writeln!(out, "{}match{}, nothing captured", c.green, c.reset)
                .expect("String write never fails");
        }
        Some(captures) => {
            for (key, value) in captures {
                writeln!(out, "{}{key}{} = {value:?}", c.blue, c.reset)
                    .expect("String write never fails");
            }
        }
    }
    out
}
