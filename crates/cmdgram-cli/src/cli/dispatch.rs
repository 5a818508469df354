//! Dispatch logic: extract params from ArgMatches and convert to command args.

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::graph::GraphArgs;
use crate::commands::matching::MatchArgs;
use crate::commands::trace::TraceArgs;
use crate::commands::tree::TreeArgs;

pub struct TreeParams {
    pub usage: String,
    pub fix: bool,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            usage: usage(m),
            fix: m.get_flag("fix"),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            usage: p.usage,
            fix: p.fix,
            color: p.color.should_colorize(),
        }
    }
}

pub struct GraphParams {
    pub usage: String,
    pub fix: bool,
    pub expand: bool,
    pub dot: bool,
    pub color: ColorChoice,
}

impl GraphParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            usage: usage(m),
            fix: m.get_flag("fix"),
            expand: m.get_flag("expand"),
            dot: m.get_flag("dot"),
            color: parse_color(m),
        }
    }
}

impl From<GraphParams> for GraphArgs {
    fn from(p: GraphParams) -> Self {
        Self {
            usage: p.usage,
            fix: p.fix,
            expand: p.expand,
            // dot output goes to other tools, never colorize it
            dot: p.dot,
            color: !p.dot && p.color.should_colorize(),
        }
    }
}

pub struct MatchParams {
    pub usage: String,
    pub input: String,
    pub fix: bool,
    pub json: bool,
    pub color: ColorChoice,
}

impl MatchParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            usage: usage(m),
            input: input(m),
            fix: m.get_flag("fix"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<MatchParams> for MatchArgs {
    fn from(p: MatchParams) -> Self {
        Self {
            usage: p.usage,
            input: p.input,
            fix: p.fix,
            json: p.json,
            color: !p.json && p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub usage: String,
    pub input: String,
    pub fix: bool,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            usage: usage(m),
            input: input(m),
            fix: m.get_flag("fix"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            usage: p.usage,
            input: p.input,
            fix: p.fix,
            color: p.color.should_colorize(),
        }
    }
}

fn usage(m: &ArgMatches) -> String {
    m.get_one::<String>("usage").cloned().unwrap_or_default()
}

fn input(m: &ArgMatches) -> String {
    m.get_one::<String>("input").cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
