//! Show the usage lowered to a graph.

use cmdgram_lib::{Colors, GraphCompiler};

use super::common::{exit_with, parse_usage};

pub struct GraphArgs {
    pub usage: String,
    pub fix: bool,
    pub expand: bool,
    pub dot: bool,
    pub color: bool,
}

pub fn run(args: GraphArgs) {
    let node = parse_usage(&args.usage, args.fix)
        .unwrap_or_else(|e| exit_with(e, &args.usage, "", args.color));

    let graph = GraphCompiler::new(&node)
        .expand_flags(args.expand)
        .compile()
        .unwrap_or_else(|e| exit_with(e.into(), &args.usage, "", args.color));

    if args.dot {
        print!("{}", graph.to_dot());
    } else {
        print!("{}", graph.dump_with(Colors::new(args.color)));
    }
}
