//! Trace how arguments are matched against a usage.

use cmdgram_lib::{Colors, Matcher, PrintTracer};

use super::common::{exit_with, parse_usage};

pub struct TraceArgs {
    pub usage: String,
    pub input: String,
    pub fix: bool,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let node = parse_usage(&args.usage, args.fix)
        .unwrap_or_else(|e| exit_with(e, &args.usage, &args.input, args.color));

    let mut matcher = Matcher::new(&node).with_tracer(PrintTracer::new(Colors::new(args.color)));
    let result = matcher.match_input(&args.input);
    matcher.tracer().print();

    match result {
        Ok(Some(_)) => {}
        Ok(None) => std::process::exit(1),
        Err(e) => exit_with(e.into(), &args.usage, &args.input, args.color),
    }
}
