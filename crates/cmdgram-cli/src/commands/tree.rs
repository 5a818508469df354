//! Show the parsed usage tree.

use cmdgram_lib::{Colors, token_bounds};

use super::common::{exit_with, parse_usage};

pub struct TreeArgs {
    pub usage: String,
    pub fix: bool,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let node = parse_usage(&args.usage, args.fix)
        .unwrap_or_else(|e| exit_with(e, &args.usage, "", args.color));
    let c = Colors::new(args.color);

    println!("{}usage:{}  {node}", c.dim, c.reset);
    println!("{}tokens:{} {}", c.dim, c.reset, token_bounds(&node));
    println!("{}---{}", c.dim, c.reset);
    print!("{}", node.dump_with(c));
}
