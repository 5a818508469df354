//! Usage loading and error reporting shared by the commands.

use cmdgram_lib::{
    Diagnostic, DiagnosticPrinter, GrammarError, GrammarParser, InputError, Node,
};

#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Compile(#[from] cmdgram_lib::Error),
}

pub fn parse_usage(usage: &str, fix: bool) -> Result<Node, Failure> {
    let node = GrammarParser::new(usage)
        .fix_position_dependence(fix)
        .parse()?;
    Ok(node)
}

/// Renders `failure` against the text it points into.
pub fn render_failure(failure: &Failure, usage: &str, input: &str, color: bool) -> String {
    match failure {
        Failure::Grammar(e) => render(e, usage, "<usage>", color),
        Failure::Input(e) => render(e, input, "<input>", color),
        Failure::Compile(e) => format!("error: {e}"),
    }
}

/// Prints `failure` to stderr and exits with status 1.
pub fn exit_with(failure: Failure, usage: &str, input: &str, color: bool) -> ! {
    eprintln!("{}", render_failure(&failure, usage, input, color));
    std::process::exit(1);
}

fn render(diagnostic: &dyn Diagnostic, source: &str, path: &str, color: bool) -> String {
    DiagnosticPrinter::new(diagnostic)
        .source(source)
        .path(path)
        .colored(color)
        .render()
}
