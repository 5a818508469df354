use crate::Colors;
use crate::grammar::parse_grammar;
use crate::matcher::{Matcher, PrintTracer};

fn trace(usage: &str, input: &str) -> String {
    let node = parse_grammar(usage, false).expect("valid usage");
    let mut matcher = Matcher::new(&node).with_tracer(PrintTracer::new(Colors::OFF));
    matcher.match_input(input).expect("well-formed input");
    matcher.tracer().lines().join("\n")
}

#[test]
fn successful_sequence() {
    insta::assert_snapshot!(trace("a [<b>]", "a x"), @r#"
    a [<b>] @0
      ✓ a "a"
      ✓ [<b>] "x"
    → @2
    match
    "#);
}

#[test]
fn failed_alternation() {
    insta::assert_snapshot!(trace("a|b", "c"), @r#"
    a|b @0
      ✗ a "c"
      ✗ b "c"
    ✗
    no match
    "#);
}

#[test]
fn rollback_and_skip() {
    insta::assert_snapshot!(trace("[a b] c", "a c"), @r#"
    [a b] c @0
      [a b] @0
        ✓ a "a"
        ✗ b "c"
        ↩ rollback 1
        ~ skip [a b] @0
      → @0
      ✗ c "a"
    ✗
    no match
    "#);
}

#[test]
fn flag_with_value() {
    insta::assert_snapshot!(trace("[--f=<v>]", "--f=1"), @r#"
    ✓ <v> "1"
    ✓ --f = "1"
    match
    "#);
}

#[test]
fn out_of_bounds() {
    insta::assert_snapshot!(trace("a", "a b"), @"no match: 2 tokens, expected 1..=1");
    insta::assert_snapshot!(trace("a <b>...", ""), @"no match: 0 tokens, expected 2..=∞");
}

#[test]
fn unexpected_flag() {
    insta::assert_snapshot!(trace("a", "a --x"), @r#"
    ✓ a "a"
    no match: --x not allowed here
    "#);
}

#[test]
fn colored_marks() {
    let node = parse_grammar("a", false).expect("valid usage");
    let mut matcher = Matcher::new(&node).with_tracer(PrintTracer::new(Colors::ON));
    matcher.match_input("a").expect("well-formed input");
    let lines = matcher.into_tracer().lines().to_vec();
    assert_eq!(lines[0], "\x1b[32m✓\x1b[0m a \"a\"");
    assert_eq!(lines[1], "\x1b[32mmatch\x1b[0m");
}
