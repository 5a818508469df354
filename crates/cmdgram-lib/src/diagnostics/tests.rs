use crate::diagnostics::DiagnosticPrinter;
use crate::grammar::parse_grammar;
use crate::input::tokenize_input;

#[test]
fn plain_without_source() {
    let err = parse_grammar("a (b", false).expect_err("invalid");
    insta::assert_snapshot!(
        DiagnosticPrinter::new(&err).render(),
        @"error at 2..3: unclosed `(` (help: add a matching `)`)"
    );
}

#[test]
fn plain_without_hint() {
    let err = parse_grammar("a)", false).expect_err("invalid");
    insta::assert_snapshot!(
        DiagnosticPrinter::new(&err).render(),
        @"error at 1..2: unexpected closing delimiter"
    );
}

#[test]
fn snippet_points_at_span() {
    let usage = "tp <target> ...";
    let err = parse_grammar(usage, false).expect_err("invalid");
    let out = DiagnosticPrinter::new(&err)
        .source(usage)
        .path("usage")
        .render();

    assert!(out.contains("error: `...` is not attached to anything"), "{out}");
    assert!(out.contains(usage), "{out}");
    assert!(out.contains("^^^"), "{out}");
    assert!(out.contains("remove the space before `...`"), "{out}");
    assert!(out.contains("usage"), "{out}");
}

#[test]
fn input_errors_render_too() {
    let input = r#"say "hello"#;
    let err = tokenize_input(input).expect_err("unterminated quote");
    let out = DiagnosticPrinter::new(&err).source(input).render();
    assert!(out.contains("unterminated"), "{out}");
}

#[test]
fn dangling_flag_dashes() {
    let input = "a --";
    let err = tokenize_input(input).expect_err("flag without key");
    let out = DiagnosticPrinter::new(&err).source(input).render();
    assert!(out.contains("flag"), "{out}");
}
