use crate::grammar::{GrammarErrorKind, GrammarParser, parse_grammar};

fn tree(usage: &str) -> String {
    parse_grammar(usage, false).expect("valid usage").dump()
}

fn error(usage: &str) -> (GrammarErrorKind, std::ops::Range<usize>) {
    let err = parse_grammar(usage, false).expect_err("invalid usage");
    (err.kind, err.span.into())
}

#[test]
fn single_literal() {
    insta::assert_snapshot!(tree("stats"), @r#"Plain "stats""#);
}

#[test]
fn sequence() {
    insta::assert_snapshot!(tree("a <b> c"), @r#"
    List
      Plain "a"
      Var <b>
      Plain "c"
    "#);
}

#[test]
fn alternation_binds_loosest() {
    insta::assert_snapshot!(tree("a|b c"), @r#"
    Or
      Plain "a"
      List
        Plain "b"
        Plain "c"
    "#);
}

#[test]
fn optional_elements() {
    insta::assert_snapshot!(tree("[a] [<b>]"), @r#"
    List ?
      Plain "a" ?
      Var <b> ?
    "#);
}

#[test]
fn list_with_required_child_is_required() {
    insta::assert_snapshot!(tree("[a] b"), @r#"
    List
      Plain "a" ?
      Plain "b"
    "#);
}

#[test]
fn empty_branch_makes_alternation_optional() {
    insta::assert_snapshot!(tree("(a|)"), @r#"Plain "a" ?"#);
}

#[test]
fn empty_branch_in_wider_alternation() {
    insta::assert_snapshot!(tree("a||b"), @r#"
    Or ?
      Plain "a"
      Plain "b"
    "#);
}

#[test]
fn nested_alternation_is_flattened() {
    insta::assert_snapshot!(tree("(a|b)|c"), @r#"
    Or
      Plain "a"
      Plain "b"
      Plain "c"
    "#);
}

#[test]
fn optional_nested_alternation_is_flattened() {
    insta::assert_snapshot!(tree("[a|b]|c"), @r#"
    Or ?
      Plain "a"
      Plain "b"
      Plain "c"
    "#);
}

#[test]
fn repeated_nested_alternation_is_kept() {
    insta::assert_snapshot!(tree("(a|b)...|c"), @r#"
    Or
      Or +
        Plain "a"
        Plain "b"
      Plain "c"
    "#);
}

#[test]
fn repeat_binds_tightest() {
    insta::assert_snapshot!(tree("a <b>..."), @r#"
    List
      Plain "a"
      Var <b> +
    "#);
}

#[test]
fn repeat_of_group() {
    insta::assert_snapshot!(tree("[(<k> <v>)...]"), @r#"
    List ? +
      Var <k>
      Var <v>
    "#);
}

#[test]
fn repeat_of_empty_is_ignored() {
    insta::assert_snapshot!(tree("a ()..."), @r#"Plain "a""#);
}

#[test]
fn empty_usage() {
    insta::assert_snapshot!(tree(""), @"Empty");
    insta::assert_snapshot!(tree("()"), @"Empty");
    insta::assert_snapshot!(tree("|"), @"Empty");
}

#[test]
fn multi_word_variable() {
    insta::assert_snapshot!(tree("say <message...>"), @r#"
    List
      Plain "say"
      Var <message...>
    "#);
}

#[test]
fn flags() {
    insta::assert_snapshot!(tree("--filter=<f> --mode[=<m>] [--clear]"), @r#"
    List
      Flag --filter
        Var <f>
      Flag --mode
        Var <m> ?
      Flag --clear ?
    "#);
}

#[test]
fn flag_value_is_one_atom() {
    insta::assert_snapshot!(tree("--mode=(fast|slow) x"), @r#"
    List
      Flag --mode
        Or
          Plain "fast"
          Plain "slow"
      Plain "x"
    "#);
}

#[test]
fn flag_value_may_look_like_a_flag() {
    insta::assert_snapshot!(tree("--a=--b"), @r#"
    Flag --a
      Plain "--b"
    "#);
}

#[test]
fn equals_outside_flag_is_literal() {
    insta::assert_snapshot!(tree("a = b"), @r#"
    List
      Plain "a"
      Plain "="
      Plain "b"
    "#);
}

#[test]
fn domain_example() {
    insta::assert_snapshot!(
        tree("be|(class <class> | id <id>) [<dimId>] [--unloaded] [--countOnly|--chunkCounts] [--filter=<x>] [--clear]"),
        @r#"
    Or
      Plain "be"
      List
        Or
          List
            Plain "class"
            Var <class>
          List
            Plain "id"
            Var <id>
        Var <dimId> ?
        Flag --unloaded ?
        Or ?
          Flag --countOnly
          Flag --chunkCounts
        Flag --filter ?
          Var <x>
        Flag --clear ?
    "#
    );
}

#[test]
fn unclosed_group() {
    assert_eq!(error("a (b"), (GrammarErrorKind::UnclosedGroup, 2..3));
}

#[test]
fn unclosed_optional() {
    assert_eq!(error("[a [b]"), (GrammarErrorKind::UnclosedOptional, 0..1));
}

#[test]
fn mismatched_delimiters() {
    assert_eq!(error("([)]"), (GrammarErrorKind::UnclosedOptional, 1..2));
}

#[test]
fn stray_close() {
    assert_eq!(error("a)"), (GrammarErrorKind::UnexpectedClose, 1..2));
    assert_eq!(error("a]"), (GrammarErrorKind::UnexpectedClose, 1..2));
}

#[test]
fn standalone_ellipsis() {
    assert_eq!(error("(...)"), (GrammarErrorKind::StandaloneEllipsis, 1..4));
    assert_eq!(error("a|..."), (GrammarErrorKind::StandaloneEllipsis, 2..5));
}

#[test]
fn detached_ellipsis() {
    assert_eq!(error("<a> ..."), (GrammarErrorKind::DetachedEllipsis, 4..7));
}

#[test]
fn empty_variable_name() {
    assert_eq!(error("<>"), (GrammarErrorKind::EmptyVariableName, 0..2));
    assert_eq!(error("<...>"), (GrammarErrorKind::EmptyVariableName, 0..5));
}

#[test]
fn unterminated_variable() {
    assert_eq!(error("a <b"), (GrammarErrorKind::UnterminatedVariable, 2..4));
}

#[test]
fn flag_without_key() {
    assert_eq!(error("a --"), (GrammarErrorKind::MissingFlagKey, 2..4));
}

#[test]
fn flag_without_value() {
    assert_eq!(error("--x="), (GrammarErrorKind::MissingFlagValue, 3..4));
    assert_eq!(error("--x=|a"), (GrammarErrorKind::MissingFlagValue, 3..4));
    assert_eq!(error("--x[=]"), (GrammarErrorKind::MissingFlagValue, 4..5));
}

#[test]
fn flag_optional_value_not_closed() {
    assert_eq!(
        error("--x[=<v> y]"),
        (GrammarErrorKind::UnclosedFlagValue, 3..4)
    );
}

#[test]
fn recursion_limit() {
    let err = GrammarParser::new("((a))")
        .recursion_limit(Some(1))
        .parse()
        .expect_err("too deep");
    assert_eq!(err.kind, GrammarErrorKind::RecursionLimitExceeded);
    assert_eq!(std::ops::Range::<usize>::from(err.span), 1..2);

    let deep = format!("{}a{}", "(".repeat(300), ")".repeat(300));
    assert!(GrammarParser::new(&deep).recursion_limit(None).parse().is_ok());
}

#[test]
fn error_message() {
    let err = parse_grammar("a (b", false).expect_err("invalid");
    insta::assert_snapshot!(err.to_string(), @"unclosed `(` at 2..3");
}
