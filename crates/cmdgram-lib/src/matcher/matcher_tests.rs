use crate::grammar::parse_grammar;
use crate::input::InputErrorKind;
use crate::matcher::{Captures, match_input};

const DOMAIN_USAGE: &str = "(any|block|be|blockentity|entity) (class <class> | id <id>) [<dimId>] [--ticking] [--unloaded] [--countOnly | --chunkCounts] [--filter[=<x>]] [--clear]";

fn try_match(usage: &str, fix: bool, input: &str) -> Option<Captures> {
    let node = parse_grammar(usage, fix).expect("valid usage");
    match_input(input, &node).expect("well-formed input")
}

/// Renders captures as `key=value` pairs, or `-` for no match.
fn run(usage: &str, input: &str) -> String {
    render(try_match(usage, false, input))
}

fn run_fixed(usage: &str, input: &str) -> String {
    render(try_match(usage, true, input))
}

fn render(captures: Option<Captures>) -> String {
    match captures {
        None => "-".to_owned(),
        Some(captures) => captures
            .iter()
            .map(|(k, v)| format!("{k}={v:?}"))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[test]
fn literal_and_variable() {
    assert_eq!(run("tp <target>", "tp steve"), r#"unnamed_0="tp" target="steve""#);
    assert_eq!(run("tp <target>", "go steve"), "-");
    assert_eq!(run("tp <target>", "tp"), "-");
    assert_eq!(run("tp <target>", "tp steve alex"), "-");
}

#[test]
fn adjacent_optionals_round_trip() {
    assert_eq!(run("[<dim-id>] [<limit>]", ""), "");
    assert_eq!(run("[<dim-id>] [<limit>]", "5 10"), r#"dim-id="5" limit="10""#);
    assert_eq!(run("[<dim-id>] [<limit>]", "5"), r#"dim-id="5""#);
}

#[test]
fn fixed_position_dependence() {
    let usage = "[a] [b] [c]";
    assert_eq!(run_fixed(usage, ""), "");
    assert_eq!(run_fixed(usage, "a"), r#"unnamed_0="a""#);
    assert_eq!(run_fixed(usage, "a b"), r#"unnamed_0="a" unnamed_1="b""#);
    assert_eq!(
        run_fixed(usage, "a b c"),
        r#"unnamed_0="a" unnamed_1="b" unnamed_2="c""#
    );
    assert_eq!(run_fixed(usage, "b"), "-");
    assert_eq!(run_fixed(usage, "b c"), "-");
    assert_eq!(run_fixed(usage, "a c"), "-");
}

#[test]
fn unfixed_optionals_accept_any_slot() {
    assert_eq!(run("[a] [b] [c]", "b"), r#"unnamed_0="b""#);
    assert_eq!(run("[a] [b] [c]", "a c"), r#"unnamed_0="a" unnamed_1="c""#);
}

#[test]
fn alternation_takes_first_fitting_option() {
    assert_eq!(run("list|add <name>", "list"), r#"unnamed_0="list""#);
    assert_eq!(run("list|add <name>", "add x"), r#"unnamed_0="add" name="x""#);
    assert_eq!(run("a|a b", "a b"), r#"unnamed_0="a" unnamed_1="b""#);
}

#[test]
fn trailing_flags_do_not_hide_end_of_input() {
    assert_eq!(
        run("(list|list <page>)", "list 2"),
        r#"unnamed_0="list" page="2""#
    );
    assert_eq!(
        run("(list|list <page>) [--all]", "list 2"),
        r#"unnamed_0="list" page="2""#
    );
    assert_eq!(
        run("(list|list <page>) [--all]", "list 2 --all"),
        r#"unnamed_0="list" page="2" all="""#
    );
    assert_eq!(run("(list|list <page>) [--all]", "list"), r#"unnamed_0="list""#);
}

#[test]
fn alternation_commits_to_first_success() {
    assert_eq!(run("(<x>|a) b c", "a b c"), r#"x="a" unnamed_0="b" unnamed_1="c""#);
    // `<x>` takes `a`, so `a b` is never tried
    assert_eq!(run("(<x>|a b) c", "a b c"), "-");
}

#[test]
fn domain_example() {
    let out = run(
        DOMAIN_USAGE,
        "be id minecraft:chest nether --unloaded --countOnly --filter=test --clear",
    );
    assert_eq!(
        out,
        r#"unnamed_0="be" unnamed_1="id" id="minecraft:chest" dimId="nether" unloaded="" countOnly="" filter="test" clear="""#
    );
}

#[test]
fn domain_example_without_optionals() {
    assert_eq!(
        run(DOMAIN_USAGE, "entity class Foo"),
        r#"unnamed_0="entity" unnamed_1="class" class="Foo""#
    );
}

#[test]
fn exclusive_flags_together_fail() {
    assert_eq!(
        run(DOMAIN_USAGE, "be id minecraft:chest --countOnly --chunkCounts"),
        "-"
    );
}

#[test]
fn unknown_flag_fails() {
    assert_eq!(run("a [--clear]", "a --force"), "-");
    assert_eq!(run("a [--clear]", "a --clear"), r#"unnamed_0="a" clear="""#);
}

#[test]
fn required_flag() {
    assert_eq!(run("a --yes", "a"), "-");
    assert_eq!(run("a --yes", "--yes a"), r#"unnamed_0="a" yes="""#);
}

#[test]
fn flag_value_shapes() {
    assert_eq!(run("--filter[=<x>]", "--filter"), r#"filter="""#);
    assert_eq!(run("--filter[=<x>]", "--filter=test"), r#"filter="test""#);
    assert_eq!(run("--filter=<x>", "--filter"), "-");
    assert_eq!(run("--filter=<x>", "--filter=test"), r#"filter="test""#);
    assert_eq!(run("--clear", "--clear=yes"), "-");
}

#[test]
fn flag_value_is_checked_against_literals() {
    let usage = "[--mode=(fast|slow)]";
    assert_eq!(run(usage, "--mode=fast"), r#"mode="fast""#);
    assert_eq!(run(usage, "--mode=medium"), "-");
    assert_eq!(run(usage, ""), "");
}

#[test]
fn quoted_flag_value() {
    assert_eq!(
        run("[--reason=<r>]", "--reason='being rude'"),
        r#"reason="being rude""#
    );
}

#[test]
fn repeated_variable_joins_values() {
    assert_eq!(run("add <item>...", "add a b c"), r#"unnamed_0="add" item="a b c""#);
    assert_eq!(run("add <item>...", "add"), "-");
}

#[test]
fn repeat_leaves_room_for_followers() {
    assert_eq!(
        run("ban <user>... <days>", "ban a b 3"),
        r#"unnamed_0="ban" user="a b" days="3""#
    );
    assert_eq!(run("ban <user>... <days>", "ban a"), "-");
    assert_eq!(
        run("ban <user>... <days> [<note>]", "ban a b 3"),
        r#"unnamed_0="ban" user="a b" days="3""#
    );
}

#[test]
fn repeat_gives_back_repetitions() {
    // the alternation needs more than its minimum, so `<a>...` has to shrink
    assert_eq!(
        run("<a>... (x|y z)", "p q y z"),
        r#"a="p q" unnamed_0="y" unnamed_1="z""#
    );
    assert_eq!(run("(<k> <v>)... <last>", "a 1 b 2 c"), r#"k="a b" v="1 2" last="c""#);
}

#[test]
fn repeated_group() {
    assert_eq!(
        run("set (<k> <v>)...", "set a 1 b 2"),
        r#"unnamed_0="set" k="a b" v="1 2""#
    );
    assert_eq!(run("set (<k> <v>)...", "set a 1 b"), "-");
}

#[test]
fn multi_word_variable_leaves_room_for_followers() {
    assert_eq!(
        run("warn <user> <reason...> <test> ss [<asd>]", "warn someone reason asd xy ss qwe"),
        r#"unnamed_0="warn" user="someone" reason="reason asd" test="xy" unnamed_1="ss" asd="qwe""#
    );
}

#[test]
fn multi_word_variable_takes_what_followers_spare() {
    assert_eq!(
        run("give <items...> <count>", "give a b c 5"),
        r#"unnamed_0="give" items="a b c" count="5""#
    );
    assert_eq!(run("give <items...> <count>", "give a"), "-");
}

#[test]
fn multi_word_variable_leaves_out_quotes_and_flags() {
    assert_eq!(
        run("say <msg...>", r#"say "hello world" again"#),
        r#"unnamed_0="say" msg="hello world again""#
    );
    assert_eq!(
        run("say <msg...> [--loud]", "say hi --loud there"),
        r#"unnamed_0="say" msg="hi there" loud="""#
    );
}

#[test]
fn multi_word_variable_keeps_raw_spacing() {
    assert_eq!(
        run("say <message...>", r"say hello   there\tfriend"),
        "unnamed_0=\"say\" message=\"hello   there\\tfriend\""
    );
    assert_eq!(run("say <message...>", "say"), "-");
}

#[test]
fn decoded_tokens_are_compared() {
    assert_eq!(run("<a> <b>", r#"a\tb "c d""#), r#"a="a\tb" b="c d""#);
    assert_eq!(run("\"x\"", r#""x""#), "-");
}

#[test]
fn empty_usage() {
    assert_eq!(run("", ""), "");
    assert_eq!(run("", "x"), "-");
    assert_eq!(run("", "--x"), "-");
}

#[test]
fn repeated_flag_key_uses_last_value() {
    assert_eq!(run("[--f=<v>]", "--f=1 --f=2"), r#"f="2""#);
}

#[test]
fn malformed_input_is_an_error() {
    let node = parse_grammar("<a>", false).expect("valid usage");
    let err = match_input("'oops", &node).expect_err("unterminated quote");
    assert_eq!(err.kind, InputErrorKind::UnterminatedQuote('\''));

    let err = match_input("a --", &node).expect_err("dangling dashes");
    assert_eq!(err.kind, InputErrorKind::MissingFlagKey);
}

#[test]
fn deterministic_parse() {
    let a = parse_grammar(DOMAIN_USAGE, true).expect("valid usage");
    let b = parse_grammar(DOMAIN_USAGE, true).expect("valid usage");
    assert_eq!(a, b);
}
