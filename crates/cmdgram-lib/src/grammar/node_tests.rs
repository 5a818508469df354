use indoc::indoc;

use crate::grammar::{Node, parse_grammar};

fn canonical(usage: &str) -> String {
    parse_grammar(usage, false).expect("valid usage").to_string()
}

#[test]
fn display_canonical_forms() {
    assert_eq!(canonical("a   b  c"), "a b c");
    assert_eq!(canonical("a | b c"), "a|b c");
    assert_eq!(canonical("(a|b) c"), "(a|b) c");
    assert_eq!(canonical("[a|b] c"), "[a|b] c");
    assert_eq!(canonical("(a b)... c"), "(a b)... c");
    assert_eq!(canonical("[<x>...]"), "[<x>...]");
    assert_eq!(canonical("(a|)"), "[a]");
    assert_eq!(canonical("a ()"), "a");
    assert_eq!(canonical("(a|b)...|c"), "(a|b)...|c");
    assert_eq!(canonical("say <message...>"), "say <message...>");
    assert_eq!(canonical("()"), "()");
}

#[test]
fn display_flags() {
    assert_eq!(
        canonical("--k[=<v>] --f=(a|b) [--clear]"),
        "--k[=<v>] --f=(a|b) [--clear]"
    );
}

#[test]
fn display_round_trips() {
    let usages = [
        "be|(class <class>|id <id>) [<dimId>] [--unloaded] [--countOnly|--chunkCounts] [--filter=<x>] [--clear]",
        "[a] [b] [c]",
        "x ([a] [b])...",
        "--mode[=(fast|slow)] <target>",
        "(a|b)...|c",
        "[(<k> <v>)...]",
    ];

    for usage in usages {
        let node = parse_grammar(usage, false).expect("valid usage");
        let reparsed = parse_grammar(&node.to_string(), false).expect("canonical form parses");
        assert_eq!(node, reparsed, "{usage}");
    }
}

#[test]
fn constructed_nodes_display() {
    let node = Node::list(vec![
        Node::plain("tp"),
        Node::var("target").into_optional(),
        Node::floating_arg("silent", None).into_optional(),
    ]);
    assert_eq!(node.to_string(), "tp [<target>] [--silent]");

    let node = Node::or(vec![Node::plain("a"), Node::plain("b")]).into_repeat();
    assert_eq!(node.to_string(), "(a|b)...");
}

#[test]
fn empty_ignores_flags() {
    let node = Node::empty().into_optional().into_repeat();
    assert!(node.is_optional());
    assert!(!node.is_repeat());
    assert!(!node.is_position_dependent());
}

#[test]
fn position_dependence() {
    let dependent = |usage: &str| {
        parse_grammar(usage, false)
            .expect("valid usage")
            .is_position_dependent()
    };

    assert!(dependent("a"));
    assert!(dependent("<a>"));
    assert!(dependent("[--f] a"));
    assert!(dependent("--f|a"));
    assert!(!dependent("--f"));
    assert!(!dependent("[--f] [--g=<v>]"));
    assert!(!dependent("()"));
}

#[test]
fn leaves_in_order() {
    let node = parse_grammar("a (<b>|--c) [d]", false).expect("valid usage");
    let leaves: Vec<String> = node.leaves().iter().map(|n| n.to_string()).collect();
    assert_eq!(leaves, ["a", "<b>", "--c", "[d]"]);
}

#[test]
fn dump_with_flag_value() {
    let node = parse_grammar("--mode[=<m>]...", false).expect("valid usage");
    assert_eq!(
        node.dump(),
        indoc! {r#"
            Flag --mode +
              Var <m> ?
        "#}
    );
}
