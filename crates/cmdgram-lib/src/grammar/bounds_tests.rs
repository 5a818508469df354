use crate::grammar::{TokenBounds, parse_grammar, token_bounds};

fn bounds(usage: &str) -> (usize, Option<usize>) {
    let TokenBounds { min, max } = token_bounds(&parse_grammar(usage, false).expect("valid usage"));
    (min, max)
}

#[test]
fn leaves() {
    assert_eq!(bounds("a"), (1, Some(1)));
    assert_eq!(bounds("<a>"), (1, Some(1)));
    assert_eq!(bounds("<a...>"), (1, None));
    assert_eq!(bounds("[a]"), (0, Some(1)));
    assert_eq!(bounds("--f=<v>"), (0, Some(0)));
    assert_eq!(bounds("()"), (0, Some(0)));
}

#[test]
fn sequences_add_up() {
    assert_eq!(bounds("a b <c>"), (3, Some(3)));
    assert_eq!(bounds("[a] b [--f]"), (1, Some(2)));
    assert_eq!(bounds("[a b]"), (0, Some(2)));
}

#[test]
fn alternations_take_extremes() {
    assert_eq!(bounds("a|b c"), (1, Some(2)));
    assert_eq!(bounds("[a|b c]"), (0, Some(2)));
    assert_eq!(bounds("a|<rest...>"), (1, None));
}

#[test]
fn repeat_is_unbounded() {
    assert_eq!(bounds("<a>..."), (1, None));
    assert_eq!(bounds("(a b)..."), (2, None));
    assert_eq!(bounds("(--f)..."), (0, Some(0)));
}

#[test]
fn contains() {
    let b = TokenBounds {
        min: 1,
        max: Some(3),
    };
    assert!(!b.contains(0));
    assert!(b.contains(1));
    assert!(b.contains(3));
    assert!(!b.contains(4));

    let unbounded = TokenBounds { min: 2, max: None };
    assert!(unbounded.contains(1000));
    assert!(!unbounded.contains(1));
}

#[test]
fn display() {
    let node = parse_grammar("a [<b>]", false).expect("valid usage");
    assert_eq!(token_bounds(&node).to_string(), "1..=2");
    let node = parse_grammar("a <b...>", false).expect("valid usage");
    assert_eq!(token_bounds(&node).to_string(), "2..=∞");
}
