use super::*;
use pretty_assertions::assert_eq;

#[test]
fn object_spread_hidden() {
    assert_eq!(hide_object_spread("{a: 1, ...b}"), "{a: 1, '⏓':b}");
    assert_eq!(hide_object_spread("f({...a, ...b})"), "f({'⏓':a, '⏓':b})");
}

#[test]
fn array_and_call_spread_kept() {
    assert_eq!(hide_object_spread("[1, ...b]"), "[1, ...b]");
    assert_eq!(hide_object_spread("{a: [...b]}"), "{a: [...b]}");
    assert_eq!(hide_object_spread("f(...args)"), "f(...args)");
}

#[test]
fn nested_closed_groups_skipped() {
    assert_eq!(hide_object_spread("{a: f(x), ...b}"), "{a: f(x), '⏓':b}");
}

#[test]
fn search_stops_at_line_start() {
    assert_eq!(hide_object_spread("{\n...b"), "{\n...b");
}

#[test]
fn restore_inverts_hide() {
    let src = "g({x, ...rest}, [...list])";
    assert_eq!(restore_object_spread(&hide_object_spread(src)), src);
}
