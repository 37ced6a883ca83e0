use super::*;
use pretty_assertions::assert_eq;

fn rewrite(args: &str) -> String {
    rewrite_default_args(args).unwrap()
}

#[test]
fn no_defaults_unchanged() {
    assert_eq!(rewrite("a, b, c"), "a, b, c");
    assert_eq!(rewrite("defaults, b"), "defaults, b");
}

#[test]
fn first_argument() {
    assert_eq!(rewrite("x default 3"), "x = 3");
}

#[test]
fn later_arguments() {
    assert_eq!(rewrite("a, b default 2"), "a, b = 2");
    assert_eq!(rewrite("a default 1, b, c default 3"), "a = 1, b, c = 3");
}

#[test]
fn bracketed_values_are_copied_whole() {
    assert_eq!(
        rewrite("p default xy(1, 2), q default {a: 1, b: 2}, r"),
        "p = xy(1, 2), q = {a: 1, b: 2}, r"
    );
    assert_eq!(rewrite("v default [1, 2], w default 0"), "v = [1, 2], w = 0");
}

#[test]
fn default_inside_value_is_left_alone() {
    assert_eq!(rewrite("a default f(b default 1)"), "a = f(b default 1)");
    assert_eq!(rewrite("a default b default 2"), "a = b default 2");
}

#[test]
fn greek_names() {
    assert_eq!(rewrite("θ default 0, φ default π"), "θ = 0, φ = π");
}

#[test]
fn missing_name_rejected() {
    let err = rewrite_default_args("default 3").unwrap_err();
    assert_eq!(err.code, ErrorCode::E2005);
    assert!(rewrite_default_args("a, default 3").is_err());
}

#[test]
fn unclosed_bracket_stops_rewriting() {
    assert_eq!(rewrite("a default f(1"), "a = f(1");
}
