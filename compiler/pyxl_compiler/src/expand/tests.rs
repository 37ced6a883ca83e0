use super::*;
use pretty_assertions::assert_eq;

fn expand(src: &str) -> Result<String, ExpanderError> {
    ScalarExpander.expand(src, &ExpanderOptions::default())
}

#[test]
fn default_options() {
    let options = ExpanderOptions::default();
    assert!(options.assignment_returns_undefined);
    assert!(options.nullish_rewrite);
    assert_eq!(options.operator_prefix, "$");
}

#[test]
fn nullish_marker_becomes_coalesce() {
    assert_eq!(expand("x = a == 3;").unwrap(), "x = a ?? 3;");
}

#[test]
fn comparisons_untouched() {
    let src = "if (a === b && c !== d && e <= f && g >= h) {}";
    assert_eq!(expand(src).unwrap(), src);
}

#[test]
fn rewrite_can_be_disabled() {
    let options = ExpanderOptions {
        nullish_rewrite: false,
        ..ExpanderOptions::default()
    };
    assert_eq!(ScalarExpander.expand("a == b", &options).unwrap(), "a == b");
}

#[test]
fn missing_left_operand_reported_at_line() {
    let err = expand("a();\n  == 3;").unwrap_err();
    assert_eq!(err.line, Some(1));
}
