use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn lines(src: &str) -> Vec<String> {
    src.split('\n').map(str::to_string).collect()
}

#[test]
fn call_across_lines_merges_onto_first() {
    let out = compact(lines("x = f(1,\n      2,\n      3)\ny = 4")).unwrap();
    assert_eq!(out, vec!["x = f(1, 2, 3)", "", "", "y = 4"]);
}

#[test]
fn nested_brackets_of_different_kinds() {
    let out = compact(lines("a = [{\n  b: 1\n}]")).unwrap();
    assert_eq!(out, vec!["a = [{ b: 1 }]", "", ""]);
}

#[test]
fn trailing_comma_chains_pull_up() {
    let out = compact(lines("with a,\n     b,\n     c ∊ obj:")).unwrap();
    assert_eq!(out, vec!["with a, b, c ∊ obj:", "", ""]);
}

#[test]
fn extra_closer_reported_at_its_line() {
    let err = compact(lines("x = 1\ny = 2)")).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.line, 1);
    assert_eq!(err.message, "Extra \")\", no expression to close");
}

#[test]
fn unclosed_expression_reported_at_start() {
    let err = compact(lines("a = 1\nb = f(\n  2,\n  3")).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.line, 1);
}

#[test]
fn unclosed_on_last_line() {
    let err = compact(lines("a = 1\nb = [")).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.line, 1);
}

#[test]
fn semicolon_on_closing_line_rejected() {
    let err = compact(lines("f(\n1); g()")).unwrap_err();
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.line, 1);
}

proptest! {
    #[test]
    fn line_count_preserved(body in prop::collection::vec("[a-z =,]{0,8}", 1..12)) {
        let mut src = body.clone();
        src.insert(0, "f(".to_string());
        src.push(")".to_string());
        let n = src.len();
        let out = compact(src).unwrap();
        prop_assert_eq!(out.len(), n);
        prop_assert!(out[1..].iter().all(String::is_empty));
    }
}
