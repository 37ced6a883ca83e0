use pretty_assertions::assert_eq;
use pyxl_compiler::ErrorCode;

use crate::common::compile;

fn error(source: &str) -> (ErrorCode, usize) {
    let err = compile(source).unwrap_err();
    (err.code, err.line)
}

#[test]
fn with_without_element_of() {
    assert_eq!(error("a = 1\nwith x = player:\n    x += 1"), (ErrorCode::E2003, 1));
}

#[test]
fn for_without_comparator() {
    assert_eq!(error("x = 1\n\nfor i = 3:\n    f(i)"), (ErrorCode::E2001, 2));
}

#[test]
fn odd_quote_count() {
    let (code, line) = error("ok = \"fine\"\ns = \"abc");
    assert_eq!(code, ErrorCode::E0001);
    assert_eq!(line, 1);
}

#[test]
fn triple_equals_rejected() {
    assert_eq!(error("a = 1\n\nb = 2 === 3"), (ErrorCode::E0003, 2));
}

#[test]
fn error_line_survives_continuations() {
    let (code, line) = error("v = [1,\n     2]\nfor i = 3:\n    f(i)");
    assert_eq!(code, ErrorCode::E2001);
    assert_eq!(line, 2);
}
