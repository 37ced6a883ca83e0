use super::*;
use crate::context::CompileOptions;
use pretty_assertions::assert_eq;

fn run(source: &str) -> Result<Vec<String>, CompileError> {
    let mut ctx = CompileContext::new(CompileOptions::default());
    prepare(source, &mut ctx)
}

// === Normalization ===

#[test]
fn tabs_and_symbols_normalized() {
    let lines = run("if x:\n\ty ∈ z").unwrap();
    assert_eq!(lines, vec!["if x:", "    y ∊ z"]);
}

#[test]
fn comparison_and_membership_hidden() {
    let lines = run("for i <= 3:\nfor k in list:").unwrap();
    assert_eq!(lines, vec!["for i ≤ 3:", "for k ∊ list:"]);
}

#[test]
fn ellipsis_becomes_spread() {
    assert_eq!(run("f(…xs)").unwrap(), vec!["f(...xs)"]);
}

// === Comments ===

#[test]
fn block_comment_keeps_line_count() {
    let lines = run("a = 1 /* one\ntwo\nthree */ b = 2\nc = 3").unwrap();
    assert_eq!(lines, vec!["a = 1", "", " b = 2", "c = 3"]);
}

#[test]
fn line_comment_and_trailing_spaces_removed() {
    let lines = run("x = 1   // note\ny = 2   ").unwrap();
    assert_eq!(lines, vec!["x = 1", "y = 2"]);
}

#[test]
fn comment_markers_inside_strings_survive() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let lines = prepare("s = \"http://x\"", &mut ctx).unwrap();
    assert_eq!(ctx.restore(&lines[0]), "s = \"http://x\"");
}

// === Because ===

#[test]
fn because_on_next_line_pulled_up() {
    let mut ctx = CompileContext::new(CompileOptions::default());
    let lines = prepare("set_mode(Play)\n\n    because \"won\"\nx = 1", &mut ctx).unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(ctx.restore(&lines[0]), "set_mode(Play) because \"won\"");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "    ");
}

#[test]
fn because_without_call_left_alone() {
    let lines = run("x = 1\nbecause \"no\"").unwrap();
    assert_eq!(lines[0], "x = 1");
}

// === Guard failures ===

#[test]
fn odd_quote_rejected_at_its_line() {
    let err = run("a = 1\nb = \"open\nc = 2").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0001);
    assert_eq!(err.line, 1);
}

#[test]
fn reserved_character_rejected() {
    let err = run("x = 1\ny = \u{E123}").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0002);
    assert_eq!(err.line, 1);
}
