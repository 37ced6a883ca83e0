use super::*;
use pretty_assertions::assert_eq;

fn apply(line: &str) -> Result<String, CompileError> {
    let mut lines = vec![line.to_string()];
    apply_clauses(&mut lines)?;
    Ok(lines.remove(0))
}

// === because ===

#[test]
fn reason_moves_before_call() {
    assert_eq!(
        apply("set_mode(Play) because \"R\"").unwrap(),
        "(because(\"R\"),set_mode(Play))"
    );
}

#[test]
fn reason_keeps_indentation_and_tail() {
    assert_eq!(
        apply("    push_mode(Menu, f(1)) because \"R\"; x = 1").unwrap(),
        "    (because(\"R\"),push_mode(Menu, f(1))); x = 1"
    );
}

#[test]
fn bare_mode_change_gets_empty_reason() {
    assert_eq!(apply("if won: set_mode(Win)").unwrap(), "if won: because(\"\");set_mode(Win)");
    assert_eq!(apply("pop_mode ()").unwrap(), "because(\"\");pop_mode ()");
}

#[test]
fn longer_names_untouched() {
    assert_eq!(apply("my_set_mode(x)").unwrap(), "my_set_mode(x)");
    assert_eq!(apply("set_modes(x)").unwrap(), "set_modes(x)");
}

// === then ===

#[test]
fn then_needs_else() {
    let err = apply("x = if a then b").unwrap_err();
    assert_eq!(err.code, ErrorCode::E1009);
    assert_eq!(err.message, "\"then\" without \"else\".");
}

#[test]
fn then_needs_if() {
    let err = apply("x = a then b else c").unwrap_err();
    assert_eq!(err.message, "\"then\" without \"if\".");
}

#[test]
fn error_names_line() {
    let mut lines = vec!["x = 1".to_string(), String::new(), "y = a then b".to_string()];
    assert_eq!(apply_clauses(&mut lines).unwrap_err().line, 2);
}
