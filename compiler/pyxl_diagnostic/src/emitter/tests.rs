use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn sample() -> CompileError {
    CompileError::new(ErrorCode::E1004, 1, "Inconsistent indentation")
}

fn render_terminal(error: &CompileError, context: Option<SourceContext<'_>>) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit(error, context);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

// === Escaping ===

#[test]
fn test_escape_json() {
    assert_eq!(escape_json("hello"), "hello");
    assert_eq!(escape_json("\"quoted\""), "\\\"quoted\\\"");
    assert_eq!(escape_json("line1\nline2"), "line1\\nline2");
    assert_eq!(escape_json("path\\file"), "path\\\\file");
    assert_eq!(escape_json("≤ stays"), "≤ stays");
}

// === Terminal ===

#[test]
fn terminal_without_context() {
    let out = render_terminal(&sample(), None);
    assert_eq!(out, "error[E1004]: Inconsistent indentation\n  --> line 2\n");
}

#[test]
fn terminal_shows_source_line() {
    let src = "if x:\n  y = 1\n    z = 2";
    let out = render_terminal(&sample(), Some(SourceContext::new("Play.pyxl", src)));
    assert_eq!(
        out,
        "error[E1004]: Inconsistent indentation\n  --> Play.pyxl:2\n  |\n2 |   y = 1\n  |\n"
    );
}

#[test]
fn terminal_colors_when_forced() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&sample(), None);
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert!(out.contains("\x1b[1;31merror\x1b[0m"));
}

#[test]
fn terminal_summary_pluralizes() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2);
    emitter.emit_summary(0);
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    assert_eq!(out, "error: could not compile due to 2 previous errors\n");
}

#[test]
fn color_mode_parsing() {
    assert_eq!("never".parse::<ColorMode>(), Ok(ColorMode::Never));
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!("sometimes".parse::<ColorMode>().is_err());
}

// === JSON ===

#[test]
fn json_array_of_errors() {
    let mut emitter = JsonEmitter::new(Vec::new());
    emitter.begin();
    emitter.emit_all(
        &[sample(), CompileError::new(ErrorCode::E0003, 0, "Illegal \"===\"")],
        Some(SourceContext::new("a.pyxl", "")),
    );
    emitter.end();
    let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
    let expected = "[\n  {\n    \"code\": \"E1004\",\n    \"file\": \"a.pyxl\",\n    \"line\": 2,\n    \"message\": \"Inconsistent indentation\"\n  },\n  {\n    \"code\": \"E0003\",\n    \"file\": \"a.pyxl\",\n    \"line\": 1,\n    \"message\": \"Illegal \\\"===\\\"\"\n  }\n]\n";
    assert_eq!(out, expected);
}
