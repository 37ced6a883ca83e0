use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn placeholder(i: u32) -> char {
    char::from_u32(0xE010 + i).unwrap()
}

// === Guarding ===

#[test]
fn literals_become_placeholders() {
    let buf = SourceBuffer::guard(r#"draw_text(font, "hi", xy(1, 2))"#).unwrap();
    let expected = format!("draw_text(font, \"{}\", xy(1, 2))", placeholder(0));
    assert_eq!(buf.text(), expected);
    assert_eq!(buf.strings().get(placeholder(0)), Some("hi"));
}

#[test]
fn placeholders_follow_source_order() {
    let buf = SourceBuffer::guard(r#"a = "x" + "y""#).unwrap();
    assert_eq!(buf.strings().len(), 2);
    assert_eq!(buf.strings().get(placeholder(0)), Some("x"));
    assert_eq!(buf.strings().get(placeholder(1)), Some("y"));
}

#[test]
fn escaped_quote_stays_inside_literal() {
    let buf = SourceBuffer::guard(r#"s = "say \"hi\"" + t"#).unwrap();
    assert_eq!(buf.strings().get(placeholder(0)), Some(r#"say \"hi\""#));
    assert!(buf.text().ends_with("\" + t"));
}

#[test]
fn escaped_backslash_before_closing_quote() {
    let buf = SourceBuffer::guard(r#"s = "a\\" + "b""#).unwrap();
    assert_eq!(buf.strings().get(placeholder(0)), Some(r"a\\"));
    assert_eq!(buf.strings().get(placeholder(1)), Some("b"));
}

#[test]
fn empty_literal() {
    let buf = SourceBuffer::guard(r#"x = """#).unwrap();
    assert_eq!(buf.strings().get(placeholder(0)), Some(""));
}

#[test]
fn source_without_literals_is_unchanged() {
    let src = "let x = 3\nx += 1";
    let buf = SourceBuffer::guard(src).unwrap();
    assert_eq!(buf.text(), src);
    assert!(buf.strings().is_empty());
}

// === Issues ===

#[test]
fn odd_quote_is_unbalanced() {
    let err = SourceBuffer::guard("x = 1\ny = \"abc").unwrap_err();
    assert_eq!(err.kind, GuardIssueKind::UnbalancedQuote);
    assert_eq!(line_of("x = 1\ny = \"abc", err.pos), 1);
}

#[test]
fn literal_spanning_lines_is_rejected() {
    let src = "x = \"abc\ny = \"d\"";
    let err = SourceBuffer::guard(src).unwrap_err();
    assert_eq!(err.kind, GuardIssueKind::MultilineLiteral);
    assert_eq!(line_of(src, err.pos), 0);
}

#[test]
fn reserved_code_points_are_rejected() {
    let err = SourceBuffer::guard("x = 1\u{E123}").unwrap_err();
    assert_eq!(err.kind, GuardIssueKind::ReservedCharacter('\u{E123}'));
    assert_eq!(err.pos, 5);
}

// === Restoring ===

#[test]
fn restore_round_trips() {
    let src = r#"debug_print("a", 1, "b\"c")"#;
    let buf = SourceBuffer::guard(src).unwrap();
    assert_eq!(buf.strings().restore(buf.text()), src);
}

#[test]
fn restore_expands_escaped_quote_outside_literal() {
    let buf = SourceBuffer::guard(r#"a \" b"#).unwrap();
    assert!(buf.text().contains(ESCAPED_QUOTE));
    assert_eq!(buf.strings().restore(buf.text()), r#"a \" b"#);
}

#[test]
fn protect_registers_generated_literals() {
    let mut table = StringTable::new();
    let quoted = table.protect("RESET").unwrap();
    assert_eq!(quoted, format!("\"{}\"", placeholder(0)));
    assert_eq!(table.restore(&quoted), "\"RESET\"");
}

#[test]
fn line_of_counts_newlines() {
    let src = "a\nb\nc";
    assert_eq!(line_of(src, 0), 0);
    assert_eq!(line_of(src, 2), 1);
    assert_eq!(line_of(src, 4), 2);
    assert_eq!(line_of(src, 99), 2);
}

// === Properties ===

proptest! {
    #[test]
    fn guard_then_restore_is_identity(
        parts in proptest::collection::vec(("[a-z +(),]{0,6}", "[a-z ]{0,6}"), 0..5)
    ) {
        let src: String = parts
            .iter()
            .map(|(code, lit)| format!("{code}\"{lit}\""))
            .collect();
        let buf = SourceBuffer::guard(&src).unwrap();
        let restored = buf.strings().restore(buf.text());
        prop_assert_eq!(&restored, &src);
        prop_assert_eq!(buf.strings().restore(&restored), restored);
    }
}
