use super::*;

#[test]
fn bump_moves_by_whole_chars() {
    let mut c = Cursor::new("aπb");
    assert_eq!(c.bump(), Some('a'));
    assert_eq!(c.bump(), Some('π'));
    assert_eq!(c.pos(), 1 + 'π'.len_utf8());
    assert_eq!(c.prev(), Some('π'));
    assert_eq!(c.bump(), Some('b'));
    assert!(c.is_eof());
    assert_eq!(c.bump(), None);
}

#[test]
fn peek_and_current() {
    let c = Cursor::new("xy");
    assert_eq!(c.current(), Some('x'));
    assert_eq!(c.peek(), Some('y'));
    assert_eq!(c.prev(), None);
}

#[test]
fn eat_while_returns_consumed_slice() {
    let mut c = Cursor::new("123abc");
    assert_eq!(c.eat_while(|ch| ch.is_ascii_digit()), "123");
    assert_eq!(c.rest(), "abc");
    assert_eq!(c.eat_while(|ch| ch.is_ascii_digit()), "");
}

#[test]
fn eat_literal_prefix() {
    let mut c = Cursor::new("0x1F");
    assert!(!c.eat("0b"));
    assert!(c.eat("0x"));
    assert_eq!(c.rest(), "1F");
}

#[test]
fn seek_either_finds_first_byte() {
    let mut c = Cursor::new(r#"ab\c"d"#);
    assert_eq!(c.seek_either(b'"', b'\\'), Some(b'\\'));
    assert_eq!(c.pos(), 2);
    c.bump();
    assert_eq!(c.seek_either(b'"', b'\\'), Some(b'"'));
    assert_eq!(c.pos(), 4);
    c.bump();
    assert_eq!(c.seek_either(b'"', b'\\'), None);
    assert!(c.is_eof());
}

#[test]
fn cursor_at_clamps() {
    let c = Cursor::at("abc", 10);
    assert!(c.is_eof());
    assert_eq!(c.rest(), "");
}
