//! Quoting guard: string literals hidden behind private-use placeholders.
//!
//! Every later pass is a textual rewrite, so string contents must never be
//! visible to them. [`SourceBuffer::guard`] replaces each double-quoted
//! literal with `"P"`, where `P` is one character from the Unicode
//! private-use area, and records the original contents in a [`StringTable`].
//! [`StringTable::restore`] reverses the substitution at the very end.
//!
//! # Reserved range
//!
//! | Code point          | Meaning                                  |
//! |---------------------|------------------------------------------|
//! | `U+E000`            | `\"` outside of a literal                |
//! | `U+E010..=U+F8FE`   | literal placeholders, in order of appearance |
//! | `U+F8FF`            | stacked-`if` marker for the desugarer     |
//!
//! Source text that already contains a code point in `U+E000..=U+F8FF` is
//! rejected so a placeholder can never collide with user text.

use crate::cursor::Cursor;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Stand-in for `\"` appearing outside a string literal.
pub const ESCAPED_QUOTE: char = '\u{E000}';

/// Marker used while desugaring stacked `if` expressions.
pub const STACKED_IF_MARKER: char = '\u{F8FF}';

const RESERVED_FIRST: char = '\u{E000}';
const RESERVED_LAST: char = '\u{F8FF}';
const PLACEHOLDER_FIRST: u32 = 0xE010;
const PLACEHOLDER_LAST: u32 = 0xF8FE;

/// Why the guard refused a source text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuardIssueKind {
    /// A `"` with no closing partner.
    UnbalancedQuote,
    /// A literal whose closing `"` is on a later line.
    MultilineLiteral,
    /// The source contains a code point from the reserved range.
    ReservedCharacter(char),
    /// More literals than placeholders.
    TooManyLiterals,
}

/// A guard failure at a byte offset of the original source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GuardIssue {
    pub kind: GuardIssueKind,
    pub pos: usize,
}

/// Literal contents indexed by placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringTable {
    literals: Vec<String>,
}

impl StringTable {
    pub fn new() -> Self {
        StringTable::default()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Contents of the literal behind `placeholder`, if it is one.
    pub fn get(&self, placeholder: char) -> Option<&str> {
        let index = u32::from(placeholder).checked_sub(PLACEHOLDER_FIRST)?;
        self.literals.get(index as usize).map(String::as_str)
    }

    /// Registers `contents` and returns the quoted placeholder `"P"`.
    ///
    /// `contents` is stored verbatim, escapes included. Returns `None` once
    /// the placeholder range is exhausted.
    pub fn protect(&mut self, contents: &str) -> Option<String> {
        let index = u32::try_from(self.literals.len()).ok()?;
        let code = PLACEHOLDER_FIRST.checked_add(index)?;
        if code > PLACEHOLDER_LAST {
            return None;
        }
        let placeholder = char::from_u32(code)?;
        self.literals.push(contents.to_string());
        Some(format!("\"{placeholder}\""))
    }

    /// Substitutes every placeholder with its literal and every
    /// [`ESCAPED_QUOTE`] with `\"`.
    ///
    /// Literal contents never hold reserved code points, so restoring an
    /// already restored text changes nothing.
    pub fn restore(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == ESCAPED_QUOTE {
                out.push_str("\\\"");
            } else if let Some(literal) = self.get(c) {
                out.push_str(literal);
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Source text with every string literal replaced by a placeholder.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    text: String,
    strings: StringTable,
}

impl SourceBuffer {
    /// Guards `source`.
    ///
    /// Inside a literal a backslash escapes the following character. Outside
    /// literals `\"` becomes [`ESCAPED_QUOTE`].
    pub fn guard(source: &str) -> Result<Self, GuardIssue> {
        if let Some((pos, c)) = source.char_indices().find(|&(_, c)| is_reserved(c)) {
            return Err(GuardIssue {
                kind: GuardIssueKind::ReservedCharacter(c),
                pos,
            });
        }

        let mut text = String::with_capacity(source.len());
        let mut strings = StringTable::new();
        let mut cursor = Cursor::new(source);
        loop {
            let start = cursor.pos();
            let found = cursor.seek_either(b'"', b'\\');
            text.push_str(cursor.slice_from(start));
            match found {
                None => break,
                Some(b'\\') => {
                    cursor.bump();
                    if cursor.eat("\"") {
                        text.push(ESCAPED_QUOTE);
                    } else if cursor.eat("\\") {
                        text.push_str("\\\\");
                    } else {
                        text.push('\\');
                    }
                }
                Some(_) => {
                    let open = cursor.pos();
                    let contents = scan_literal(&mut cursor).ok_or(GuardIssue {
                        kind: GuardIssueKind::UnbalancedQuote,
                        pos: open,
                    })?;
                    if contents.contains('\n') {
                        return Err(GuardIssue {
                            kind: GuardIssueKind::MultilineLiteral,
                            pos: open,
                        });
                    }
                    let placeholder = strings.protect(contents).ok_or(GuardIssue {
                        kind: GuardIssueKind::TooManyLiterals,
                        pos: open,
                    })?;
                    text.push_str(&placeholder);
                }
            }
        }
        Ok(SourceBuffer { text, strings })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    pub fn into_parts(self) -> (String, StringTable) {
        (self.text, self.strings)
    }
}

/// Consumes a literal starting at its opening quote and returns its body.
fn scan_literal<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    cursor.bump();
    let body = cursor.pos();
    loop {
        match cursor.seek_either(b'"', b'\\')? {
            b'\\' => {
                cursor.bump();
                cursor.bump();
            }
            _ => break,
        }
    }
    let contents = cursor.slice_from(body);
    cursor.bump();
    Some(contents)
}

#[inline]
fn is_reserved(c: char) -> bool {
    (RESERVED_FIRST..=RESERVED_LAST).contains(&c)
}

/// Zero-based line number of byte offset `pos`.
pub fn line_of(src: &str, pos: usize) -> usize {
    let end = pos.min(src.len());
    memchr::memchr_iter(b'\n', &src.as_bytes()[..end]).count()
}
