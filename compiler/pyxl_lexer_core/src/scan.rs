//! Bracket-aware and word-aware search over a single line of text.
//!
//! All positions are byte offsets. The bracket scanners understand `()`,
//! `[]` and `{}`. String literals never need special handling here because
//! the quoting guard has already replaced them with opaque placeholders.

use crate::chars::is_word_char;


/// A closing bracket appeared with no matching opener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnbalancedBracket {
    /// Byte offset of the offending closing bracket.
    pub pos: usize,
    pub bracket: char,
}

fn pair_of(c: char) -> Option<(char, char)> {
    match c {
        '(' | ')' => Some(('(', ')')),
        '[' | ']' => Some(('[', ']')),
        '{' | '}' => Some(('{', '}')),
        _ => None,
    }
}

/// Position of the bracket closing the opener at `open_at`.
///
/// Only brackets of the same kind are counted. Returns `None` when `open_at`
/// is not an opening bracket or when the bracket is never closed.
pub fn find_matching(src: &str, open_at: usize) -> Option<usize> {
    let opener = src.get(open_at..)?.chars().next()?;
    let (open, close) = pair_of(opener).filter(|&(o, _)| o == opener)?;
    let mut depth = 0usize;
    for (offset, c) in src[open_at..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_at + offset);
            }
        }
    }
    None
}

/// Position of the bracket opening the closer at `close_at`.
pub fn find_matching_backward(src: &str, close_at: usize) -> Option<usize> {
    let closer = src.get(close_at..)?.chars().next()?;
    let (open, close) = pair_of(closer).filter(|&(_, c)| c == closer)?;
    let mut depth = 0usize;
    for (offset, c) in src[..=close_at].char_indices().rev() {
        if c == close {
            depth += 1;
        } else if c == open {
            depth -= 1;
            if depth == 0 {
                return Some(offset);
            }
        }
    }
    None
}

/// First position at or after `from` holding one of `targets` at bracket
/// depth zero.
///
/// Balanced `()`, `[]` and `{}` groups are skipped. Brackets themselves are
/// never reported as targets. A closer without an opener fails.
pub fn next_instance(
    src: &str,
    targets: &[char],
    from: usize,
) -> Result<Option<usize>, UnbalancedBracket> {
    let Some(tail) = src.get(from..) else {
        return Ok(None);
    };
    let mut counts = [0i32; 3];
    let mut depth = 0i32;
    for (offset, c) in tail.char_indices() {
        match c {
            '(' => {
                counts[0] += 1;
                depth += 1;
            }
            '[' => {
                counts[1] += 1;
                depth += 1;
            }
            '{' => {
                counts[2] += 1;
                depth += 1;
            }
            ')' | ']' | '}' => {
                let slot = match c {
                    ')' => 0,
                    ']' => 1,
                    _ => 2,
                };
                depth -= 1;
                counts[slot] -= 1;
                if counts[slot] < 0 {
                    return Err(UnbalancedBracket {
                        pos: from + offset,
                        bracket: c,
                    });
                }
            }
            _ if depth == 0 && targets.contains(&c) => return Ok(Some(from + offset)),
            _ => {}
        }
    }
    Ok(None)
}

/// Net `open - close` count of each bracket kind: `[paren, bracket, brace]`.
pub fn bracket_balance(src: &str) -> [i32; 3] {
    let mut counts = [0i32; 3];
    for c in src.chars() {
        match c {
            '(' => counts[0] += 1,
            ')' => counts[0] -= 1,
            '[' => counts[1] += 1,
            ']' => counts[1] -= 1,
            '{' => counts[2] += 1,
            '}' => counts[2] -= 1,
            _ => {}
        }
    }
    counts
}

// === Word boundaries ===

/// `true` when a word boundary sits immediately before byte `pos`.
#[inline]
pub fn boundary_before(src: &str, pos: usize) -> bool {
    !src[..pos].chars().next_back().is_some_and(is_word_char)
}

/// `true` when a word boundary sits immediately after byte `end`.
#[inline]
pub fn boundary_after(src: &str, end: usize) -> bool {
    !src[end..].chars().next().is_some_and(is_word_char)
}

/// First whole-word occurrence of `word` at or after `from`.
pub fn find_word(src: &str, word: &str, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(offset) = src.get(at..)?.find(word) {
        let start = at + offset;
        let end = start + word.len();
        if boundary_before(src, start) && boundary_after(src, end) {
            return Some(start);
        }
        at = start + word.chars().next().map_or(1, char::len_utf8);
    }
    None
}

pub fn contains_word(src: &str, word: &str) -> bool {
    find_word(src, word, 0).is_some()
}

pub fn count_words(src: &str, word: &str) -> usize {
    let mut count = 0;
    let mut at = 0;
    while let Some(start) = find_word(src, word, at) {
        count += 1;
        at = start + word.len();
    }
    count
}

/// Replaces every whole-word occurrence of `word`.
pub fn replace_words(src: &str, word: &str, replacement: &str) -> String {
    replace_where(src, word, replacement, |before, after| {
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

/// Replaces a keyword operator such as `or` with ` replacement `.
///
/// Unlike [`replace_words`], a digit directly against the keyword also counts
/// as a boundary, so `3or 4` is rewritten while `order` and `xor` are not.
pub fn replace_operator_word(src: &str, word: &str, replacement: &str) -> String {
    let spaced = format!(" {replacement} ");
    replace_where(src, word, &spaced, |before, after| {
        let ok = |c: Option<char>| !c.is_some_and(|c| is_word_char(c) && !c.is_ascii_digit());
        ok(before) && ok(after)
    })
}

/// Replaces each occurrence of `needle` for which `accept(prev, next)` holds,
/// where `prev` and `next` are the characters around the occurrence.
pub fn replace_where(
    src: &str,
    needle: &str,
    replacement: &str,
    accept: impl Fn(Option<char>, Option<char>) -> bool,
) -> String {
    if needle.is_empty() || !src.contains(needle) {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut at = 0;
    while let Some(offset) = src[at..].find(needle) {
        let start = at + offset;
        let end = start + needle.len();
        let before = src[..start].chars().next_back();
        let after = src[end..].chars().next();
        if accept(before, after) {
            out.push_str(&src[copied..start]);
            out.push_str(replacement);
            copied = end;
            at = end;
        } else {
            at = start + needle.chars().next().map_or(1, char::len_utf8);
        }
    }
    out.push_str(&src[copied..]);
    out
}

/// Byte offset of the first non-space character, or the length when blank.
pub fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
