//! Numeric literal forms: `0x`/`0b` integers, `%` and `°` suffixes,
//! fraction glyphs and small integer powers.

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::chars::{
    fraction_expansion, identifier_len, is_fraction, is_greek_letter, is_identifier_char,
    is_word_char,
};
use pyxl_lexer_core::line_of;


/// `0xff` → ` (255) `, `0b101` → ` (5) `.
pub(super) fn radix_literals(src: &str) -> Result<String, CompileError> {
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut at = 0;
    while let Some(offset) = src[at..].find('0') {
        let start = at + offset;
        at = start + 1;
        let (radix, prefix) = match src.as_bytes().get(start + 1) {
            Some(b'x') => (16, 'x'),
            Some(b'b') => (2, 'b'),
            _ => continue,
        };
        let attached = src[..start]
            .chars()
            .next_back()
            .is_some_and(|c| is_word_char(c) || is_greek_letter(c));
        if attached {
            continue;
        }
        let digits_start = start + 2;
        let len = src[digits_start..]
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(src.len() - digits_start);
        if len == 0 {
            continue;
        }
        let digits = &src[digits_start..digits_start + len];
        let value = u64::from_str_radix(digits, radix).map_err(|_| {
            CompileError::new(
                ErrorCode::E0004,
                line_of(src, start),
                format!("Number literal 0{prefix}{digits} is too large"),
            )
        })?;
        out.push_str(&src[copied..start]);
        out.push_str(&format!(" ({value}) "));
        copied = digits_start + len;
        at = copied;
    }
    out.push_str(&src[copied..]);
    Ok(out)
}

/// `30 deg` → `30°`, so `deg` is not read as a name in a product.
pub(super) fn deg_suffix(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut at = 0;
    while let Some(offset) = src[at..].find("deg") {
        let start = at + offset;
        let end = start + 3;
        at = end;
        if src[end..].chars().next().is_some_and(is_word_char) {
            continue;
        }
        let head = src[copied..start].trim_end_matches(' ');
        let gap_start = copied + head.len();
        let mut back = head.chars().rev();
        let numeric = match back.next() {
            Some(c) if c.is_ascii_digit() || is_fraction(c) => true,
            Some('.') => back.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        };
        if numeric {
            out.push_str(&src[copied..gap_start]);
            out.push('°');
            copied = end;
        }
    }
    out.push_str(&src[copied..]);
    out
}

/// Start of the literal (`12`, `12.5`, `12.` or a fraction glyph) that
/// ends at `end`, if one does and it is not the tail of a name.
fn literal_before(src: &str, end: usize) -> Option<usize> {
    let head = &src[..end];
    if let Some(c) = head.chars().next_back().filter(|&c| is_fraction(c)) {
        return Some(end - c.len_utf8());
    }
    let digits = |s: &str| s.len() - s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let mut start = end - digits(head);
    if head[..start].ends_with('.') {
        let whole = digits(&head[..start - 1]);
        if whole > 0 {
            start -= 1 + whole;
        }
    }
    if start == end || head[..start].chars().next_back().is_some_and(is_identifier_char) {
        return None;
    }
    Some(start)
}

/// `50%` → `(50 * 0.01)`; `90°` → radians.
fn scaled_literals(src: &str, suffix: char, scale: &str) -> String {
    if !src.contains(suffix) {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len() + 16);
    let mut copied = 0;
    for (at, _) in src.match_indices(suffix) {
        let Some(start) = literal_before(src, at).filter(|&start| start >= copied) else {
            continue;
        };
        out.push_str(&src[copied..start]);
        out.push_str(&format!("({} * {scale})", &src[start..at]));
        copied = at + suffix.len_utf8();
    }
    out.push_str(&src[copied..]);
    out
}

pub(super) fn percent(src: &str) -> String {
    scaled_literals(src, '%', "0.01")
}

pub(super) fn degrees(src: &str) -> String {
    scaled_literals(src, '°', ".017453292519943295")
}

pub(super) fn fractions(src: &str) -> String {
    if !src.contains(is_fraction) {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len() + 8);
    for c in src.chars() {
        match fraction_expansion(c) {
            Some(expansion) => out.push_str(expansion),
            None => out.push(c),
        }
    }
    out
}

/// `x**(3)` → `(x * x * x)` and `x**(-2)` → `(1 / (x * x))` for a name and
/// a single-digit exponent. A name after `.`, `++`, `--` or `**` is left
/// alone, since the product would bind differently.
pub(super) fn strength_reduce(src: &str) -> String {
    if !src.contains("**(") {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    for (op, _) in src.match_indices("**(") {
        let Some((exponent, close)) = small_exponent(&src[op + 3..]) else {
            continue;
        };
        let name_start = src[..op]
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_identifier_char(c))
            .last()
            .map_or(op, |(i, _)| i);
        if name_start < copied || identifier_len(&src[name_start..op]) != Some(op - name_start) {
            continue;
        }
        let before = src[..name_start].trim_end_matches(' ');
        if before.ends_with('.') || ["++", "--", "**"].iter().any(|t| before.ends_with(t)) {
            continue;
        }
        if exponent == 0 {
            continue;
        }
        let name = &src[name_start..op];
        let product = vec![name; exponent.unsigned_abs() as usize].join(" * ");
        out.push_str(&src[copied..name_start]);
        if exponent > 0 {
            out.push_str(&format!(" ({product})"));
        } else {
            out.push_str(&format!(" (1 / ({product}))"));
        }
        copied = op + 3 + close + 1;
    }
    out.push_str(&src[copied..]);
    out
}

/// `-?\d)` at the start of `rest`: the exponent and the offset of `)`.
fn small_exponent(rest: &str) -> Option<(i32, usize)> {
    let negative = rest.starts_with('-');
    let digit_at = usize::from(negative);
    let digit = rest[digit_at..].chars().next()?.to_digit(10)?;
    if rest[digit_at + 1..].starts_with(')') {
        let value = i32::try_from(digit).ok()?;
        Some((if negative { -value } else { value }, digit_at + 1))
    } else {
        None
    }
}

/// Any `%` left after the percent rewrite is an error.
pub(super) fn reject_stray_percent(src: &str) -> Result<(), CompileError> {
    match src.find('%') {
        Some(at) => Err(CompileError::new(
            ErrorCode::E0005,
            line_of(src, at),
            "Illegal standalone %. Maybe you want the \"mod\" operator?",
        )),
        None => Ok(()),
    }
}
