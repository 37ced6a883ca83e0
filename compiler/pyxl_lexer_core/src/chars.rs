//! Character tables for PyxlScript source text.
//!
//! PyxlScript mixes ASCII identifiers with a fixed set of Greek letters and
//! mathematical glyphs (fractions, superscripts, set operators). Every
//! rewrite pass classifies characters through the functions here so the
//! tables stay in one place.


/// Greek letters permitted in identifiers.
///
/// `ε`, `π` and `ξ` are absent: they are constants, not names.
pub const GREEK_LETTERS: &str = "αβγΔδζηθιλμρσϕφχψτωΩ";

/// Glyphs that denote a numeric constant.
pub const CONSTANT_GLYPHS: &str = "επξ∞";

/// Vulgar fraction glyphs with their parenthesized expansion.
pub const FRACTIONS: &[(char, &str)] = &[
    ('½', "(1/2)"),
    ('⅓', "(1/3)"),
    ('⅔', "(2/3)"),
    ('¼', "(1/4)"),
    ('¾', "(3/4)"),
    ('⅕', "(1/5)"),
    ('⅖', "(2/5)"),
    ('⅗', "(3/5)"),
    ('⅘', "(4/5)"),
    ('⅙', "(1/6)"),
    ('⅐', "(1/7)"),
    ('⅛', "(1/8)"),
    ('⅑', "(1/9)"),
    ('⅒', "(1/10)"),
];

/// Superscript glyphs with their normal-script replacement.
pub const SUPERSCRIPTS: &[(char, &str)] = &[
    ('⁺', "+"),
    ('⁻', "-"),
    ('⁰', "0"),
    ('¹', "1"),
    ('²', "2"),
    ('³', "3"),
    ('⁴', "4"),
    ('⁵', "5"),
    ('⁶', "6"),
    ('⁷', "7"),
    ('⁸', "8"),
    ('⁹', "9"),
    ('ᵃ', " a "),
    ('ᵝ', " β "),
    ('ⁱ', " i "),
    ('ʲ', " j "),
    ('ˣ', " x "),
    ('ʸ', " y "),
    ('ᶻ', " z "),
    ('ᵘ', " u "),
    ('ᵏ', " k "),
    ('ⁿ', " n "),
    ('⁽', "("),
    ('⁾', ")"),
];

#[inline]
pub fn is_greek_letter(c: char) -> bool {
    GREEK_LETTERS.contains(c)
}

/// ASCII word character, the class used by every `\b`-style boundary test.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Any character that may appear inside an identifier, `$` included.
#[inline]
pub fn is_identifier_char(c: char) -> bool {
    is_word_char(c) || c == '$' || is_greek_letter(c)
}

#[inline]
pub fn is_fraction(c: char) -> bool {
    FRACTIONS.iter().any(|&(f, _)| f == c)
}

pub fn fraction_expansion(c: char) -> Option<&'static str> {
    FRACTIONS.iter().find(|&&(f, _)| f == c).map(|&(_, e)| e)
}

#[inline]
pub fn is_superscript(c: char) -> bool {
    SUPERSCRIPTS.iter().any(|&(s, _)| s == c)
}

pub fn superscript_normal(c: char) -> Option<&'static str> {
    SUPERSCRIPTS.iter().find(|&&(s, _)| s == c).map(|&(_, n)| n)
}

/// A glyph that acts as a complete numeric operand on the left of an
/// implicit product (`2π`, `½x`, `x²y`).
///
/// Superscript signs and `⁽` are excluded: they start an exponent rather
/// than end one.
pub fn is_constant_operand(c: char) -> bool {
    CONSTANT_GLYPHS.contains(c)
        || is_fraction(c)
        || (is_superscript(c) && !matches!(c, '⁺' | '⁻' | '⁽'))
}

/// A character that can begin the right operand of an implicit product.
///
/// `(` is deliberately not included; callers decide whether a parenthesis
/// may follow, since `f (x)` is a call rather than a product.
pub fn is_product_operand_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphabetic() || is_greek_letter(c) || CONSTANT_GLYPHS.contains(c)
}

/// Byte length of the identifier at the start of `s`.
///
/// Identifiers are `_?Δ?` followed by either an ASCII name (`_?[A-Za-z]\w*`)
/// or a Greek letter with an optional numeric or `_`-separated suffix.
pub fn identifier_len(s: &str) -> Option<usize> {
    let underscore = s.starts_with('_');
    let prefixes: &[(bool, bool)] = &[(true, true), (true, false), (false, true), (false, false)];
    for &(take_underscore, take_delta) in prefixes {
        let mut at = 0;
        if take_underscore {
            if !underscore {
                continue;
            }
            at += 1;
        }
        if take_delta {
            if !s[at..].starts_with('Δ') {
                continue;
            }
            at += 'Δ'.len_utf8();
        }
        if let Some(len) = identifier_body_len(&s[at..]) {
            return Some(at + len);
        }
    }
    None
}

/// `true` when the whole of `s` is exactly one identifier.
pub fn is_identifier(s: &str) -> bool {
    identifier_len(s) == Some(s.len())
}

fn identifier_body_len(s: &str) -> Option<usize> {
    let first = s.chars().next()?;

    // ASCII form: `_?[A-Za-z][A-Za-z_0-9]*`
    let ascii_start = if first == '_' { 1 } else { 0 };
    if s[ascii_start..].chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        let tail = &s[ascii_start + 1..];
        let rest = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
        return Some(ascii_start + 1 + rest);
    }

    // Greek form: `[greek][_0-9]*(?:_[A-Za-z_0-9]*)?`
    if is_greek_letter(first) {
        let at = first.len_utf8();
        let tail = &s[at..];
        let run = tail
            .find(|c: char| c != '_' && !c.is_ascii_digit())
            .unwrap_or(tail.len());
        if tail[..run].contains('_') {
            let rest = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
            return Some(at + rest);
        }
        return Some(at + run);
    }
    None
}
