//! Symbol and keyword operator substitutions.
//!
//! PyxlScript spells several operators as Unicode glyphs or words. Most
//! become their JavaScript spelling padded with spaces; the cleanup pass
//! collapses the extra whitespace at the end of the pipeline.

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::chars::is_word_char;
use pyxl_lexer_core::line_of;
use pyxl_lexer_core::next_instance;
use pyxl_lexer_core::scan::{find_word, replace_operator_word, replace_where, replace_words};


/// Replaces every `from` glyph with `to`.
fn glyphs(src: &str, table: &[(char, &str)]) -> String {
    if !src.contains(|c| table.iter().any(|&(g, _)| g == c)) {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len() + 8);
    for c in src.chars() {
        match table.iter().find(|&&(g, _)| g == c) {
            Some(&(_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// Glyph operators that take an optional `=` suffix: `∩=` → ` &= `.
fn compound_glyph(src: &str, glyph: char, op: &str) -> String {
    if !src.contains(glyph) {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len() + 8);
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        if c != glyph {
            out.push(c);
            continue;
        }
        out.push(' ');
        out.push_str(op);
        if chars.next_if_eq(&'=').is_some() {
            out.push('=');
        }
        out.push(' ');
    }
    out
}

/// `==` → ` === ` and `!=` → ` !== `, plus their glyph spellings.
pub(super) fn equality(src: &str) -> String {
    // Leaves `===`, `!==`, `<=` and `>=` alone so a second pass is a no-op.
    let not_eq = |before: Option<char>, after: Option<char>| {
        !before.is_some_and(|c| matches!(c, '=' | '!' | '<' | '>')) && after != Some('=')
    };
    let src = replace_where(src, "==", " === ", not_eq);
    let src = replace_where(&src, "!=", " !== ", not_eq);
    glyphs(&src, &[('≟', " === "), ('≠', " !== "), ('¬', " ! ")])
}

/// Hides `||` and `&&` from the absolute-value bars.
pub(super) fn hide_logical(src: &str) -> String {
    src.replace("||", " or ").replace("&&", " and ")
}

pub(super) fn floor_ceiling(src: &str) -> String {
    glyphs(src, &[('⌉', ")"), ('⌋', ")"), ('⌈', " ceil("), ('⌊', " floor(")])
}

/// `|x|` → `abs(x)` and `‖v‖` → `magnitude(v)`.
///
/// Bars pair up within a line, skipping bracketed groups.
pub(super) fn bars(src: &str, bar: char, function: &str) -> Result<String, CompileError> {
    let width = bar.len_utf8();
    let mut src = src.to_string();
    while let Some(open) = src.find(bar) {
        let unbalanced = || {
            CompileError::new(
                ErrorCode::E1001,
                line_of(&src, open),
                format!("Unbalanced {bar}...{bar}"),
            )
        };
        let line_end = src[open..].find('\n').map_or(src.len(), |n| open + n);
        let close = next_instance(&src[..line_end], &[bar], open + width)
            .map_err(|_| unbalanced())?
            .ok_or_else(unbalanced)?;
        src = format!(
            "{} {function}({}) {}",
            &src[..open],
            &src[open + width..close],
            &src[close + width..]
        );
    }
    Ok(src)
}

pub(super) fn comparisons(src: &str) -> String {
    glyphs(src, &[('≤', " <= "), ('≥', " >= ")])
}

pub(super) fn shifts(src: &str) -> String {
    let src = compound_glyph(src, '◀', "<<");
    let src = compound_glyph(&src, '◁', "<<");
    let src = compound_glyph(&src, '▶', ">>");
    compound_glyph(&src, '▷', ">>")
}

pub(super) fn power(src: &str) -> String {
    src.replace('^', "**")
}

pub(super) fn or(src: &str) -> String {
    replace_operator_word(src, "or", "||")
}

pub(super) fn set_operators(src: &str) -> String {
    let src = compound_glyph(src, '∩', "&");
    compound_glyph(&src, '∪', "|")
}

/// Named constants and their glyphs.
pub(super) fn constants(src: &str) -> String {
    const WORDS: &[(&str, &str)] = &[
        ("infinity", " (Infinity) "),
        ("nan", " (NaN) "),
        ("nil", " (undefined) "),
        ("pi", " ($Math.PI) "),
        ("epsilon", " (1e-6) "),
    ];
    let mut src = glyphs(
        src,
        &[
            ('∞', " (Infinity) "),
            ('∅', " (undefined) "),
            ('π', " ($Math.PI) "),
            ('ε', " (1e-6) "),
            ('ξ', " random() "),
        ],
    );
    for &(word, value) in WORDS {
        src = replace_words(&src, word, value);
    }
    src
}

/// Runs after `**` so the `^` it emits is not turned into a power.
pub(super) fn xor(src: &str) -> String {
    compound_glyph(src, '⊕', "^")
}

pub(super) fn logical_words(src: &str) -> String {
    let src = replace_operator_word(src, "and", "&&");
    let src = replace_operator_word(&src, "mod", "%");
    replace_operator_word(&src, "not", "!")
}

/// `bitand` and friends; unlike the other word operators no spaces are added.
pub(super) fn bit_operators(src: &str) -> String {
    const OPS: &[(&str, &str)] = &[
        ("bitshl", "<<"),
        ("bitshr", ">>"),
        ("bitnot", "~"),
        ("bitand", "&"),
        ("bitor", "|"),
        ("bitxor", "^"),
    ];
    let boundary = |c: Option<char>| !c.is_some_and(|c| is_word_char(c) && !c.is_ascii_digit());
    let mut src = src.to_string();
    for &(word, op) in OPS {
        src = replace_where(&src, word, op, |before, after| boundary(before) && boundary(after));
    }
    src
}

/// `assert` and `todo(` only run when the runtime enables them.
pub(super) fn debug_guards(src: &str) -> String {
    let src = replace_words(src, "assert", "$assertEnabled && assert");
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut from = 0;
    while let Some(at) = find_word(&src, "todo", from) {
        from = at + 4;
        let rest = src[from..].trim_start_matches(' ');
        if let Some(args) = rest.strip_prefix('(') {
            out.push_str(&src[copied..at]);
            out.push_str("$todoEnabled && $todo(");
            copied = src.len() - args.len();
            from = copied;
        }
    }
    out.push_str(&src[copied..]);
    out
}

/// `a default b` is handed to the expander as `a == b`, which rewrites it
/// to a nullish test. Every author-written `==` is `===` by now.
pub(super) fn nullish_marker(src: &str) -> String {
    replace_words(src, "default", "==")
}
