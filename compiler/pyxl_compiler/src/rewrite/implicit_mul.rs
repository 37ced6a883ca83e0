//! Implicit multiplication and superscript exponents.
//!
//! `2x`, `3(a + b)`, `(a)(b)` is *not* a product (it is a call), `πr²`,
//! `½x`. The products are inserted twice so that they also appear inside
//! exponents decoded by the first round: `x²ʸ` → `x^(2 y)` → `x^(2 * y)`.

use pyxl_lexer_core::chars::{
    identifier_len, is_constant_operand, is_identifier_char, is_product_operand_start,
    is_superscript, is_word_char, superscript_normal,
};
use pyxl_lexer_core::scan::boundary_before;


/// Word operators that the product rules may wrongly mark as operands.
const WORD_OPERATORS: &[&str] = &[
    "default", "xor", "or", "and", "not", "mod", "bitxor", "bitand", "bitor", "bitnot", "bitshr",
    "bitshl", "for", "with",
];

pub(super) fn implicit_products(src: &str) -> String {
    let mut src = src.to_string();
    for _ in 0..2 {
        src = join_products(&src, is_constant_operand, |c| {
            c == '(' || is_product_operand_start(c)
        });
        // `f(x) (y)` stays a call.
        src = join_products(&src, |c| c == ')', is_product_operand_start);
        src = number_products(&src);
        src = unmark_word_operators(&src);
        src = superscript_exponents(&src);
    }
    src
}

/// Inserts ` * ` between a `left` char and a following `right` char,
/// dropping any spaces between them.
fn join_products(
    src: &str,
    left: impl Fn(char) -> bool,
    right: impl Fn(char) -> bool,
) -> String {
    let mut out = String::with_capacity(src.len() + 16);
    let mut rest = src;
    while let Some(c) = rest.chars().next() {
        out.push(c);
        rest = &rest[c.len_utf8()..];
        if left(c) {
            let operand = rest.trim_start_matches(' ');
            if operand.chars().next().is_some_and(&right) {
                out.push_str(" * ");
                rest = operand;
            }
        }
    }
    out
}

/// `2x` → `2 * x`, `3(y)` → `3 * (y)`, `50%x` → `50% * x`. Digits that end
/// a name (`x2`) are not numbers.
fn number_products(src: &str) -> String {
    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    let mut out = String::with_capacity(src.len() + 16);
    let mut prev: Option<char> = None;
    let mut rest = src;
    while let Some(c) = rest.chars().next() {
        if !is_numeric(c) || prev.is_some_and(is_identifier_char) {
            out.push(c);
            prev = Some(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let run = rest.find(|c: char| !is_numeric(c)).unwrap_or(rest.len());
        let number = &rest[..run];
        let after = &rest[run..];
        let suffix_len = after
            .chars()
            .next()
            .filter(|&s| s == '%' || s == '°')
            .map_or(0, char::len_utf8);
        let operand = after[suffix_len..].trim_start_matches(' ');
        let joins = number.ends_with(|c: char| c.is_ascii_digit())
            && operand
                .chars()
                .next()
                .is_some_and(|c| c == '(' || is_product_operand_start(c));
        if joins {
            out.push_str(number);
            out.push_str(&after[..suffix_len]);
            out.push_str(" * ");
            prev = Some(' ');
            rest = operand;
        } else {
            out.push_str(number);
            prev = number.chars().next_back();
            rest = after;
        }
    }
    out
}

/// `x * and y` → `x  and y`.
fn unmark_word_operators(src: &str) -> String {
    if !src.contains('*') {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(star) = rest.find('*') {
        let after = rest[star + 1..].trim_start_matches(' ');
        let operator = WORD_OPERATORS.iter().any(|word| {
            after.strip_prefix(word).is_some_and(|tail| {
                tail.chars()
                    .next()
                    .is_none_or(|c| !is_word_char(c) || c.is_ascii_digit())
            })
        });
        out.push_str(&rest[..star]);
        if operator {
            out.push(' ');
            rest = after;
        } else {
            out.push('*');
            rest = &rest[star + 1..];
        }
    }
    out.push_str(rest);
    out
}

/// `x²` → `x^(2)`, `2ⁿ⁻¹` → `2^( n -1)`.
fn superscript_exponents(src: &str) -> String {
    if !src.contains(is_superscript) {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len() + 16);
    let mut rest = src;
    while let Some(start) = rest.find(is_superscript) {
        out.push_str(&rest[..start]);
        let run = &rest[start..];
        let len = run
            .find(|c: char| !(is_superscript(c) || c == ' '))
            .unwrap_or(run.len());
        out.push_str("^(");
        for c in run[..len].chars() {
            match superscript_normal(c) {
                Some(normal) => out.push_str(normal),
                None => out.push(c),
            }
        }
        out.push(')');
        rest = &run[len..];
    }
    out.push_str(rest);
    out
}

/// `cos θ` → `cos(θ)`, `sin π` → `sin(π)`: one-argument trig calls
/// written without parentheses.
pub(super) fn trig_calls(src: &str) -> String {
    const GLYPH_ARGUMENTS: &str = "επΔξ";
    let mut out = String::with_capacity(src.len() + 8);
    let mut copied = 0;
    let mut at = 0;
    while let Some(offset) = src[at..].find(['c', 's', 't']) {
        let start = at + offset;
        at = start + 1;
        let name = &src[start..];
        if !["cos", "sin", "tan"].iter().any(|f| name.starts_with(f))
            || !boundary_before(src, start)
        {
            continue;
        }
        let after = &name[3..];
        let argument = after.trim_start_matches(' ');
        let spaced = argument.len() < after.len();
        let arg_len = match identifier_len(argument) {
            Some(len) if spaced => len,
            _ => match argument.chars().next() {
                Some(c) if GLYPH_ARGUMENTS.contains(c) => c.len_utf8(),
                _ => continue,
            },
        };
        let arg_start = src.len() - argument.len();
        out.push_str(&src[copied..start + 3]);
        out.push('(');
        out.push_str(&argument[..arg_len]);
        out.push(')');
        copied = arg_start + arg_len;
        at = copied;
    }
    out.push_str(&src[copied..]);
    out
}
