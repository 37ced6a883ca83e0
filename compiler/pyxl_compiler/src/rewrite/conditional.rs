//! Inline conditionals: `x = if a then b else c` becomes `x = ( a ) ? ( b ) : c`.
//!
//! An `if` that starts a line is a statement and is left for the block
//! structurer. Any other `if` with an expression-like prefix opens a
//! conditional, except after `: ` outside an open `{`, where it is a
//! stacked statement (`def f(x): if x: g()`).

use pyxl_lexer_core::chars::{is_greek_letter, is_word_char};
use pyxl_lexer_core::scan::{boundary_after, boundary_before, find_word, replace_where};
use pyxl_lexer_core::STACKED_IF_MARKER;

#[cfg(test)]
mod tests;

/// Characters that may end the prefix of an inline `if`, directly or
/// followed by spaces.
const OPERATOR_PREFIX: &str = ":^=-+*/><,[{(";

pub fn desugar_conditionals(line: &str) -> String {
    if !line.contains("if") && !line.contains("then") && !line.contains("else") {
        return line.to_string();
    }
    let mut line = line.to_string();
    let mut from = 0;
    while let Some(at) = next_inline_if(&line, from) {
        let prefix = &line[..at];
        let head = prefix.trim_end_matches(' ');
        if head.ends_with("else") && boundary_before(head, head.len() - 4) {
            // `else if` chains are left to the statement compiler.
            from = at + 2;
            continue;
        }
        let stacked =
            prefix.ends_with(": ") && prefix.matches('{').count() <= prefix.matches('}').count();
        let replacement = if stacked {
            STACKED_IF_MARKER.to_string()
        } else {
            "(".to_string()
        };
        line.replace_range(at..at + 2, &replacement);
        from = at + replacement.len();
    }
    let line = line.replace(STACKED_IF_MARKER, "if");

    let line = replace_where(&line, "then", ") ? (", |before, after| {
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    });
    replace_else(&line)
}

/// Leftmost `if` at or after `from` whose prefix marks it as inline.
fn next_inline_if(line: &str, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(found) = find_word(line, "if", at) {
        if inline_prefix(&line[..found]) {
            return Some(found);
        }
        at = found + 2;
    }
    None
}

/// The prefix holds code and ends either in a name character and one
/// space, or in an operator and any number of spaces.
fn inline_prefix(prefix: &str) -> bool {
    let code = prefix.trim_start_matches(' ');
    let trimmed = code.trim_end_matches(' ');
    let mut tail = trimmed.chars().rev();
    let Some(last) = tail.next() else {
        return false;
    };
    let has_lead = tail.next().is_some();
    if OPERATOR_PREFIX.contains(last) {
        return has_lead;
    }
    let spaces = code.len() - trimmed.len();
    let name_char = is_word_char(last) || is_greek_letter(last);
    name_char && spaces == 1 && has_lead
}

/// `else` that neither opens a block (`else:`) nor chains (`else if`)
/// becomes the `:` of the conditional.
fn replace_else(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut from = 0;
    while let Some(at) = find_word(line, "else", from) {
        let end = at + 4;
        from = end;
        let rest = &line[end..];
        let spaced = rest.trim_start_matches(' ');
        if spaced.len() == rest.len() {
            continue;
        }
        let chains = spaced.starts_with(':')
            || (spaced.starts_with("if") && boundary_after(spaced, 2));
        if chains {
            continue;
        }
        out.push_str(&line[copied..at]);
        out.push_str(") : ");
        copied = line.len() - spaced.len();
        from = copied;
    }
    out.push_str(&line[copied..]);
    out
}
