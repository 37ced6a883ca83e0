//! `because` clauses and inline `then` bookkeeping.
//!
//! Runs on compacted lines, before conditional expressions are desugared.

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::chars::is_identifier_char;
use pyxl_lexer_core::scan::{boundary_before, count_words, find_matching_backward};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Calls that change the running mode and always carry a reason.
const MODE_CHANGES: &[&str] = &[
    "set_mode",
    "push_mode",
    "pop_mode",
    "launch_game",
    "reset_game",
    "quit_game",
];

pub fn apply_clauses(lines: &mut [String]) -> Result<(), CompileError> {
    for (i, line) in lines.iter_mut().enumerate() {
        if line.is_empty() {
            continue;
        }
        if let Some(at) = find_because(line) {
            *line = attach_reason(line, at).ok_or_else(|| {
                CompileError::new(
                    ErrorCode::E1001,
                    i,
                    "Missing matching parenthesis before \"because\"",
                )
            })?;
        }
        *line = insert_default_reasons(line);

        let ifs = count_words(line, "if");
        let thens = count_words(line, "then");
        let elses = count_words(line, "else");
        if thens > elses {
            return Err(CompileError::new(ErrorCode::E1009, i, "\"then\" without \"else\"."));
        } else if thens > ifs {
            return Err(CompileError::new(ErrorCode::E1009, i, "\"then\" without \"if\"."));
        }
    }
    Ok(())
}

/// Position of a `because` preceded by `)` and followed by a literal.
fn find_because(line: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = line[from..].find("because") {
        let at = from + offset;
        from = at + "because".len();
        let before = line[..at].trim_end_matches(' ');
        let after = &line[from..];
        let spaced = after.trim_start_matches(' ');
        if before.ends_with(')') && spaced.len() < after.len() && spaced.starts_with('"') {
            return Some(at);
        }
    }
    None
}

/// `f(x) because "why"` becomes `(because("why"),f(x))`.
fn attach_reason(line: &str, because_at: usize) -> Option<String> {
    let reason_begin = because_at + line[because_at..].find('"')?;
    let reason_end = reason_begin + 1 + line[reason_begin + 1..].find('"')?;
    let call_end = line[..because_at].rfind(')')?;
    let mut call_begin = find_matching_backward(line, call_end)?;
    while let Some(c) = line[..call_begin].chars().next_back().filter(|&c| is_identifier_char(c) && c != '$') {
        call_begin -= c.len_utf8();
    }
    Some(format!(
        "{}(because({}),{}){}",
        &line[..call_begin],
        &line[reason_begin..=reason_end],
        &line[call_begin..=call_end],
        &line[reason_end + 1..],
    ))
}

/// Prefixes each mode change not already inside a `because` pair with
/// `because("");`.
fn insert_default_reasons(line: &str) -> String {
    if !MODE_CHANGES.iter().any(|name| line.contains(name)) {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + 16);
    let mut copied = 0;
    for (at, _) in line.char_indices() {
        if at < copied || !boundary_before(line, at) {
            continue;
        }
        let Some(name) = MODE_CHANGES.iter().find(|name| line[at..].starts_with(**name)) else {
            continue;
        };
        let tail = line[at + name.len()..].trim_start_matches(' ');
        if !tail.starts_with('(') || line[..at].ends_with(',') {
            continue;
        }
        out.push_str(&line[copied..at]);
        out.push_str("because(\"\");");
        copied = at;
    }
    out.push_str(&line[copied..]);
    out
}
