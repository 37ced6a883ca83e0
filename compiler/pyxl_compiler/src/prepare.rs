//! Source preparation: normalization, quoting guard and comment removal.
//!
//! Runs before compaction. Every step keeps the number of lines unchanged so
//! that later errors still name original source lines.

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::{line_of, GuardIssueKind, SourceBuffer};

use crate::context::CompileContext;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Look-alike double bars folded into `‖`.
const CONFUSABLE_BARS: &[char] = &['∥', '𝄁', '║', 'Ⅱ', 'ǁ'];

/// Normalizes, guards and cleans `source`, returning its lines.
///
/// The unit's string table is installed into `ctx`.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn prepare(source: &str, ctx: &mut CompileContext) -> Result<Vec<String>, CompileError> {
    let normalized = normalize(source);
    let buffer = SourceBuffer::guard(&normalized).map_err(|issue| {
        let line = line_of(&normalized, issue.pos);
        let (code, message) = match issue.kind {
            GuardIssueKind::UnbalancedQuote => (ErrorCode::E0001, "Unbalanced quotes".to_string()),
            GuardIssueKind::MultilineLiteral => (
                ErrorCode::E0001,
                "Illegal multiline quoted string (use \\n for a newline)".to_string(),
            ),
            GuardIssueKind::ReservedCharacter(c) => (
                ErrorCode::E0002,
                format!("Illegal character U+{:04X} in source", u32::from(c)),
            ),
            GuardIssueKind::TooManyLiterals => (
                ErrorCode::E0007,
                "Too many string literals in one file".to_string(),
            ),
        };
        CompileError::new(code, line, message)
    })?;
    let (text, strings) = buffer.into_parts();
    tracing::debug!(literals = strings.len(), "strings guarded");
    ctx.begin_unit(strings);

    let text = strip_block_comments(&text);
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            let code = line.find("//").map_or(line, |at| &line[..at]);
            code.trim_end_matches(' ').replace('…', "...")
        })
        .collect();

    pull_up_because(&mut lines);

    for line in &mut lines {
        if line.contains('<') || line.contains('>') || line.contains(" in ") {
            *line = line
                .replace("<=", "≤")
                .replace(">=", "≥")
                .replace(" in ", " ∊ ");
        }
    }
    Ok(lines)
}

/// Tabs, look-alike bars and the large element-of sign.
fn normalize(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for c in source.chars() {
        match c {
            '\t' => out.push_str("    "),
            '∈' => out.push('∊'),
            c if CONFUSABLE_BARS.contains(&c) => out.push('‖'),
            c => out.push(c),
        }
    }
    out
}

/// Removes `/* ... */`, keeping the newlines inside.
///
/// An unterminated comment is left in place.
fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("/*") {
        let Some(len) = rest[open + 2..].find("*/") else {
            break;
        };
        out.push_str(&rest[..open]);
        let body = &rest[open + 2..open + 2 + len];
        out.extend(body.chars().filter(|&c| c == '\n'));
        rest = &rest[open + 2 + len + 2..];
    }
    out.push_str(rest);
    out
}

/// Moves a `because "reason"` that opens a line onto the previous
/// non-blank line when that line ends with `)`.
fn pull_up_because(lines: &mut [String]) {
    for i in 0..lines.len() {
        if !lines[i].ends_with(')') {
            continue;
        }
        let mut k = i + 1;
        while k < lines.len() && lines[k].trim().is_empty() {
            k += 1;
        }
        let Some(line) = lines.get(k) else {
            continue;
        };
        let indent = line.len() - line.trim_start().len();
        let Some(after) = line[indent..].strip_prefix("because") else {
            continue;
        };
        let spaced = after.trim_start_matches(' ');
        if spaced.len() == after.len() {
            continue;
        }
        let Some(reason_len) = quoted_placeholder_len(spaced) else {
            continue;
        };
        let reason = spaced[..reason_len].to_string();
        let remainder = format!("{}{}", &line[..indent], &spaced[reason_len..]);
        lines[i].push_str(" because ");
        lines[i].push_str(&reason);
        lines[k] = remainder;
    }
}

/// Length of a guarded literal `"P"` at the start of `s`.
fn quoted_placeholder_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, open) = chars.next()?;
    let (_, body) = chars.next()?;
    let (at, close) = chars.next()?;
    (open == '"' && close == '"' && body != '"' && body != '\n').then_some(at + 1)
}
