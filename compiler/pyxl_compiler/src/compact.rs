//! Line reconstruction.
//!
//! Multi-line bracketed expressions and trailing-comma continuations are
//! merged onto the line where they start. Merged lines are left empty, so
//! the line array keeps its length and indices keep naming original lines.

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::scan::bracket_balance;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

const CLOSERS: [char; 3] = [')', ']', '}'];

/// Merges continuation lines. The result has the same length as `lines`.
#[tracing::instrument(level = "debug", skip_all, fields(lines = lines.len()))]
pub fn compact(mut lines: Vec<String>) -> Result<Vec<String>, CompileError> {
    let n = lines.len();
    let mut count = [0i32; 3];
    let mut merged = 0usize;
    let mut i = 0;

    while i < n {
        let mut start: Option<usize> = None;
        loop {
            let delta = bracket_balance(&lines[i]);
            let mut open = false;
            for kind in 0..3 {
                count[kind] += delta[kind];
                if count[kind] < 0 {
                    return Err(CompileError::new(
                        ErrorCode::E1001,
                        i,
                        format!("Extra \"{}\", no expression to close", CLOSERS[kind]),
                    ));
                }
                if count[kind] > 0 {
                    start.get_or_insert(i);
                    open = true;
                }
            }

            let continues = open && start != Some(i);
            let ends = !open && start.is_some();
            if ends && lines[i].contains(';') {
                return Err(CompileError::new(
                    ErrorCode::E1003,
                    i,
                    "\";\" not allowed on lines ending multi-line expressions.",
                ));
            }

            if let Some(start) = start.filter(|_| continues || ends) {
                let moved = lines[i].trim().to_string();
                lines[start].push(' ');
                lines[start].push_str(&moved);
                lines[i].clear();
                merged += 1;
            }

            if open && i + 1 == n {
                return Err(CompileError::new(
                    ErrorCode::E1002,
                    start.unwrap_or(i),
                    "Expression not closed before the end of the file.",
                ));
            }

            i += 1;
            if !open {
                break;
            }
        }
    }

    // Trailing commas, bottom up so chains collapse onto their first line.
    for i in (1..n).rev() {
        let prev = lines[i - 1].trim_end();
        if prev.ends_with(',') {
            let joined = format!("{prev} {}", lines[i].trim_start());
            lines[i - 1] = joined;
            lines[i].clear();
            merged += 1;
        }
    }

    tracing::debug!(merged, "lines compacted");
    Ok(lines)
}
