//! Elision expansion.
//!
//! A line starting with `&` continues the previous line as a nested block:
//!
//! ```text
//! for x ∊ xs           for x ∊ xs:
//! & if x > 0:    ==>       if x > 0:
//!     draw(x)                  draw(x)
//! ```
//!
//! Lines are scanned bottom up.

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::scan::indent_of;


const INDENT: &str = "    ";

#[tracing::instrument(level = "debug", skip_all)]
pub fn expand_elisions(lines: &mut [String]) -> Result<(), CompileError> {
    let mut expanded = 0usize;
    for i in (0..lines.len()).rev() {
        let indent = indent_of(&lines[i]);
        let Some(marked) = lines[i][indent..].strip_prefix('&') else {
            continue;
        };
        let body = marked.trim_start_matches(' ').to_string();
        if body.starts_with("else") {
            return Err(error(i, "Cannot elide else blocks using &"));
        }

        let Some(parent) = (0..i).rev().find(|&j| !lines[j].is_empty()) else {
            return Err(error(i, "Elided block using & with no previous block"));
        };
        if lines[parent].ends_with(':') {
            return Err(error(
                parent,
                "Elided block using & to a block that already ends in :",
            ));
        }
        lines[parent].push(':');
        if indent_of(&lines[parent]) != indent {
            return Err(error(i, "Elided block must be at same indentation as parent"));
        }

        lines[i] = format!("{INDENT}{}{body}", " ".repeat(indent));

        // Shift the elided line's own block one level deeper.
        for line in &mut lines[i + 1..] {
            if line.is_empty() {
                continue;
            }
            if indent_of(line) <= indent {
                break;
            }
            line.insert_str(0, INDENT);
        }
        expanded += 1;
    }
    tracing::debug!(expanded, "elisions expanded");
    Ok(())
}

fn error(line: usize, message: &str) -> CompileError {
    CompileError::new(ErrorCode::E1008, line, message)
}
