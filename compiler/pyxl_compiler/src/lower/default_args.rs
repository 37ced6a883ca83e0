//! `def f(a, b default 2)` → `function(a, b = 2)`.
//!
//! Only the `default` directly after each argument name is converted.
//! Bracketed groups are copied whole, so a default value may contain calls,
//! literals or its own `default` operators.

use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::scan::{boundary_after, contains_word};
use pyxl_lexer_core::{find_matching, next_instance};

use super::unbalanced;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

const KEYWORD: &str = "default ";

pub fn rewrite_default_args(args: &str) -> Result<String, Problem> {
    if !contains_word(args, "default") {
        return Ok(args.to_string());
    }
    check_names(args)?;

    let mut out = String::with_capacity(args.len());
    let mut rest = args;
    let mut first = true;
    loop {
        let Some(i) = next_stop(rest, first) else {
            break;
        };
        first = false;
        let bytes_rest = rest.as_bytes();
        match bytes_rest[i] {
            b',' | b' ' => {
                let mut i = i;
                if bytes_rest[i] == b',' {
                    i += 1;
                    while i < rest.len() && bytes_rest[i] == b' ' {
                        i += 1;
                    }
                    // Skip the argument name.
                    i += 1;
                    while i < rest.len() && !matches!(bytes_rest[i], b' ' | b',' | b')') {
                        i += 1;
                    }
                    i = i.min(rest.len());
                }
                while i < rest.len() && bytes_rest[i] == b' ' {
                    i += 1;
                }
                let (head, tail) = split_at_boundary(rest, i);
                out.push_str(head);
                rest = tail;
                if let Some(value) = rest.strip_prefix(KEYWORD) {
                    out.push_str("= ");
                    rest = value;
                }
            }
            _ => {
                let Some(close) = find_matching(rest, i) else {
                    break;
                };
                out.push_str(&rest[..close]);
                rest = &rest[close..];
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Next comma or opening bracket; on the first pass also ` default `.
fn next_stop(src: &str, first: bool) -> Option<usize> {
    let structural = src.find([',', '(', '[', '{']);
    if !first {
        return structural;
    }
    let keyword = src.find(" default ");
    match (structural, keyword) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Splits at `i`, moved forward to the next char boundary.
fn split_at_boundary(src: &str, mut i: usize) -> (&str, &str) {
    while !src.is_char_boundary(i) {
        i += 1;
    }
    src.split_at(i)
}

/// Every `default` must follow an argument name.
fn check_names(args: &str) -> Result<(), Problem> {
    let mut start = 0;
    loop {
        let end = next_instance(args, &[','], start)
            .map_err(|err| unbalanced(err, ","))?
            .unwrap_or(args.len());
        let piece = args[start..end].trim_start();
        if piece.starts_with("default") && boundary_after(piece, "default".len()) {
            return Err(Problem::new(
                ErrorCode::E2005,
                "Missing argument name before \"default\"",
            ));
        }
        if end == args.len() {
            return Ok(());
        }
        start = end + 1;
    }
}
