//! Whitespace and empty-statement cleanup of the generated code.
//!
//! Leading indentation is kept and trailing spaces are dropped. Runs
//! before string restoration, so string contents are never touched.


pub(super) fn tidy(src: &str) -> String {
    let src = space_after_commas(src);
    let src = collapse_empty_statements(&src);
    let src = collapse_spaces(&src);
    src.split('\n')
        .map(|line| line.trim_end_matches(' '))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `a ,  b` → `a, b`.
fn space_after_commas(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(comma) = rest.find(',') {
        out.push_str(&rest[..comma]);
        out.truncate(out.trim_end_matches(' ').len());
        out.push(',');
        let after = &rest[comma + 1..];
        let spaced = after.trim_start_matches(' ');
        if spaced.len() < after.len() {
            out.push(' ');
        }
        rest = spaced;
    }
    out.push_str(rest);
    out
}

/// `; ;` and `;;` → `;`, until none remain.
fn collapse_empty_statements(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(semi) = rest.find(';') {
        out.push_str(&rest[..semi + 1]);
        rest = &rest[semi + 1..];
        while let Some(next) = rest.trim_start_matches(' ').strip_prefix(';') {
            rest = next;
        }
    }
    out.push_str(rest);
    out
}

/// Runs of spaces after a non-space character become one space.
fn collapse_spaces(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut collapsing = false;
    for c in src.chars() {
        if c != ' ' {
            collapsing = false;
        } else if collapsing {
            continue;
        } else if out.chars().next_back().is_some_and(|p| !p.is_whitespace()) {
            collapsing = true;
        }
        out.push(c);
    }
    out
}
