//! Object spread shim for expanders that cannot parse `{...a}`.
//!
//! An ellipsis whose innermost open bracket on its line is `{` is written
//! as the property `'⏓':` for the duration of the expander run.

#[cfg(test)]
mod tests;

const SHIM: &str = "'⏓':";

pub(super) fn hide_object_spread(src: &str) -> String {
    if !src.contains("...") {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len() + 8);
    let mut copied = 0;
    let mut from = 0;
    while let Some(offset) = src[from..].find("...") {
        let at = from + offset;
        from = at + 3;
        let line_start = src[..at].rfind('\n').map_or(0, |n| n + 1);
        if inside_object(&src[line_start..at]) {
            out.push_str(&src[copied..at]);
            out.push_str(SHIM);
            copied = at + 3;
        }
    }
    out.push_str(&src[copied..]);
    out
}

pub(super) fn restore_object_spread(src: &str) -> String {
    src.replace(SHIM, "...")
}

/// `true` when the innermost unclosed bracket of `prefix` is `{`.
fn inside_object(prefix: &str) -> bool {
    let mut closers = Vec::new();
    for c in prefix.chars().rev() {
        match c {
            '{' if closers.is_empty() => return true,
            ')' | ']' | '}' => closers.push(c),
            '(' | '[' | '{' => {
                let expected = match c {
                    '(' => ')',
                    '[' => ']',
                    _ => '}',
                };
                if closers.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }
    false
}
