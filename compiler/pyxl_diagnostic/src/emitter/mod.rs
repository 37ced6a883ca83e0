//! Diagnostic Emitters
//!
//! Output formats for compile errors:
//! - Terminal: colored, human-readable output with the offending source line
//! - JSON: machine-readable output for editors and build tooling

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::CompileError;

#[cfg(test)]
mod tests;

/// The file an error belongs to, when known.
#[derive(Copy, Clone, Debug)]
pub struct SourceContext<'a> {
    pub path: &'a str,
    pub source: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(path: &'a str, source: &'a str) -> Self {
        SourceContext { path, source }
    }

    /// The text of zero-based `line`, if the file has that many lines.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        self.source.lines().nth(line)
    }
}

/// Trait for emitting compile errors in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single error.
    fn emit(&mut self, error: &CompileError, context: Option<SourceContext<'_>>);

    /// Emit multiple errors against the same file.
    fn emit_all(&mut self, errors: &[CompileError], context: Option<SourceContext<'_>>) {
        for error in errors {
            self.emit(error, context);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary line.
    fn emit_summary(&mut self, error_count: usize);
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
