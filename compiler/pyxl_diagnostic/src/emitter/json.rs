//! JSON Emitter
//!
//! Machine-readable error output. Lines are one-based.

use std::io::Write;

use crate::CompileError;

use super::{escape_json, DiagnosticEmitter, SourceContext};

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, error: &CompileError, context: Option<SourceContext<'_>>) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        // Built by hand; the shape is small and fixed.
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"code\": \"{}\",", error.code.as_str());
        if let Some(context) = context {
            let _ = writeln!(
                self.writer,
                "    \"file\": \"{}\",",
                escape_json(context.path)
            );
        }
        let _ = writeln!(self.writer, "    \"line\": {},", error.line + 1);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\"",
            escape_json(&error.message)
        );
        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize) {
        // The array length is the summary.
    }
}
