//! Terminal Emitter
//!
//! Human-readable error output with optional ANSI color support.

use std::io::{self, Write};

use crate::CompileError;

use super::{DiagnosticEmitter, SourceContext};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!("unknown color mode '{other}' (expected auto, always or never)")),
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, error: &CompileError, context: Option<SourceContext<'_>>) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_colored(&format!("[{}]", error.code.as_str()), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", error.message);

        let line_no = error.line + 1;
        let Some(context) = context else {
            let _ = writeln!(self.writer, "  --> line {line_no}");
            return;
        };
        let _ = writeln!(self.writer, "  --> {}:{line_no}", context.path);

        if let Some(text) = context.line_text(error.line) {
            let width = line_no.to_string().len();
            let gutter = format!("{:width$} |", "");
            self.write_colored(&gutter, colors::GUTTER);
            let _ = writeln!(self.writer);
            self.write_colored(&format!("{line_no:>width$} |"), colors::GUTTER);
            let _ = writeln!(self.writer, " {text}");
            self.write_colored(&gutter, colors::GUTTER);
            let _ = writeln!(self.writer);
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        let _ = writeln!(
            self.writer,
            ": could not compile due to {error_count} previous error{}",
            plural_s(error_count)
        );
    }
}
