//! Command handlers for the PyxlScript compiler CLI.
//!
//! Shared option parsing, file reading and error reporting live here in
//! the module root.

mod compile;
mod explain;
mod program;
mod sections;

pub use compile::compile_file;
pub use explain::explain_error;
pub use program::{compile_program_files, ProgramArgs};
pub use sections::list_sections;

use std::io::IsTerminal;

use pyxl_compiler::CompileOptions;
use pyxl_diagnostic::emitter::{
    ColorMode, DiagnosticEmitter, JsonEmitter, SourceContext, TerminalEmitter,
};
use pyxl_diagnostic::CompileError;


#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Flags shared by every command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub compile: CompileOptions,
    pub format: OutputFormat,
    pub color: ColorMode,
}

impl CliOptions {
    /// Splits `args` into the shared flags and everything else.
    pub fn parse(args: &[String]) -> Result<(CliOptions, Vec<String>), String> {
        let mut options = CliOptions::default();
        let mut rest = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--internal" => options.compile = options.compile.internal(true),
                "--legacy-spread" => options.compile = options.compile.object_spread(false),
                "--format=text" => options.format = OutputFormat::Text,
                "--format=json" => options.format = OutputFormat::Json,
                _ => {
                    if let Some(format) = arg.strip_prefix("--format=") {
                        return Err(format!("unknown format '{format}' (expected text or json)"));
                    }
                    if let Some(color) = arg.strip_prefix("--color=") {
                        options.color = color.parse()?;
                    } else {
                        rest.push(arg.clone());
                    }
                }
            }
        }
        Ok((options, rest))
    }
}

pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content.replace("\r\n", "\n"),
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Prints `error` against `source` in the requested format.
pub(super) fn report_error(
    error: &CompileError,
    path: &str,
    source: Option<&str>,
    options: &CliOptions,
) {
    let context = source.map(|source| SourceContext::new(path, source));
    match options.format {
        OutputFormat::Text => {
            let is_tty = std::io::stderr().is_terminal();
            let mut emitter =
                TerminalEmitter::with_color_mode(std::io::stderr(), options.color, is_tty);
            emitter.emit(error, context);
            emitter.emit_summary(1);
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(std::io::stdout());
            emitter.begin();
            emitter.emit(error, context);
            emitter.end();
            emitter.flush();
        }
    }
}
