//! Shared helpers for the pipeline tests.

use pyxl_compiler::{compile_source, CompileError, CompileOptions};

/// Compiles `source` with default options.
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_source(source, CompileOptions::default())
}

/// Compiles `source`, panicking with the error on failure.
pub fn compile_ok(source: &str) -> String {
    match compile(source) {
        Ok(js) => js,
        Err(error) => panic!("expected {source:?} to compile, got {error}"),
    }
}

/// The generated line for zero-based source line `line`.
pub fn output_line(js: &str, line: usize) -> &str {
    js.split('\n').nth(line).unwrap_or_default()
}
