//! The `compile` command: one script to JavaScript on stdout.

use pyxl_compiler::compile_source;

use super::{read_file, report_error, CliOptions};

/// Compiles the script at `path`, exiting with status 1 on error.
#[tracing::instrument(level = "debug", skip(options))]
pub fn compile_file(path: &str, options: &CliOptions) {
    let source = read_file(path);
    match compile_source(&source, options.compile) {
        Ok(js) => println!("{js}"),
        Err(error) => {
            report_error(&error, path, Some(&source), options);
            std::process::exit(1);
        }
    }
}
