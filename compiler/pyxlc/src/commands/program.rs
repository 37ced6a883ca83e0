//! The `program` command: scripts and modes into one JavaScript program.

use pyxl_compiler::{compile_program, ModeSource, ProgramSource, ScalarExpander};
use rustc_hash::FxHashMap;

use super::{read_file, report_error, CliOptions};

/// Files and start mode named on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramArgs {
    pub start: String,
    pub scripts: Vec<String>,
    pub modes: Vec<ModeSource>,
    pub y_up: bool,
}

impl ProgramArgs {
    /// Parses `--start=`, `--script=`, `--mode=Name=file` and `--y-up`.
    pub fn parse(args: &[String]) -> Result<ProgramArgs, String> {
        let mut program = ProgramArgs::default();
        for arg in args {
            if let Some(start) = arg.strip_prefix("--start=") {
                program.start = start.to_string();
            } else if let Some(script) = arg.strip_prefix("--script=") {
                program.scripts.push(script.to_string());
            } else if let Some(mode) = arg.strip_prefix("--mode=") {
                let Some((name, url)) = mode.split_once('=') else {
                    return Err(format!("expected --mode=<Name>=<file>, got '{arg}'"));
                };
                if name.is_empty() || url.is_empty() {
                    return Err(format!("expected --mode=<Name>=<file>, got '{arg}'"));
                }
                program.modes.push(ModeSource::new(name, url));
            } else if arg == "--y-up" {
                program.y_up = true;
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }
        if program.start.is_empty() {
            return Err("missing --start=<Mode>".to_string());
        }
        if !program.modes.iter().any(|mode| mode.name == program.start) {
            return Err(format!("start mode '{}' is not among the modes", program.start));
        }
        Ok(program)
    }
}

/// Compiles every named file into one program printed on stdout.
pub fn compile_program_files(args: &ProgramArgs, options: &CliOptions) {
    let mut files = FxHashMap::default();
    let urls = args.scripts.iter().chain(args.modes.iter().map(|mode| &mode.url));
    for url in urls {
        files.entry(url.clone()).or_insert_with(|| read_file(url));
    }

    let program = ProgramSource {
        scripts: args.scripts.clone(),
        modes: args.modes.clone(),
        start_mode: args.start.clone(),
        base_url: String::new(),
        y_up: args.y_up,
    };
    match compile_program(&program, &files, options.compile, &ScalarExpander) {
        Ok(js) => println!("{js}"),
        Err(failure) => {
            let source = files.get(&failure.url).map(String::as_str);
            report_error(&failure.error, &failure.url, source, options);
            std::process::exit(1);
        }
    }
}
