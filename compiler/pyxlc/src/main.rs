//! PyxlScript Compiler CLI

use pyxlc::commands::{
    compile_file, compile_program_files, explain_error, list_sections, CliOptions, ProgramArgs,
};

fn main() {
    pyxlc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "compile" => {
            let (options, rest) = parse_options_or_exit(&args[2..]);
            let [path] = rest.as_slice() else {
                eprintln!("Usage: pyxlc compile <file.pyxl> [options]");
                std::process::exit(1);
            };
            compile_file(path, &options);
        }
        "sections" => {
            let (options, rest) = parse_options_or_exit(&args[2..]);
            let [path] = rest.as_slice() else {
                eprintln!("Usage: pyxlc sections <mode.pyxl> [--internal]");
                std::process::exit(1);
            };
            list_sections(path, &options);
        }
        "program" => {
            let (options, rest) = parse_options_or_exit(&args[2..]);
            let program = match ProgramArgs::parse(&rest) {
                Ok(program) => program,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!(
                        "Usage: pyxlc program --start=<Mode> [--script=<file>]... [--mode=<Name>=<file>]... [--y-up]"
                    );
                    std::process::exit(1);
                }
            };
            compile_program_files(&program, &options);
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: pyxlc explain <ERROR_CODE>");
                eprintln!("Example: pyxlc explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("PyxlScript Compiler {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pyxl"))
            {
                let (options, _) = parse_options_or_exit(&args[2..]);
                compile_file(command, &options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn parse_options_or_exit(args: &[String]) -> (CliOptions, Vec<String>) {
    match CliOptions::parse(args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("PyxlScript Compiler");
    println!();
    println!("Usage: pyxlc <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <file.pyxl>   Compile one script to JavaScript");
    println!("  sections <mode.pyxl>  List the sections of a mode file");
    println!("  program [files]       Compile scripts and modes into one program");
    println!("  explain <code>        Explain an error code (e.g., E2001)");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Options:");
    println!("  --internal            Allow reserved `$` names and system modes");
    println!("  --legacy-spread       Hide object spread from the operator expander");
    println!("  --format=<fmt>        Error format: text (default), json");
    println!("  --color=<when>        Colors: auto (default), always, never");
    println!();
    println!("Program options:");
    println!("  --start=<Mode>        Mode the game starts in");
    println!("  --script=<file>       Global script (repeatable, compiled in order)");
    println!("  --mode=<Name>=<file>  Mode and its file (repeatable)");
    println!("  --y-up                Flip the y axis");
    println!();
    println!("Logging is controlled by RUST_LOG, e.g. RUST_LOG=pyxl_compiler=debug.");
    println!();
    println!("Examples:");
    println!("  pyxlc compile util.pyxl");
    println!("  pyxlc sections Play.pyxl");
    println!("  pyxlc program --start=Play --script=util.pyxl --mode=Play=Play.pyxl");
    println!("  pyxlc explain E1004");
}
