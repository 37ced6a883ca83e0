//! The `sections` command: show how a mode file splits into sections.

use pyxl_compiler::{is_privileged_mode, split_sections, Section};

use super::{read_file, report_error, CliOptions};

/// Lists the sections of the mode file at `path`.
///
/// The mode name is the file stem, which decides whether system modes may
/// be named in `pop_mode from` headers.
pub fn list_sections(path: &str, options: &CliOptions) {
    let source = read_file(path);
    let name = std::path::Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let privileged = options.compile.internal_mode || is_privileged_mode(name);
    match split_sections(&source, privileged) {
        Ok(sections) => {
            for section in &sections {
                println!("{}", describe(section));
            }
        }
        Err(error) => {
            report_error(&error, path, Some(&source), options);
            std::process::exit(1);
        }
    }
}

/// `kind(params)  line N` with a `(blank)` marker for empty sections.
pub(super) fn describe(section: &Section) -> String {
    let blank = if section.is_blank() { "  (blank)" } else { "" };
    format!(
        "{}{}  line {}{blank}",
        section.kind,
        section.params(),
        section.offset + 1
    )
}
