//! Program assembly.
//!
//! Compiles the global scripts and every mode of a game into one
//! JavaScript function body. Each compiled unit is preceded by a line
//! directive, `/*ට"url":offset*/`, from which runtime code (and
//! `SOURCE_LOCATION`) recovers the original file and line.

use pyxl_diagnostic::{CompileError, ErrorCode, ProgramError};
use pyxl_lexer_core::scan::replace_words;
use rustc_hash::FxHashMap;

use crate::context::{CompileContext, CompileOptions};
use crate::expand::OperatorExpander;
use crate::sections::{is_privileged_mode, split_sections, Section, SectionKind};
use crate::unit::compile_unit;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

const FILE_SEPARATOR: &str =
    "\n\n////////////////////////////////////////////////////////////////////////////////////\n\n";
const SECTION_SEPARATOR: &str =
    "//--------------------------------------------------------------------------------";

/// Globals shadowed so that game code can neither read nor clobber them.
const SHADOWED_GLOBALS: &str = "const $Object = {}.constructor; let navigator, parent, Object, \
    Array, String, Number, location, document, window, print, Math, RegExp, Date, console, \
    localStorage, performance;";

const DIRECTIVE_OPEN: &str = "/*ට";

/// A mode of the game and the file it lives in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeSource {
    pub name: String,
    pub url: String,
}

impl ModeSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        ModeSource {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Everything [`compile_program`] needs besides file contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramSource {
    /// Global scripts, compiled in order before any mode.
    pub scripts: Vec<String>,
    pub modes: Vec<ModeSource>,
    pub start_mode: String,
    /// Prefix stripped from URLs to form `SOURCE_LOCATION.filename`.
    pub base_url: String,
    /// Flip the y axis before any game code runs.
    pub y_up: bool,
}

/// File and line named by a line directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDirective {
    pub url: String,
    pub line: usize,
}

/// Scripts directly inside `console/os/` are part of the system.
fn is_os_script(url: &str) -> bool {
    url.rsplit_once("console/os/")
        .is_some_and(|(_, file)| !file.contains('/') && file.ends_with(".pyxl"))
}

fn directive(url: &str, offset: Option<usize>) -> String {
    match offset {
        Some(offset) => format!("{DIRECTIVE_OPEN}\"{url}\":{offset}*/"),
        None => format!("{DIRECTIVE_OPEN}\"{url}\"*/"),
    }
}

/// Reads a line directive anywhere on `line`.
pub fn parse_line_directive(line: &str) -> Option<LineDirective> {
    let start = line.find(DIRECTIVE_OPEN)? + DIRECTIVE_OPEN.len();
    let end = start + line[start..].find("*/")?;
    let inner = line[start..end].strip_prefix('"').unwrap_or(&line[start..end]);
    let (url, line) = match inner.rsplit_once(':') {
        Some((url, number)) if url.ends_with('"') => (url, number.trim().parse().ok()?),
        _ => (inner, 0),
    };
    Some(LineDirective {
        url: url.strip_suffix('"').unwrap_or(url).to_string(),
        line,
    })
}

/// Compiles one global script.
///
/// Scripts run once at program scope, so they get no `$frame` wrapper;
/// only mode sections are wrapped.
#[tracing::instrument(level = "debug", skip_all, fields(url = %url))]
pub fn compile_script(
    url: &str,
    source: &str,
    ctx: &mut CompileContext,
    expander: &dyn OperatorExpander,
) -> Result<String, ProgramError> {
    let base = ctx.options();
    ctx.set_options(base.internal(base.internal_mode || is_os_script(url)));
    let compiled = compile_unit(source, ctx, expander);
    ctx.set_options(base);
    let js = compiled.map_err(|error| ProgramError::new(url, error))?;
    Ok(format!("{}\n{js}", directive(url, None)))
}

/// Compiles a mode file into an expression statement defining the mode
/// object.
///
/// `ctx.options().internal_mode` marks a system build, in which every
/// mode may refer to privileged modes.
#[tracing::instrument(level = "debug", skip_all, fields(mode = %mode.name))]
pub fn compile_mode(
    mode: &ModeSource,
    source: &str,
    ctx: &mut CompileContext,
    expander: &dyn OperatorExpander,
) -> Result<String, ProgramError> {
    let base = ctx.options();
    let privileged = base.internal_mode || is_privileged_mode(&mode.name);
    let sections = split_sections(source, privileged)
        .map_err(|error| ProgramError::new(&mode.url, error))?;

    ctx.set_options(base.internal(privileged));
    let compiled = compile_sections(&mode.url, &sections, ctx, expander);
    ctx.set_options(base);
    let compiled = compiled.map_err(|error| ProgramError::new(&mode.url, error))?;

    Ok(wrap_mode(&mode.name, &sections, &compiled))
}

/// Compiled text per section, empty for blank sections.
fn compile_sections(
    url: &str,
    sections: &[Section],
    ctx: &mut CompileContext,
    expander: &dyn OperatorExpander,
) -> Result<Vec<String>, CompileError> {
    sections
        .iter()
        .map(|section| {
            if section.is_blank() {
                return Ok(String::new());
            }
            let js = compile_unit(&section.source, ctx, expander)
                .map_err(|error| error.shifted(section.offset))?;
            Ok(format!("{}\n{js}", directive(url, Some(section.offset))))
        })
        .collect()
}

fn wrap_mode(name: &str, sections: &[Section], compiled: &[String]) -> String {
    let code = |kind: &SectionKind| {
        sections
            .iter()
            .position(|s| &s.kind == kind)
            .map_or("", |i| compiled[i].as_str())
    };
    let enter_params = sections
        .iter()
        .find(|s| s.kind == SectionKind::Enter)
        .map_or("()", Section::params);

    let mut pop_mode_functions = String::new();
    let mut pop_mode_bindings = String::new();
    for (section, js) in sections.iter().zip(compiled) {
        let SectionKind::PopModeFrom(from) = &section.kind else {
            continue;
        };
        if js.is_empty() {
            continue;
        }
        let kind = &section.kind;
        pop_mode_bindings.push_str(&format!(", ${kind}:${kind}"));
        pop_mode_functions.push_str(&format!(
            "\n\n// pop_mode from {from}\n{SECTION_SEPARATOR}\nfunction ${kind}{} {{\n{js}\n}}\n\n",
            section.params()
        ));
    }

    let init = code(&SectionKind::Init);
    let enter = code(&SectionKind::Enter);
    let leave = code(&SectionKind::Leave);
    let frame = code(&SectionKind::Frame);
    format!(
        "// {name}.pyxl
//========================================================================
const {name} = (function() {{

// init
{SECTION_SEPARATOR}
{init}

// enter
{SECTION_SEPARATOR}
function $enter{enter_params} {{
{enter}
}}

// leave
{SECTION_SEPARATOR}
function $leave() {{
{leave}
}}
{pop_mode_functions}

// system menu
{SECTION_SEPARATOR}
function $pop_modeFrom$SystemMenu(callback) {{
   if (callback) {{ callback(); }}
}}

// frame
{SECTION_SEPARATOR}
const $frame = (function quadplay_main_loop() {{
try {{
if (($gameMode.$name[0] !== '$') && (gamepad_array[0].$pp || gamepad_array[1].$pp || gamepad_array[2].$pp || gamepad_array[3].$pp)) {{ push_mode($SystemMenu); }}
$processFrameHooks();
{frame}
$show(); }} catch (ex) {{ if (! ex.nextMode) throw ex; else {{ $resetTouchInput(); $updateInput(); }}}}
}});

return $Object.freeze({{$type:'mode', $enter:$enter, $frame:$frame, $pop_modeFrom$SystemMenu:$pop_modeFrom$SystemMenu {pop_mode_bindings}, $leave:$leave, $name:'{name}'}});
}})();

"
    )
}

/// Compiles a whole game.
///
/// `files` maps every script and mode URL to its source text.
#[tracing::instrument(level = "debug", skip_all, fields(scripts = program.scripts.len(), modes = program.modes.len()))]
pub fn compile_program(
    program: &ProgramSource,
    files: &FxHashMap<String, String>,
    options: CompileOptions,
    expander: &dyn OperatorExpander,
) -> Result<String, ProgramError> {
    let source_of = |url: &str| {
        files.get(url).ok_or_else(|| {
            ProgramError::new(
                url,
                CompileError::new(ErrorCode::E4007, 0, format!("No source provided for \"{url}\"")),
            )
        })
    };

    let mut ctx = CompileContext::new(options);
    let mut out = format!("'use strict';\n{SHADOWED_GLOBALS}\n");
    if program.y_up {
        out.push_str("set_transform(xy(0, SCREEN_SIZE.y), xy(1, -1), 0, 1);\n;");
    }
    out.push_str(FILE_SEPARATOR);

    for url in &program.scripts {
        out.push_str(&compile_script(url, source_of(url)?, &mut ctx, expander)?);
        out.push_str(FILE_SEPARATOR);
    }
    for mode in &program.modes {
        // Files given without a final newline still end their last section.
        let source = format!("{}\n", source_of(&mode.url)?);
        out.push_str(&compile_mode(mode, &source, &mut ctx, expander)?);
    }

    out.push_str(&format!(
        "
function $start_program() {{
    mode_frames = game_frames = 0;
    try {{
        set_mode({});
    }} catch (e) {{
        if (! e.nextMode) {{ throw e; }}
    }}
}}

// Main loop
return function () {{
    $gameMode.$frame();
}};
",
        program.start_mode
    ));

    if out.contains("SOURCE_LOCATION") {
        out = resolve_source_locations(&out, &program.base_url);
    }
    tracing::debug!(bytes = out.len(), "program assembled");
    Ok(out)
}

/// Replaces `SOURCE_LOCATION` outside string literals with the file and
/// line it appears on, tracked through the line directives.
pub fn resolve_source_locations(program: &str, base_url: &str) -> String {
    let mut url = String::new();
    let mut line_number = 0usize;
    let lines: Vec<String> = program
        .split('\n')
        .map(|line| {
            match parse_line_directive(line) {
                Some(directive) => {
                    url = directive.url;
                    line_number = directive.line;
                }
                None => line_number += 1,
            }
            if !line.contains("SOURCE_LOCATION") {
                return line.to_string();
            }
            let filename = url.strip_prefix(base_url).unwrap_or(&url);
            let location = format!(
                "($Object.freeze({{url: \"{url}\", filename: \"{filename}\", line_number: {line_number}}}))"
            );
            outside_strings(line, |code| replace_words(code, "SOURCE_LOCATION", &location))
        })
        .collect();
    lines.join("\n")
}

/// Applies `rewrite` to the parts of `line` outside double-quoted strings.
fn outside_strings(line: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(line.len() + 64);
    let mut code_start = 0;
    let mut chars = line.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '"' {
            continue;
        }
        out.push_str(&rewrite(&line[code_start..i]));
        let mut end = line.len();
        while let Some((j, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => {
                    end = j + 1;
                    break;
                }
                _ => {}
            }
        }
        out.push_str(&line[i..end]);
        code_start = end;
    }
    out.push_str(&rewrite(&line[code_start..]));
    out
}
