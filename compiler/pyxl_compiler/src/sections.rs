//! Section splitter for mode files.
//!
//! A mode file is divided into lifecycle sections by a header line naming
//! the section, directly followed by a separator of at least five rule
//! glyphs:
//!
//! ```text
//! Play
//! ════════════════
//! let score = 0
//!
//! enter(from_level)
//! ────────────────
//! score = 0
//!
//! pop_mode from Pause
//! ────────────────
//! resume_music()
//! ```
//!
//! A double-line separator always introduces the mode's top-level (`init`)
//! code, whatever the header says. A file with no headers is one `frame`
//! section.

use std::fmt;

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::chars::{identifier_len, is_identifier_char};
use pyxl_lexer_core::scan::boundary_after;
use rustc_hash::FxHashSet;


/// Glyphs of a double-line separator.
pub const DOUBLE_SEPARATORS: &str = "=═⚌";
/// Glyphs of a single-line separator.
pub const SINGLE_SEPARATORS: &str = "-─—━⎯";

const MIN_SEPARATOR_LEN: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Init,
    Enter,
    Frame,
    Leave,
    /// Runs when the named mode pops back to this one.
    PopModeFrom(String),
}

impl SectionKind {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "init" => SectionKind::Init,
            "enter" => SectionKind::Enter,
            "frame" => SectionKind::Frame,
            "leave" => SectionKind::Leave,
            _ => return None,
        })
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Init => f.write_str("init"),
            SectionKind::Enter => f.write_str("enter"),
            SectionKind::Frame => f.write_str("frame"),
            SectionKind::Leave => f.write_str("leave"),
            SectionKind::PopModeFrom(mode) => write!(f, "pop_modeFrom{mode}"),
        }
    }
}

/// One section of a mode file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    /// Declared parameter list, parentheses included.
    pub args: Option<String>,
    pub source: String,
    /// Zero-based file line of the first body line.
    pub offset: usize,
}

impl Section {
    /// Parameter list for the generated function.
    pub fn params(&self) -> &str {
        self.args.as_deref().unwrap_or("()")
    }

    /// Blank sections generate no code.
    pub fn is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Whether a name is reserved for system modes.
pub fn is_privileged_mode(name: &str) -> bool {
    name.starts_with(['_', '$'])
}

/// A recognized header line.
#[derive(Debug)]
struct Header<'a> {
    name: &'a str,
    args: Option<&'a str>,
    from: Option<&'a str>,
}

/// Splits a mode file into its sections, in file order.
///
/// `privileged` allows `pop_mode from` sections to name system modes.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn split_sections(source: &str, privileged: bool) -> Result<Vec<Section>, CompileError> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut headers: Vec<(usize, Header<'_>, bool)> = Vec::new();
    let mut i = 0;
    while i + 1 < lines.len() {
        let found = separator_kind(lines[i + 1]).zip(parse_header(lines[i]));
        let Some((double, header)) = found else {
            i += 1;
            continue;
        };
        if is_header_at(&lines, i + 2) {
            return Err(CompileError::new(
                ErrorCode::E4005,
                i + 2,
                "There must be at least one line between sections.",
            ));
        }
        headers.push((i, header, double));
        i += 2;
    }

    let Some(&(first, _, _)) = headers.first() else {
        return Ok(vec![Section {
            kind: SectionKind::Frame,
            args: None,
            source: source.to_string(),
            offset: 0,
        }]);
    };
    if lines[..first].iter().any(|line| !line.trim().is_empty()) {
        tracing::warn!(lines = first, "ignoring text before the first section header");
    }

    let mut seen = FxHashSet::default();
    let mut sections = Vec::with_capacity(headers.len());
    for (n, (at, header, double)) in headers.iter().enumerate() {
        let kind = section_kind(header, *double, privileged).map_err(|(code, message)| {
            CompileError::new(code, *at, message)
        })?;
        if !seen.insert(kind.clone()) {
            return Err(CompileError::new(
                ErrorCode::E4006,
                *at,
                format!("Section \"{kind}\" is declared more than once"),
            ));
        }
        let end = headers.get(n + 1).map_or(lines.len(), |&(next, _, _)| next);
        sections.push(Section {
            kind,
            args: header.args.map(str::to_string),
            source: lines[at + 2..end].join("\n"),
            offset: at + 2,
        });
    }
    tracing::debug!(sections = sections.len(), "mode split");
    Ok(sections)
}

fn section_kind(
    header: &Header<'_>,
    double: bool,
    privileged: bool,
) -> Result<SectionKind, (ErrorCode, String)> {
    if header.args.is_some() && !matches!(header.name, "enter" | "pop_mode") {
        return Err((
            ErrorCode::E4002,
            "Only the enter() and pop_mode() sections in a mode may take arguments".to_string(),
        ));
    }
    if double {
        return Ok(SectionKind::Init);
    }
    if header.name == "pop_mode" {
        let Some(mode) = header.from else {
            return Err((
                ErrorCode::E4003,
                "pop_mode() section must name the mode it returns from: pop_mode from <Mode>"
                    .to_string(),
            ));
        };
        if is_privileged_mode(mode) && !privileged {
            return Err((
                ErrorCode::E4004,
                format!("Illegal mode name in pop_mode() from section: \"{mode}\""),
            ));
        }
        return Ok(SectionKind::PopModeFrom(mode.to_string()));
    }
    if header.from.is_some() {
        tracing::warn!(section = header.name, "\"from\" ignored outside pop_mode sections");
    }
    SectionKind::from_name(header.name).ok_or_else(|| {
        (
            ErrorCode::E4001,
            format!("Illegal section name: \"{}\"", header.name),
        )
    })
}

fn is_header_at(lines: &[&str], i: usize) -> bool {
    i + 1 < lines.len() && separator_kind(lines[i + 1]).is_some() && parse_header(lines[i]).is_some()
}

/// `Some(true)` for a double-line separator, `Some(false)` for a single one.
fn separator_kind(line: &str) -> Option<bool> {
    let line = line.trim_end_matches(' ');
    let is_rule = |c: char| DOUBLE_SEPARATORS.contains(c) || SINGLE_SEPARATORS.contains(c);
    if line.chars().count() < MIN_SEPARATOR_LEN || !line.chars().all(is_rule) {
        return None;
    }
    line.chars().next().map(|c| DOUBLE_SEPARATORS.contains(c))
}

/// `name`, `name(args)`, `name from Mode` or `name(args) from Mode`.
fn parse_header(line: &str) -> Option<Header<'_>> {
    let rest = line.trim_start_matches(' ');
    let name_len = rest.find(|c: char| !is_identifier_char(c)).unwrap_or(rest.len());
    let name = &rest[..name_len];
    if !is_section_name(name) {
        return None;
    }
    let mut rest = rest[name_len..].trim_start_matches(' ');

    let mut args = None;
    if rest.starts_with('(') {
        let close = rest.find(')')?;
        args = Some(&rest[..=close]);
        rest = rest[close + 1..].trim_start_matches(' ');
    }

    let mut from = None;
    if rest.starts_with("from") && boundary_after(rest, 4) {
        let mode = rest[4..].trim_start_matches(' ');
        if mode.len() == rest.len() - 4 {
            return None;
        }
        let len = mode_name_len(mode)?;
        from = Some(&mode[..len]);
        rest = &mode[len..];
    }

    rest.trim_end().is_empty().then_some(Header { name, args, from })
}

/// Lifecycle names, or a mode-style name: capitalized or starting with
/// `_` or `$`.
fn is_section_name(name: &str) -> bool {
    if matches!(name, "init" | "enter" | "frame" | "leave" | "pop_mode") {
        return true;
    }
    let Some(first) = name.chars().next() else {
        return false;
    };
    let tail = &name[first.len_utf8()..];
    (first.is_ascii_uppercase() || first == '_' || first == '$')
        && !tail.is_empty()
        && identifier_len(tail) == Some(tail.len())
}

fn mode_name_len(s: &str) -> Option<usize> {
    let first = s.chars().next()?;
    if !(first == '$' || first == '_' || first.is_ascii_alphabetic()) {
        return None;
    }
    Some(
        s.find(|c: char| !(c == '$' || c == '_' || c.is_ascii_alphanumeric()))
            .unwrap_or(s.len()),
    )
}
