//! Block structurer.
//!
//! Walks the compacted lines of a unit and turns indentation into braces.
//! A line whose next non-blank line is indented deeper opens a block: its
//! header is lowered, the indented lines are structured recursively, and
//! the header's closing text is appended to the last line the nested block
//! consumed. Every other line goes to the single-line statement compiler.
//!
//! The output has exactly one entry per input line, so indices stay valid
//! as source line numbers.

use pyxl_diagnostic::{CompileError, ErrorCode, Problem};
use pyxl_lexer_core::chars::{identifier_len, is_word_char};
use pyxl_lexer_core::find_matching;
use pyxl_lexer_core::scan::{boundary_after, indent_of};

use crate::context::CompileContext;
use crate::lower::{lower_for, lower_with, rewrite_default_args, Lowered};
use crate::rewrite::{check_line, replace_hex_colors};
use crate::stack::ensure_sufficient_stack;
use crate::statement::compile_statement;


/// Structures a whole unit.
#[tracing::instrument(level = "debug", skip_all, fields(lines = lines.len()))]
pub fn structure_blocks(
    lines: &[String],
    ctx: &mut CompileContext,
) -> Result<Vec<String>, CompileError> {
    let (out, next) = block(lines, 0, ctx)?;
    if next < lines.len() {
        return Err(CompileError::new(ErrorCode::E1004, next, "Inconsistent indentation"));
    }
    Ok(out)
}

/// Structures the block starting at `start`.
///
/// Returns the generated lines for `start..next` and `next`, the index of
/// the first line that is not part of the block.
fn block(
    lines: &[String],
    start: usize,
    ctx: &mut CompileContext,
) -> Result<(Vec<String>, usize), CompileError> {
    let parent_indent = match start {
        0 => 0,
        _ => indent_of(&lines[start - 1]),
    };
    let internal = ctx.options().internal_mode;
    let mut block_indent = None;
    let mut out = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let line = lines[i].trim_end();
        if line.is_empty() {
            out.push(String::new());
            i += 1;
            continue;
        }

        let indent = indent_of(line);
        let expected = *block_indent.get_or_insert(indent);
        if indent < expected {
            if indent > parent_indent {
                return Err(CompileError::new(ErrorCode::E1004, i, "Inconsistent indentation"));
            }
            return Ok((out, i));
        }

        let line = replace_hex_colors(line).map_err(|p| p.at(i))?;
        check_line(&line, internal).map_err(|p| p.at(i))?;
        if start == 0 && out.iter().all(String::is_empty) && indent > 0 {
            return Err(CompileError::new(
                ErrorCode::E1007,
                i,
                "First line must not be indented",
            ));
        }

        let opens_block = lines[i + 1..]
            .iter()
            .map(|next| next.trim_end())
            .find(|next| !next.is_empty())
            .is_some_and(|next| indent_of(next) > indent);
        if !opens_block {
            out.push(compile_statement(&line, ctx).map_err(|p| p.at(i))?);
            i += 1;
            continue;
        }

        let Lowered { prologue, epilogue } = open_block(&line, ctx).map_err(|p| p.at(i))?;
        let (mut body, next) = ensure_sufficient_stack(|| block(lines, i + 1, ctx))?;
        let mut header = format!("{}{prologue}", &line[..indent]);
        match body.last_mut() {
            Some(last) => last.push_str(&epilogue),
            None => header.push_str(&epilogue),
        }
        out.push(header);
        out.append(&mut body);
        i = next;
    }
    Ok((out, i))
}

/// Lowers a block header (a line ending in `:`) without its indentation.
fn open_block(line: &str, ctx: &mut CompileContext) -> Result<Lowered, Problem> {
    let illegal = || Problem::new(ErrorCode::E1005, "Illegal block statement");
    let head = line
        .trim_start()
        .strip_suffix(':')
        .ok_or_else(illegal)?
        .trim_end();
    let word_len = head.find(|c: char| !is_word_char(c)).unwrap_or(head.len());
    let rest = &head[word_len..];
    let bare = rest.trim().is_empty();

    let lowered = match &head[..word_len] {
        "def" => function_header(rest)?,
        "with" => lower_with(strip_parens(rest.trim()), ctx)?,
        "for" => lower_for(rest, ctx)?,
        "local" if bare => Lowered::new("{", "}"),
        "preserving_transform" if bare => Lowered::new(
            "try { $pushGraphicsState();",
            "} finally { $popGraphicsState(); }",
        ),
        "if" => Lowered::new(format!("if ({}) {{", rest.trim()), "}"),
        "while" => Lowered::new(format!("while ({}) {{ ", rest.trim()), "}"),
        "until" => Lowered::new(format!("while (! ({})) {{ ", rest.trim()), "}"),
        "else" if bare => Lowered::new("else {", "}"),
        "else" => {
            let test = rest.trim_start();
            if rest.len() == test.len() || !test.starts_with("if") || !boundary_after(test, 2) {
                return Err(illegal());
            }
            Lowered::new(format!("else if ({}) {{", test[2..].trim()), "}")
        }
        _ => return Err(illegal()),
    };
    Ok(lowered)
}

/// `(a ∊ b)` → `a ∊ b` when the parentheses enclose the whole header.
fn strip_parens(test: &str) -> &str {
    if test.starts_with('(') && find_matching(test, 0) == Some(test.len() - 1) {
        &test[1..test.len() - 1]
    } else {
        test
    }
}

/// `def name(args) modifier:` where the only modifier is
/// `preserving_transform`.
fn function_header(rest: &str) -> Result<Lowered, Problem> {
    let ill_formed = || Problem::new(ErrorCode::E2006, "Ill-formed function definition");
    let rest = rest.trim_start();
    let sigil = usize::from(rest.starts_with('$'));
    let name_len = sigil + identifier_len(&rest[sigil..]).ok_or_else(ill_formed)?;
    let name = &rest[..name_len];
    let params = rest[name_len..].trim_start();
    let close = params.rfind(')').ok_or_else(ill_formed)?;
    if !params.starts_with('(') {
        return Err(ill_formed());
    }
    let modifier = params[close + 1..].trim();
    if !modifier.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Err(ill_formed());
    }
    let args = rewrite_default_args(&params[1..close])?;

    let prologue = format!("const {name} = (function({args}) {{ ");
    match modifier {
        "" => Ok(Lowered::new(prologue, "});")),
        "preserving_transform" => Ok(Lowered::new(
            format!("{prologue}try {{ $pushGraphicsState();"),
            "} finally { $popGraphicsState(); }});",
        )),
        other => Err(Problem::new(
            ErrorCode::E2004,
            format!("Illegal function modifier: {other}"),
        )),
    }
}
