//! Single-line statement compiler.
//!
//! Compiles one logical line whose body, if any, sits on the same line:
//! `if x: y`, `for i < 3: f(i)`, `def f(a): a + 1`, plain expressions and
//! `;`-separated chains of these. Each fragment ends in exactly one `; `.

use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::chars::is_identifier;
use pyxl_lexer_core::{find_matching, next_instance};
use pyxl_lexer_core::scan::boundary_after;

use crate::context::CompileContext;
use crate::lower::{lower_for, lower_with, rewrite_default_args, unbalanced};
use crate::stack::ensure_sufficient_stack;


/// Statement keywords that take an inline body after `:`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Control {
    For,
    If,
    ElseIf,
    Else,
    While,
    Until,
    With,
    Local,
}

impl Control {
    /// Matches a keyword at the start of `body`, returning it and its length.
    fn parse(body: &str) -> Option<(Control, usize)> {
        const WORDS: &[(&str, Control)] = &[
            ("for", Control::For),
            ("if", Control::If),
            ("else", Control::Else),
            ("while", Control::While),
            ("until", Control::Until),
            ("with", Control::With),
            ("local", Control::Local),
        ];
        for &(word, control) in WORDS {
            if !(body.starts_with(word) && boundary_after(body, word.len())) {
                continue;
            }
            if control == Control::Else {
                let after = &body[word.len()..];
                let gap = after.len() - after.trim_start_matches([' ', '\t']).len();
                let rest = &after[gap..];
                if gap > 0 && rest.starts_with("if") && boundary_after(rest, 2) {
                    return Some((Control::ElseIf, word.len() + gap + 2));
                }
            }
            return Some((control, word.len()));
        }
        None
    }

    fn keyword(self) -> &'static str {
        match self {
            Control::For => "for",
            Control::If => "if",
            Control::ElseIf => "else if",
            Control::Else => "else",
            Control::While => "while",
            Control::Until => "until",
            Control::With => "with",
            Control::Local => "local",
        }
    }
}

/// Compiles one logical line.
pub fn compile_statement(line: &str, ctx: &mut CompileContext) -> Result<String, Problem> {
    ensure_sufficient_stack(|| statement(line, ctx))
}

fn statement(line: &str, ctx: &mut CompileContext) -> Result<String, Problem> {
    let (line, next) = match line.find(';') {
        Some(at) if at > 0 => (line[..at].trim_end(), line[at + 1..].trim()),
        _ => (line, ""),
    };
    if line.trim().is_empty() {
        return Ok(line.to_string());
    }

    let body = line.trim_start();
    let before = &line[..line.len() - body.len()];

    if body.starts_with("def") && boundary_after(body, 3) {
        let rest = format!("{}; {next}", body[3..].trim());
        return inline_def(before, &rest, ctx);
    }

    if let Some((control, len)) = Control::parse(body) {
        let rest = format!("{}; {next}", body[len..].trim());
        return control_statement(before, control, &rest, ctx);
    }

    if let Some(after) = keyword_colon(body, "preserving_transform") {
        let rest = format!("{}; {next}", after.trim());
        let inner = compile_statement(&rest, ctx)?;
        return Ok(format!(
            "{before}try {{ $pushGraphicsState(); {inner}; }} finally {{ $popGraphicsState(); }}"
        ));
    }

    for declaration in ["let", "const"] {
        if let Some(rest) = body.strip_prefix(declaration) {
            if rest.starts_with([' ', '\t']) {
                let tail = if next.is_empty() {
                    ";".to_string()
                } else {
                    format!("; {}", compile_statement(next, ctx)?)
                };
                return Ok(format!("{before}{declaration} {}{tail}", rest.trim_start()));
            }
        }
    }

    for call in ["debug_watch", "debug_print"] {
        if let Some(rest) = body.strip_prefix(call) {
            let rest = rest.trim_start();
            if rest.starts_with('(') && rest.len() > 1 {
                return debug_call(before, call, rest, next, ctx);
            }
        }
    }

    Ok(format!("{line}; {}", compile_statement(next, ctx)?))
}

/// `keyword` followed by optional spaces and `:`; returns the text after `:`.
fn keyword_colon<'a>(body: &'a str, keyword: &str) -> Option<&'a str> {
    body.strip_prefix(keyword)?
        .trim_start()
        .strip_prefix(':')
}

fn control_statement(
    before: &str,
    control: Control,
    rest: &str,
    ctx: &mut CompileContext,
) -> Result<String, Problem> {
    let end = next_instance(rest, &[':'], 0)
        .map_err(|err| unbalanced(err, ":"))?
        .ok_or_else(|| {
            Problem::new(
                ErrorCode::E1006,
                format!("Missing : after single-line \"{}\".", control.keyword()),
            )
        })?;
    let test = &rest[..end];

    let (prefix, suffix) = match control {
        Control::Local => ("{".to_string(), "}".to_string()),
        Control::With => {
            let lowered = lower_with(test, ctx)?;
            (lowered.prologue, lowered.epilogue)
        }
        Control::For => {
            let lowered = lower_for(test, ctx)?;
            (lowered.prologue, lowered.epilogue)
        }
        Control::Until => (format!("while (! ({})) {{", test.trim()), "}".to_string()),
        Control::Else => ("else {".to_string(), "}".to_string()),
        Control::If | Control::ElseIf | Control::While => (
            format!("{} ({}) {{", control.keyword(), test.trim()),
            "}".to_string(),
        ),
    };
    let inner = compile_statement(&rest[end + 1..], ctx)?;
    Ok(format!("{before}{prefix}{inner}; {suffix}"))
}

/// `def name(args): body` on one line.
fn inline_def(before: &str, rest: &str, ctx: &mut CompileContext) -> Result<String, Problem> {
    let ill_formed = || Problem::new(ErrorCode::E2006, "Ill-formed single-line function definition");

    let rest = rest.trim_start();
    let name_end = rest.find(['(', ' ', '\t']).ok_or_else(ill_formed)?;
    let name = &rest[..name_end];
    let after_name = rest[name_end..].trim_start();
    let open = rest.len() - after_name.len();
    if !is_function_name(name) || !after_name.starts_with('(') {
        return Err(ill_formed());
    }

    // The first `)` that is followed by `:` closes the argument list.
    let mut close = None;
    for (offset, _) in rest[open..].match_indices(')') {
        let at = open + offset;
        if rest[at + 1..].trim_start_matches([' ', '\t']).starts_with(':') {
            close = Some(at);
            break;
        }
    }
    let close = close.ok_or_else(ill_formed)?;
    let colon = close + 1 + rest[close + 1..].find(':').ok_or_else(ill_formed)?;

    let args = rewrite_default_args(&rest[open + 1..close])?;
    let body = compile_statement(&rest[colon + 1..], ctx)?;
    Ok(format!("{before}const {name} = (function({args}) {{ {body} }})"))
}

/// `debug_watch(expr)` keeps the source of `expr` for display.
fn debug_call(
    before: &str,
    call: &str,
    rest: &str,
    next: &str,
    ctx: &mut CompileContext,
) -> Result<String, Problem> {
    let close = find_matching(rest, 0).ok_or_else(|| {
        Problem::new(
            ErrorCode::E2007,
            format!("Missing matching parenthesis in {call}"),
        )
    })?;
    let expr = &rest[1..close];
    let shown = ctx.restore(expr).replace('\\', "\\\\").replace('"', "\\\"");
    let message = ctx.protect(&shown)?;
    let flag = if call == "debug_watch" {
        "debugWatch"
    } else {
        "debugPrint"
    };

    let remainder = rest[close + 1..].trim();
    let tail = match (remainder.is_empty(), next.is_empty()) {
        (true, _) => next.to_string(),
        (false, true) => remainder.to_string(),
        (false, false) => format!("{remainder}; {next}"),
    };
    let tail = compile_statement(&tail, ctx)?;
    Ok(format!(
        "{before}(${flag}Enabled && ${call}(SOURCE_LOCATION, {message}, {expr})); {tail}"
    ))
}

/// `true` when `name` may follow `def`.
pub(crate) fn is_function_name(name: &str) -> bool {
    is_identifier(name.strip_prefix('$').unwrap_or(name))
}
