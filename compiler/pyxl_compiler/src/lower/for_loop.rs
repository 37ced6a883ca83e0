//! FOR-loop lowering.
//!
//! Three header forms are recognized, in this order:
//!
//! - `a, b ∊ obj ∊ container`: WITH-binds `a` and `b` from each element,
//!   then iterates as a container loop.
//! - `v ∊ container` (optionally `v at k ∊ container`): iterates an array
//!   by index or an object by key, skipping keys that begin with `_`.
//! - `i < end` and `start < i < end`, with `≤` allowed on either side.
//!
//! Container loops bump the container's active-iterator count while they
//! run so the runtime can reject structural mutation; the count is restored
//! in a `finally` block.

use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::chars::{identifier_len, is_identifier};
use pyxl_lexer_core::scan::find_word;
use pyxl_lexer_core::{find_matching, next_instance};

use crate::context::CompileContext;

use super::{lower_with, unbalanced, Lowered};


const ELEMENT_OF: char = '∊';

#[tracing::instrument(level = "trace", skip(ctx))]
pub fn lower_for(test: &str, ctx: &mut CompileContext) -> Result<Lowered, Problem> {
    let mut test = strip_outer_parens(test.trim()).to_string();

    let mut key = None;
    if let Some((rewritten, name)) = take_key_name(&test) {
        test = rewritten;
        key = Some(name);
    }

    let mut before = String::new();
    let mut after = String::from("}");
    if let Some((first, name, second)) = split_for_with(&test) {
        let with = lower_with(&format!("{}∊{name}", &test[..first]), ctx)?;
        before = with.prologue;
        after = format!("{}}}", with.epilogue);
        test = format!("{name} ∊{}", &test[second + ELEMENT_OF.len_utf8()..]);
    }

    if let Some((value, container)) = split_container(&test) {
        let key = key.unwrap_or_else(|| ctx.gensym("key"));
        return Ok(container_loop(value, container, &key, &before, &after, ctx));
    }
    range_loop(&test, ctx)
}

/// `(a < i < b)` loses its parentheses; `(a) < i < (b)` does not.
fn strip_outer_parens(test: &str) -> &str {
    if test.starts_with('(') && find_matching(test, 0) == Some(test.len() - 1) {
        test[1..test.len() - 1].trim()
    } else {
        test
    }
}

/// Removes an `at key` clause in front of `∊`, returning the new header and
/// the key name.
fn take_key_name(test: &str) -> Option<(String, String)> {
    let mut from = 0;
    while let Some(at) = find_word(test, "at", from) {
        from = at + 2;
        let head = test[..at].trim_end();
        if head.len() == at || head.is_empty() {
            continue;
        }
        let tail = &test[at + 2..];
        let key_start = tail.len() - tail.trim_start().len();
        if key_start == 0 {
            continue;
        }
        let Some(key_len) = identifier_len(&tail[key_start..]) else {
            continue;
        };
        let key = &tail[key_start..key_start + key_len];
        let rest = tail[key_start + key_len..].trim_start();
        if let Some(rest) = rest.strip_prefix(ELEMENT_OF) {
            return Some((format!("{head} {ELEMENT_OF}{rest}"), key.to_string()));
        }
    }
    None
}

/// Locates `names ∊ obj ∊ container`, preferring the last such split.
/// Returns the positions of both `∊` and the object name.
fn split_for_with(test: &str) -> Option<(usize, &str, usize)> {
    let marks: Vec<usize> = test.match_indices(ELEMENT_OF).map(|(i, _)| i).collect();
    marks.windows(2).rev().find_map(|pair| {
        let (first, second) = (pair[0], pair[1]);
        let name = test[first + ELEMENT_OF.len_utf8()..second].trim();
        let bound = !test[..first].trim().is_empty();
        (bound && is_identifier(name)).then_some((first, name, second))
    })
}

/// `value ∊ container`.
fn split_container(test: &str) -> Option<(&str, &str)> {
    let test = test.trim_start();
    let len = identifier_len(test)?;
    let rest = test[len..].trim_start().strip_prefix(ELEMENT_OF)?;
    Some((&test[..len], rest.trim()))
}

fn container_loop(
    value: &str,
    container_expr: &str,
    key: &str,
    before: &str,
    after: &str,
    ctx: &mut CompileContext,
) -> Lowered {
    let container = ctx.gensym("container");
    let is_obj = ctx.gensym("is_obj");
    let index = ctx.gensym("index");
    let key_array = ctx.gensym("key_array");
    let is_mutable = ctx.gensym("is_mutable");

    let prologue = format!(
        "{{const {container} = {container_expr}; \
         const {is_obj} = is_object({container}); \
         $checkContainer({container}); \
         const {is_mutable} = ! $Object.isFrozen({container}) && ! $Object.isSealed({container}); \
         try {{ \
         let {key_array} = {is_obj} ? keys({container}) : {container}; \
         if ({is_mutable}) {{ $iteratorCount.set({container}, ($iteratorCount.get({container}) || 0) + 1); }} \
         for (let {index} = 0; {index} < {key_array}.length; ++{index}) {{ \
         let {key} = {is_obj} ? {key_array}[{index}] : {index}; \
         if ({is_obj} && ({key}[0] == '_')) {{ continue; }}; \
         let {value} = {container}[{key}]; {before} "
    );
    let epilogue = format!(
        "{after}}} finally {{ if ({is_mutable}) {{ \
         $iteratorCount.set({container}, $iteratorCount.get({container}) - 1); }}}}}}"
    );
    Lowered::new(prologue, epilogue)
}

fn comparator(test: &str, at: usize) -> (&'static str, usize) {
    if test[at..].starts_with('≤') {
        ("<=", '≤'.len_utf8())
    } else {
        ("<", 1)
    }
}

fn range_loop(test: &str, ctx: &mut CompileContext) -> Result<Lowered, Problem> {
    const COMPARATORS: [char; 2] = ['<', '≤'];
    let first = next_instance(test, &COMPARATORS, 0)
        .map_err(|err| unbalanced(err, "<"))?
        .ok_or_else(|| {
            Problem::new(ErrorCode::E2001, "No < or ≤ found in FOR loop declaration")
        })?;
    let (first_op, first_len) = comparator(test, first);
    let second = next_instance(test, &COMPARATORS, first + first_len)
        .map_err(|err| unbalanced(err, "<"))?;

    let (init, identifier, end, op) = match second {
        None => (
            "0".to_string(),
            test[..first].trim(),
            test[first + first_len..].trim(),
            first_op,
        ),
        Some(second) => {
            let lower = test[..first].trim();
            let init = if first_op == "<" {
                format!("$Math.floor({lower}) + 1")
            } else {
                lower.to_string()
            };
            let (second_op, second_len) = comparator(test, second);
            (
                init,
                test[first + first_len..second].trim(),
                test[second + second_len..].trim(),
                second_op,
            )
        }
    };

    if !is_identifier(identifier) {
        return Err(Problem::new(ErrorCode::E2002, "Illegal FOR-loop variable syntax"));
    }
    let iterator = ctx.gensym(identifier);
    let end_var = ctx.gensym("end");
    Ok(Lowered::new(
        format!(
            "for (let {iterator} = {init}, {end_var} = {end}; {iterator} {op} {end_var}; ++{iterator}) \
             {{ let {identifier} = {iterator};"
        ),
        "}",
    ))
}
