//! Lexical rewrite pipeline.
//!
//! Runs once over a structured unit and turns the remaining PyxlScript
//! operators, literals and glyphs into JavaScript. The passes are ordered:
//! later passes rely on the spellings earlier ones leave behind (`^` means
//! power until [`operators::xor`] reintroduces it, `default` survives as
//! the `==` marker for the expander, and so on).
//!
//! The per-line checks ([`check_line`], [`replace_hex_colors`]) and the
//! inline conditional desugaring are called earlier, by the unit driver
//! and the block structurer.

mod cleanup;
mod conditional;
mod hex_color;
mod illegal;
mod implicit_mul;
mod numeric;
mod operators;
mod spread;

pub use conditional::desugar_conditionals;
pub use hex_color::replace_hex_colors;
pub use illegal::check_line;

use pyxl_diagnostic::{CompileError, ErrorCode};
use pyxl_lexer_core::line_of;
use pyxl_lexer_core::scan::find_word;

use crate::context::CompileContext;
use crate::expand::{ExpanderOptions, OperatorExpander};


/// Rewrites a structured unit and restores its string literals.
#[tracing::instrument(level = "debug", skip_all, fields(len = src.len()))]
pub(crate) fn rewrite(
    src: &str,
    ctx: &mut CompileContext,
    expander: &dyn OperatorExpander,
) -> Result<String, CompileError> {
    let src = src.replace('∊', " in ");
    let src = reset(&src, ctx)?;
    let src = operators::equality(&src);
    let src = operators::hide_logical(&src);
    let src = operators::floor_ceiling(&src);
    let src = operators::bars(&src, '|', "abs")?;
    let src = operators::bars(&src, '‖', "magnitude")?;
    let src = numeric::radix_literals(&src)?;
    let src = numeric::deg_suffix(&src);
    let src = implicit_mul::implicit_products(&src);
    let src = numeric::percent(&src);
    let src = numeric::degrees(&src);
    let src = numeric::fractions(&src);
    let src = implicit_mul::trig_calls(&src);
    let src = operators::comparisons(&src);
    let src = operators::shifts(&src);
    let src = operators::power(&src);
    let src = operators::or(&src);
    let src = operators::set_operators(&src);
    let src = numeric::strength_reduce(&src);
    numeric::reject_stray_percent(&src)?;
    let src = operators::constants(&src);
    let src = operators::xor(&src);
    let src = operators::logical_words(&src);
    let src = operators::bit_operators(&src);
    let src = operators::debug_guards(&src);
    let src = operators::nullish_marker(&src);

    let shim = !ctx.options().parser_supports_object_spread;
    let src = if shim {
        spread::hide_object_spread(&src)
    } else {
        src
    };
    let src = expander
        .expand(&src, &ExpanderOptions::default())
        .map_err(|err| CompileError::new(ErrorCode::E3001, err.line.unwrap_or(0), err.message))?;
    let src = if shim {
        spread::restore_object_spread(&src)
    } else {
        src
    };

    let src = cleanup::tidy(&src);
    Ok(ctx.finish_unit(&src))
}

/// `reset` restarts the game by throwing a recognizable error.
fn reset(src: &str, ctx: &mut CompileContext) -> Result<String, CompileError> {
    let Some(first) = find_word(src, "reset", 0) else {
        return Ok(src.to_string());
    };
    let message = ctx.protect("RESET").map_err(|p| p.at(line_of(src, first)))?;
    let replacement = format!("{{ throw new Error({message}); }}");
    let mut out = String::with_capacity(src.len() + 32);
    let mut copied = 0;
    let mut from = first;
    while let Some(at) = find_word(src, "reset", from) {
        out.push_str(&src[copied..at]);
        out.push_str(&replacement);
        copied = at + "reset".len();
        from = copied;
    }
    out.push_str(&src[copied..]);
    Ok(out)
}
