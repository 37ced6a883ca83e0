//! `with a, b ∊ obj` lowering.
//!
//! The named properties are copied into locals and replaced on the object
//! by accessors that read and write those locals, so assignments inside the
//! block reach the object. A `finally` puts the original descriptors back
//! and writes the final values through.

use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::chars::is_identifier;

use crate::context::CompileContext;

use super::Lowered;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

pub fn lower_with(test: &str, ctx: &mut CompileContext) -> Result<Lowered, Problem> {
    let syntax = || Problem::new(ErrorCode::E2003, "Incorrect WITH statement syntax");
    let (names, expr) = test.split_once('∊').ok_or_else(syntax)?;
    let names: Vec<&str> = names.split(',').map(str::trim).collect();
    if !names.iter().all(|name| is_identifier(name)) {
        return Err(syntax());
    }
    let expr = expr.trim();

    let obj = ctx.gensym("obj");
    let v = ctx.gensym("v");
    let descriptors: Vec<String> = names
        .iter()
        .map(|name| ctx.gensym(&format!("{name}Descriptor")))
        .collect();

    let mut prologue = format!("{{ let {obj} = ({expr})");
    for name in &names {
        prologue.push_str(&format!(", {name} = {obj}.{name}"));
    }
    for (name, descriptor) in names.iter().zip(&descriptors) {
        let key = ctx.protect(name)?;
        prologue.push_str(&format!(
            ", {descriptor} = $Object.getOwnPropertyDescriptor({obj}, {key})"
        ));
    }
    prologue.push(';');
    for (name, descriptor) in names.iter().zip(&descriptors) {
        let missing =
            ctx.protect(&format!("No '{name}' property on object in this with statement"))?;
        prologue.push_str(&format!(" if (! {descriptor}) {{ $error({missing})}};"));
    }
    prologue.push_str(&format!("$Object.defineProperties({obj}, {{"));
    for name in &names {
        prologue.push_str(&format!(
            "{name}: {{configurable: true, get() {{ return {name}; }}, set({v}) {{ {name} = {v}; }}}}, "
        ));
    }
    prologue.push_str("}); try {");

    let mut epilogue = String::from("} finally { ");
    for (name, descriptor) in names.iter().zip(&descriptors) {
        let key = ctx.protect(name)?;
        epilogue.push_str(&format!(
            "if ({descriptor}.get) {{ $Object.defineProperty({obj}, {key}, {descriptor}); }} \
             else {{ delete {obj}.{name}; }} {obj}.{name} = {name}; "
        ));
    }
    epilogue.push_str("}}");
    Ok(Lowered::new(prologue, epilogue))
}
