//! One compile unit: a section of a mode or a whole script.

use pyxl_diagnostic::CompileError;

use crate::block::structure_blocks;
use crate::clauses::apply_clauses;
use crate::compact::compact;
use crate::context::CompileContext;
use crate::elision::expand_elisions;
use crate::expand::OperatorExpander;
use crate::prepare::prepare;
use crate::rewrite::{desugar_conditionals, rewrite};


/// Compiles `source` to JavaScript.
///
/// The output has as many lines as `source`, and error lines index
/// `source`.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn compile_unit(
    source: &str,
    ctx: &mut CompileContext,
    expander: &dyn OperatorExpander,
) -> Result<String, CompileError> {
    let lines = prepare(source, ctx)?;
    let mut lines = compact(lines)?;
    apply_clauses(&mut lines)?;
    for line in &mut lines {
        *line = desugar_conditionals(line);
        if line.trim().is_empty() {
            line.clear();
        }
    }
    expand_elisions(&mut lines)?;
    let structured = structure_blocks(&lines, ctx)?;
    rewrite(&structured.join("\n"), ctx, expander)
}
