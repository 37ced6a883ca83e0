//! PyxlScript to JavaScript compiler.
//!
//! A unit of source (a global script or one section of a mode) goes
//! through these passes, each keeping one output line per source line:
//!
//! 1. preparation and the quoting guard ([`prepare`](prepare::prepare))
//! 2. line reconstruction ([`compact`](compact::compact))
//! 3. `because` clauses and inline conditionals
//! 4. elision expansion
//! 5. block structuring, which lowers control statements and compiles
//!    single-line statements
//! 6. the lexical rewrite pipeline and the [`OperatorExpander`]
//!
//! [`compile_program`] splits mode files into sections and assembles a
//! whole game.

mod block;
mod clauses;
mod compact;
mod context;
mod elision;
mod expand;
mod lower;
mod prepare;
mod program;
mod rewrite;
mod sections;
mod stack;
mod statement;
mod unit;

pub use context::{CompileContext, CompileOptions, GenSym};
pub use expand::{ExpanderError, ExpanderOptions, OperatorExpander, ScalarExpander};
pub use program::{
    compile_mode, compile_program, compile_script, parse_line_directive,
    resolve_source_locations, LineDirective, ModeSource, ProgramSource,
};
pub use sections::{is_privileged_mode, split_sections, Section, SectionKind};
pub use unit::compile_unit;

pub use pyxl_diagnostic::{CompileError, ErrorCode, ProgramError};

/// Compiles one unit with the scalar expander.
pub fn compile_source(source: &str, options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = CompileContext::new(options);
    compile_unit(source, &mut ctx, &ScalarExpander)
}
