//! Diagnostics for the PyxlScript compiler.
//!
//! A compile either succeeds or fails with exactly one [`CompileError`]: an
//! [`ErrorCode`], a zero-based line index in the original source, and a
//! message. Helpers that do not know their line return a [`Problem`] and
//! the caller attaches the line with [`Problem::at`].
//!
//! The [`emitter`] module renders errors for terminals and tools.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{CompileError, Problem, ProgramError};
pub use error_code::ErrorCode;
