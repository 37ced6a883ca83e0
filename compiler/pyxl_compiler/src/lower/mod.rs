//! Lowering of the control constructs that need generated temporaries.
//!
//! Each lowering returns the text placed before the body and the text
//! appended after it; the caller decides where the body goes.

mod default_args;
mod for_loop;
mod with_binding;

pub use default_args::rewrite_default_args;
pub use for_loop::lower_for;
pub use with_binding::lower_with;

use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::UnbalancedBracket;

/// Text surrounding a lowered body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lowered {
    pub prologue: String,
    pub epilogue: String,
}

impl Lowered {
    pub fn new(prologue: impl Into<String>, epilogue: impl Into<String>) -> Self {
        Lowered {
            prologue: prologue.into(),
            epilogue: epilogue.into(),
        }
    }
}

/// Error for a closer met while searching for `target`.
pub(crate) fn unbalanced(err: UnbalancedBracket, target: &str) -> Problem {
    Problem::new(
        ErrorCode::E1001,
        format!("Unbalanced \"{}\" while looking for \"{target}\"", err.bracket),
    )
}
