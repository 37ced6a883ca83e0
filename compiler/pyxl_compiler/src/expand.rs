//! Seam for the vector-operator expander.
//!
//! The expander receives one unit's nearly final text (string contents
//! hidden, operators in JavaScript spelling) and gives the arithmetic and
//! comparison operators their element-wise meaning. It is a separate
//! component; the compiler only depends on [`OperatorExpander`].

use thiserror::Error;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

/// Flags passed to every expander run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpanderOptions {
    /// Assignments evaluate to `undefined` instead of the assigned value.
    pub assignment_returns_undefined: bool,
    /// Scalar-only operations keep their plain JavaScript form.
    pub scalar_escapes: bool,
    /// `a == b` left by `default` is a nullish coalesce, not a comparison.
    pub nullish_rewrite: bool,
    /// Prefix of the runtime helpers the expander calls (`$add`, ...).
    pub operator_prefix: String,
    /// Report malformed expressions as errors rather than passing them on.
    pub throw_errors: bool,
}

impl Default for ExpanderOptions {
    fn default() -> Self {
        ExpanderOptions {
            assignment_returns_undefined: true,
            scalar_escapes: true,
            nullish_rewrite: true,
            operator_prefix: "$".to_string(),
            throw_errors: true,
        }
    }
}

/// A malformed expression reported by the expander.
///
/// `line` is zero-based within the text handed to the expander, which has
/// one line per original source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExpanderError {
    pub line: Option<usize>,
    pub message: String,
}

impl ExpanderError {
    pub fn new(line: Option<usize>, message: impl Into<String>) -> Self {
        ExpanderError {
            line,
            message: message.into(),
        }
    }
}

pub trait OperatorExpander {
    fn expand(&self, src: &str, options: &ExpanderOptions) -> Result<String, ExpanderError>;
}

/// Expander that leaves scalar operators alone.
///
/// Only the nullish rewrite is performed: a bare `==` (every author-written
/// equality is `===` by now) becomes `??`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarExpander;

impl OperatorExpander for ScalarExpander {
    #[tracing::instrument(level = "trace", skip_all, fields(len = src.len()))]
    fn expand(&self, src: &str, options: &ExpanderOptions) -> Result<String, ExpanderError> {
        if !options.nullish_rewrite {
            return Ok(src.to_string());
        }
        let mut out = String::with_capacity(src.len());
        let mut rest = src;
        while let Some(at) = rest.find("==") {
            let before = rest[..at].chars().next_back();
            let after = rest[at + 2..].chars().next();
            let marker = !before.is_some_and(|c| matches!(c, '=' | '!' | '<' | '>'))
                && after != Some('=');
            out.push_str(&rest[..at]);
            if marker {
                out.push_str("??");
                rest = &rest[at + 2..];
            } else {
                // Skip the whole operator so `===` is not read as `==` + `=`.
                let len = rest[at..].find(|c| c != '=').unwrap_or(rest.len() - at);
                out.push_str(&rest[at..at + len]);
                rest = &rest[at + len..];
            }
        }
        out.push_str(rest);
        if options.throw_errors {
            if let Some(line) = out.lines().position(|l| l.trim_start().starts_with("??")) {
                return Err(ExpanderError::new(Some(line), "Missing left operand for default"));
            }
        }
        Ok(out)
    }
}
