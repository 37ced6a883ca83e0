//! Error values.

use thiserror::Error;

use crate::ErrorCode;


/// A failed compile.
///
/// `line` is a zero-based index into the original, pre-compaction source
/// of the unit that was compiled. Display renders it one-based.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {}: {message}", .line + 1)]
pub struct CompileError {
    pub code: ErrorCode,
    pub line: usize,
    pub message: String,
}

impl CompileError {
    pub fn new(code: ErrorCode, line: usize, message: impl Into<String>) -> Self {
        CompileError {
            code,
            line,
            message: message.into(),
        }
    }

    /// Moves the error by `offset` lines, used when a unit starts partway
    /// into its file.
    #[must_use]
    pub fn shifted(mut self, offset: usize) -> Self {
        self.line += offset;
        self
    }
}

/// A failure from a helper that does not know which line it is working on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Problem {
    pub code: ErrorCode,
    pub message: String,
}

impl Problem {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Problem {
            code,
            message: message.into(),
        }
    }

    /// Attaches the zero-based source line.
    pub fn at(self, line: usize) -> CompileError {
        CompileError {
            code: self.code,
            line,
            message: self.message,
        }
    }
}

/// A compile failure inside one file of a program.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{url}:{}: {}", .error.line + 1, .error.message)]
pub struct ProgramError {
    pub url: String,
    #[source]
    pub error: CompileError,
}

impl ProgramError {
    pub fn new(url: impl Into<String>, error: CompileError) -> Self {
        ProgramError {
            url: url.into(),
            error,
        }
    }
}
