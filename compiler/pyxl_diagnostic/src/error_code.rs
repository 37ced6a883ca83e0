//! Error codes for every compiler failure.
//!
//! Each code is a unique identifier (e.g. `E1004`) whose first digit names
//! the compiler phase. Used by `pyxlc explain` and by tools consuming the
//! JSON output.

use std::fmt;


/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: lexical errors (quotes, illegal symbols, numeric literals)
/// - E1xxx: structural errors (brackets, indentation, block headers)
/// - E2xxx: lowering errors (FOR, WITH, function definitions)
/// - E3xxx: errors raised by the operator expander
/// - E4xxx: section and program errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E0xxx)
    /// Unbalanced or multi-line string literal
    E0001,
    /// Reserved private-use character in source
    E0002,
    /// Illegal symbol or keyword
    E0003,
    /// Illegal numeric literal
    E0004,
    /// Standalone `%`
    E0005,
    /// Reserved `$` identifier outside internal mode
    E0006,
    /// Too many string literals in one unit
    E0007,

    // Structural (E1xxx)
    /// Closing bracket with no opener
    E1001,
    /// Expression not closed before end of file
    E1002,
    /// `;` on the line closing a multi-line expression
    E1003,
    /// Inconsistent indentation
    E1004,
    /// Illegal or malformed block statement
    E1005,
    /// Missing `:` after a single-line statement
    E1006,
    /// First line indented
    E1007,
    /// Invalid use of the `&` elision marker
    E1008,
    /// `then` without matching `if` or `else`
    E1009,

    // Lowering (E2xxx)
    /// FOR loop without `<` or `≤`
    E2001,
    /// Illegal FOR loop variable
    E2002,
    /// Malformed WITH statement
    E2003,
    /// Illegal function modifier
    E2004,
    /// Illegal default argument syntax
    E2005,
    /// Malformed function definition
    E2006,
    /// Malformed debug call
    E2007,

    // Expander (E3xxx)
    /// Operator expander rejected the expression
    E3001,

    // Sections and programs (E4xxx)
    /// Illegal section name
    E4001,
    /// Section does not accept arguments
    E4002,
    /// `pop_mode` section without `from <Mode>`
    E4003,
    /// Privileged mode name outside internal compiles
    E4004,
    /// Section header with an empty body
    E4005,
    /// Section declared twice
    E4006,
    /// Program names a file that was not supplied
    E4007,
}

impl ErrorCode {
    /// All error code variants, in declaration order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E3001,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E4005,
        ErrorCode::E4006,
        ErrorCode::E4007,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4007 => "E4007",
        }
    }

    /// One-line description for `pyxlc explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "a string literal is not closed on the line where it starts",
            ErrorCode::E0002 => "the source contains a character from the reserved private-use range U+E000..U+F8FF",
            ErrorCode::E0003 => "a symbol or keyword from another language is not legal PyxlScript",
            ErrorCode::E0004 => "a numeric literal has a leading zero or does not fit in a number",
            ErrorCode::E0005 => "a `%` that does not follow a number; use `mod` for remainder",
            ErrorCode::E0006 => "identifiers containing `$` are reserved for the runtime",
            ErrorCode::E0007 => "a compile unit has more string literals than can be protected",
            ErrorCode::E1001 => "a closing bracket has no matching opening bracket",
            ErrorCode::E1002 => "a bracketed expression is still open at the end of the file",
            ErrorCode::E1003 => "`;` cannot follow the end of a multi-line expression",
            ErrorCode::E1004 => "a line is indented between its block's level and the parent's level",
            ErrorCode::E1005 => "an indented block follows a line that is not a block statement",
            ErrorCode::E1006 => "a single-line control statement is missing its `:`",
            ErrorCode::E1007 => "the first line of a section is indented",
            ErrorCode::E1008 => "the `&` elision marker is used where no block can be opened",
            ErrorCode::E1009 => "an inline `then` has no matching `if` or `else`",
            ErrorCode::E2001 => "a range FOR loop has neither `<` nor `≤`",
            ErrorCode::E2002 => "a range FOR loop variable is not a plain identifier",
            ErrorCode::E2003 => "a WITH statement does not have the form `with a, b ∊ obj`",
            ErrorCode::E2004 => "a function declaration uses a modifier other than `preserving_transform`",
            ErrorCode::E2005 => "a default argument is not of the form `name default value`",
            ErrorCode::E2006 => "a function definition is missing its name or argument list",
            ErrorCode::E2007 => "a debug_watch or debug_print call is not closed on its line",
            ErrorCode::E3001 => "the operator expander rejected an expression",
            ErrorCode::E4001 => "a section header names an unknown section",
            ErrorCode::E4002 => "only `enter` and `pop_mode` sections accept arguments",
            ErrorCode::E4003 => "a `pop_mode` section must name its source mode with `from`",
            ErrorCode::E4004 => "modes beginning with `_` or `$` are reserved for the system",
            ErrorCode::E4005 => "a section header is immediately followed by another header",
            ErrorCode::E4006 => "the same section is declared twice in one mode",
            ErrorCode::E4007 => "a program lists a script or mode whose source was not provided",
        }
    }

    /// Check if this is a lexical error (E0xxx range).
    pub fn is_lexical_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001
                | ErrorCode::E0002
                | ErrorCode::E0003
                | ErrorCode::E0004
                | ErrorCode::E0005
                | ErrorCode::E0006
                | ErrorCode::E0007
        )
    }

    /// Check if this is a structural error (E1xxx range).
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
                | ErrorCode::E1006
                | ErrorCode::E1007
                | ErrorCode::E1008
                | ErrorCode::E1009
        )
    }

    /// Check if this is a lowering error (E2xxx range).
    pub fn is_lowering_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
        )
    }

    pub fn is_expander_error(&self) -> bool {
        matches!(self, ErrorCode::E3001)
    }

    pub fn is_section_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E4001
                | ErrorCode::E4002
                | ErrorCode::E4003
                | ErrorCode::E4004
                | ErrorCode::E4005
                | ErrorCode::E4006
                | ErrorCode::E4007
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1004"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
