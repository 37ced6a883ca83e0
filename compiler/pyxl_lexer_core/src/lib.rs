//! Low-level text machinery for PyxlScript.
//!
//! Everything the compiler does is a textual rewrite over a single line or a
//! block of lines. This crate holds the pieces those rewrites share:
//!
//! - [`chars`]: identifier and operator character tables
//! - [`cursor`]: a `char` cursor with byte positions
//! - [`scan`]: bracket matching, depth-aware search and word-boundary helpers
//! - [`source_buffer`]: the quoting guard that hides string literals behind
//!   single-character placeholders
//!
//! The crate has no knowledge of diagnostics. Failures are returned as small
//! issue values that the compiler converts into located errors.

pub mod chars;
pub mod cursor;
pub mod scan;
pub mod source_buffer;

pub use cursor::Cursor;
pub use scan::{
    find_matching, find_matching_backward, next_instance, UnbalancedBracket,
};
pub use source_buffer::{
    line_of, GuardIssue, GuardIssueKind, SourceBuffer, StringTable, ESCAPED_QUOTE, STACKED_IF_MARKER,
};
