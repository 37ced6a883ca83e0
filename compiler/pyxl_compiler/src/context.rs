//! Per-invocation compiler state.
//!
//! A [`CompileContext`] is created once per `compile_source` or
//! `compile_program` call and threaded through every pass. It owns the
//! options, the symbol generator and the string table of the unit being
//! compiled, so no state survives between invocations.

use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::StringTable;


/// Switches for one compile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Privileged compile: `$` identifiers and privileged mode names are legal.
    pub internal_mode: bool,
    /// `false` enables the object-spread shim around the operator expander.
    pub parser_supports_object_spread: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            internal_mode: false,
            parser_supports_object_spread: true,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn internal(mut self, internal_mode: bool) -> Self {
        self.internal_mode = internal_mode;
        self
    }

    #[must_use]
    pub fn object_spread(mut self, supported: bool) -> Self {
        self.parser_supports_object_spread = supported;
        self
    }
}

/// Mints identifiers for compiler temporaries.
///
/// Names have the form `$_<base><n>$_`. The counter only grows, so two
/// names from one generator never collide, and the `$` prefix keeps them
/// out of reach of user code.
#[derive(Clone, Debug, Default)]
pub struct GenSym {
    next: u64,
}

impl GenSym {
    pub fn new() -> Self {
        GenSym::default()
    }

    pub fn fresh(&mut self, base: &str) -> String {
        self.next += 1;
        format!("$_{base}{}$_", self.next)
    }

    /// Number of names issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// State shared by every pass of one compiler invocation.
#[derive(Debug, Default)]
pub struct CompileContext {
    options: CompileOptions,
    gensym: GenSym,
    strings: StringTable,
}

impl CompileContext {
    pub fn new(options: CompileOptions) -> Self {
        CompileContext {
            options,
            gensym: GenSym::new(),
            strings: StringTable::new(),
        }
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// Replaces the options for the next unit; the symbol counter carries on.
    pub fn set_options(&mut self, options: CompileOptions) {
        self.options = options;
    }

    pub fn gensym(&mut self, base: &str) -> String {
        self.gensym.fresh(base)
    }

    /// Hides a compiler-generated literal behind a placeholder, returning
    /// the quoted placeholder.
    pub fn protect(&mut self, contents: &str) -> Result<String, Problem> {
        self.strings.protect(contents).ok_or_else(|| {
            Problem::new(
                ErrorCode::E0007,
                "Too many string literals in one file",
            )
        })
    }

    /// Restores every placeholder in `text`.
    pub fn restore(&self, text: &str) -> String {
        self.strings.restore(text)
    }

    pub(crate) fn begin_unit(&mut self, strings: StringTable) {
        self.strings = strings;
    }

    /// Restores `text` and drops the unit's string table.
    pub(crate) fn finish_unit(&mut self, text: &str) -> String {
        let restored = self.strings.restore(text);
        self.strings = StringTable::new();
        restored
    }
}
