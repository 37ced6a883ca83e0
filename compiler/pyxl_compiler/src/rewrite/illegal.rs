//! Illegal-syntax scan for one guarded source line.
//!
//! Catches JavaScript spellings that PyxlScript replaces with its own
//! (`===`, `&&`, `!`, `null`, ...), keywords that have no PyxlScript
//! meaning, octal-looking numbers and, outside internal compiles, the
//! `$` prefix reserved for generated code and the runtime.

use logos::Logos;
use pyxl_diagnostic::{ErrorCode, Problem};
use pyxl_lexer_core::chars::is_identifier_char;


/// Token probe. Anything not listed lexes as an error and is ignored.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t]+")]
enum Probe {
    #[token("===")]
    StrictEq,
    #[token("!==")]
    StrictNotEq,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("&&")]
    AndAnd,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("||")]
    OrOr,
    #[token("&")]
    Amp,
    #[token("!")]
    Bang,
    #[token("'")]
    SingleQuote,
    #[token("$")]
    Dollar,
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    #[regex("[0-9]+")]
    Digits,
}

/// JavaScript words with no PyxlScript meaning.
const FORBIDDEN_WORDS: &[&str] = &[
    "toString",
    "try",
    "switch",
    "this",
    "delete",
    "null",
    "arguments",
    "undefined",
    "use",
    "using",
    "yield",
    "prototype",
    "var",
    "new",
    "auto",
    "as",
    "instanceof",
    "typeof",
    "class",
];

fn alternative(symbol: &str) -> Option<&'static str> {
    Some(match symbol {
        "|=" => "∪=\" or \"bitor",
        "&&" => "and",
        "&=" => "∩=\" or \"bitand",
        "&" => "∩\" or \"bitand",
        "!==" => "!=",
        "!" => "not",
        "var" => "let",
        "null" => "nil",
        "===" => "==",
        _ => return None,
    })
}

/// Rejects the first illegal construct on `line`.
///
/// Leading zeros are reported before any other problem on the line.
pub fn check_line(line: &str, internal_mode: bool) -> Result<(), Problem> {
    let mut illegal: Option<Problem> = None;
    let mut lexer = Probe::lexer(line);
    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            continue;
        };
        let span = lexer.span();
        let text = lexer.slice();
        match token {
            Probe::Digits if text.len() > 1 && text.starts_with('0') => {
                let before = line[..span.start].chars().next_back();
                if !before.is_some_and(|c| is_identifier_char(c) || c == '.' || c == '#') {
                    return Err(Problem::new(
                        ErrorCode::E0004,
                        "Numbers may not begin with a leading zero",
                    ));
                }
            }
            _ if illegal.is_some() => {}
            Probe::SingleQuote => {
                illegal = Some(Problem::new(
                    ErrorCode::E0003,
                    "Illegal single-quote ('). Maybe you meant to use double quote (\") for a string.",
                ));
            }
            Probe::Dollar if !internal_mode => {
                illegal = Some(Problem::new(
                    ErrorCode::E0006,
                    "Illegal symbol \"$\" (names beginning with \"$\" are reserved)",
                ));
            }
            Probe::Word if FORBIDDEN_WORDS.contains(&text) => illegal = Some(symbol(text)),
            Probe::StrictEq
            | Probe::StrictNotEq
            | Probe::AndAnd
            | Probe::AndAssign
            | Probe::OrAssign
            | Probe::Amp
            | Probe::Bang => illegal = Some(symbol(text)),
            _ => {}
        }
    }
    illegal.map_or(Ok(()), Err)
}

fn symbol(text: &str) -> Problem {
    let message = match alternative(text) {
        Some(alt) => format!("Illegal symbol \"{text}\" (maybe you meant \"{alt}\")"),
        None => format!("Illegal symbol \"{text}\""),
    };
    Problem::new(ErrorCode::E0003, message)
}
