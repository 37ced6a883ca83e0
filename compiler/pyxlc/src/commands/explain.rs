//! The `explain` command: describe a compiler error code.

use pyxl_diagnostic::ErrorCode;

/// Prints the description of the error code named by `code_str`.
pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1004, E2003, E4001");
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
}
