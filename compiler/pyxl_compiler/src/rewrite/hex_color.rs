//! `#RGB`-style color literals.
//!
//! | Digits | Layout     | Emitted                         |
//! |--------|------------|---------------------------------|
//! | 1      | `Y`        | `gray(y)`                       |
//! | 2      | `YY`       | `rgba(y, y, y, 1)`              |
//! | 3      | `RGB`      | `rgb(r, g, b)` or `gray(r)`     |
//! | 4      | `RGBA`     | `rgba(r, g, b, a)`              |
//! | 6      | `RRGGBB`   | `rgb(r, g, b)` or `gray(r)`     |
//! | 8      | `RRGGBBAA` | `rgba(r, g, b, a)`              |
//!
//! Channels are normalized to `0..=1`.

use pyxl_diagnostic::{ErrorCode, Problem};


#[derive(Copy, Clone, Debug, PartialEq)]
struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

pub fn replace_hex_colors(line: &str) -> Result<String, Problem> {
    if !line.contains('#') {
        return Ok(line.to_string());
    }
    let mut out = String::with_capacity(line.len() + 16);
    let mut rest = line;
    while let Some(hash) = rest.find('#') {
        let digits_len = rest[hash + 1..]
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(rest.len() - hash - 1);
        out.push_str(&rest[..hash]);
        if digits_len == 0 {
            out.push('#');
        } else {
            let digits = &rest[hash + 1..hash + 1 + digits_len];
            out.push_str(&color_call(digits)?);
        }
        rest = &rest[hash + 1 + digits_len..];
    }
    out.push_str(rest);
    Ok(out)
}

fn color_call(digits: &str) -> Result<String, Problem> {
    let Color { r, g, b, a } = parse_hex_color(digits)?;
    Ok(match digits.len() {
        1 | 3 | 6 if is_gray(digits) => format!("gray({r})"),
        1 | 3 | 6 => format!("rgb({r}, {g}, {b})"),
        _ => format!("rgba({r}, {g}, {b}, {a})"),
    })
}

/// Equal red, green and blue digits.
fn is_gray(digits: &str) -> bool {
    let width = digits.len() / 3;
    if width == 0 {
        return true;
    }
    let lower = digits.to_ascii_lowercase();
    lower[..width] == lower[width..2 * width] && lower[width..2 * width] == lower[2 * width..3 * width]
}

fn parse_hex_color(digits: &str) -> Result<Color, Problem> {
    let channel = |from: usize, len: usize| parse_channel(&digits[from..from + len]);
    let color = match digits.len() {
        8 => Color { r: channel(0, 2), g: channel(2, 2), b: channel(4, 2), a: channel(6, 2) },
        6 => Color { r: channel(0, 2), g: channel(2, 2), b: channel(4, 2), a: 1.0 },
        4 => Color { r: channel(0, 1), g: channel(1, 1), b: channel(2, 1), a: channel(3, 1) },
        3 => Color { r: channel(0, 1), g: channel(1, 1), b: channel(2, 1), a: 1.0 },
        2 | 1 => {
            let y = channel(0, digits.len());
            Color { r: y, g: y, b: y, a: 1.0 }
        }
        _ => {
            return Err(Problem::new(
                ErrorCode::E0004,
                format!("Illegal hexadecimal color specification: '#{digits}'"),
            ))
        }
    };
    Ok(color)
}

/// One or two hex digits scaled to `0..=1`.
fn parse_channel(hex: &str) -> f64 {
    let max = if hex.len() == 2 { 255.0 } else { 15.0 };
    u32::from_str_radix(hex, 16).map_or(0.0, |value| f64::from(value) / max)
}
