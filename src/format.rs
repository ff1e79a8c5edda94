//! Result and display formatting.
//!
//! Results are rounded to a fixed number of decimal places so binary
//! floating-point noise (`0.1 + 0.2`) never reaches the display. Very large
//! and very small magnitudes switch to scientific notation.

/// Magnitudes at or above this are shown in scientific notation.
pub const SCIENTIFIC_UPPER: f64 = 1e12;
/// Nonzero magnitudes below this are shown in scientific notation.
pub const SCIENTIFIC_LOWER: f64 = 1e-6;
/// Fractional mantissa digits for scientific results.
pub const RESULT_EXP_DIGITS: usize = 6;
/// Fractional mantissa digits when shortening an overlong display.
pub const DISPLAY_EXP_DIGITS: usize = 3;

/// Format a computed or percent result.
pub fn format_result(value: f64, decimal_places: u32) -> String {
    let abs = value.abs();
    if abs >= SCIENTIFIC_UPPER || (value != 0.0 && abs < SCIENTIFIC_LOWER) {
        return to_exponential(value, RESULT_EXP_DIGITS);
    }
    let places = decimal_places as usize;
    let fixed = format!("{value:.places$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        _ => trimmed.to_string(),
    }
}

/// Shortest decimal form of `value`, with `-0` collapsed to `0`.
pub fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Scientific notation with `digits` fractional mantissa digits and a signed
/// exponent, e.g. `1.234560e+12`, `-5.000e-7`.
pub fn to_exponential(value: f64, digits: usize) -> String {
    let raw = format!("{value:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.strip_prefix('-') {
            Some(abs) => format!("{mantissa}e-{abs}"),
            None => format!("{mantissa}e+{exponent}"),
        },
        None => raw,
    }
}

/// The text a renderer shows for `operand`.
///
/// Operands longer than `max_chars` are shortened to scientific notation.
/// Text that does not parse (error markers) passes through untouched.
pub fn format_display(operand: &str, max_chars: usize) -> String {
    if operand.chars().count() <= max_chars {
        return operand.to_string();
    }
    match operand.parse::<f64>() {
        Ok(value) if value.is_finite() => to_exponential(value, DISPLAY_EXP_DIGITS),
        _ => operand.to_string(),
    }
}
