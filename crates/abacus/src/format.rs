//! Result formatting for display

/// Default number of decimal places shown for a result
pub const MAX_DECIMAL_PLACES: usize = 10;

/// Formats a result with [`MAX_DECIMAL_PLACES`]
#[must_use]
pub fn format_number(value: f64) -> String {
    format_number_with(value, MAX_DECIMAL_PLACES)
}

/// Rounds to `places` decimal places and drops trailing zeros.
///
/// Non-finite values render as `"0"`, and so does negative zero after
/// rounding (e.g. `-0.00000000001`).
#[must_use]
pub fn format_number_with(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{value:.places$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
