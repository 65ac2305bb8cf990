//! Number formatting and operand parsing

use crate::core::{CalcError, CalcResult};

/// Default distance from an integer below which a value renders as that integer
pub const DEFAULT_INTEGER_EPSILON: f64 = 1e-9;

/// Formats a value for the display and the history line
///
/// A value within `epsilon` of its nearest integer is rendered as that
/// integer (`-0` becomes `0`). Everything else uses the shortest decimal
/// representation that round-trips.
#[must_use]
pub fn format_number(value: f64, epsilon: f64) -> String {
    let nearest = value.round();
    if value.is_finite() && (value - nearest).abs() < epsilon {
        if nearest == 0.0 {
            return "0".to_string();
        }
        return format!("{nearest}");
    }
    format!("{value}")
}

/// Parses an input buffer into a finite operand
pub fn parse_operand(buffer: &str) -> CalcResult<f64> {
    match buffer.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::Parse(buffer.to_string())),
    }
}
