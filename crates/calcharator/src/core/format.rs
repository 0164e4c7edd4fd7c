//! Canonical decimal text for results

/// Formats a result value for the expression buffer
///
/// Integral values print without a fractional part; anything else uses the
/// shortest representation that round-trips.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        // `as` saturates; only use it when the value fits
        if value.abs() < 9.2e18 {
            return (value as i64).to_string();
        }
        return format!("{value:.0}");
    }
    value.to_string()
}
