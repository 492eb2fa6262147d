//! Number formatting for the calculator display.

/// Widest number the display shows, in characters.
pub const MAX_DISPLAY_WIDTH: usize = 9;

/// Decimal places kept on every evaluation result.
pub const RESULT_DECIMALS: i32 = 6;

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    // Values this large have no fractional digits left to round
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Avoid showing "-0" for results like -0.0000001
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Format a value in full, as it is carried into the next expression.
///
/// Whole numbers render without a fractional part.
pub fn format_carried(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format a value for the display.
///
/// Same rendering as [`format_carried`], cut (not rounded) to
/// [`MAX_DISPLAY_WIDTH`] characters.
pub fn format_display(value: f64) -> String {
    truncate(format_carried(value))
}

fn truncate(mut text: String) -> String {
    if let Some((idx, _)) = text.char_indices().nth(MAX_DISPLAY_WIDTH) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_removes_float_noise() {
        assert_eq!(round_to(0.1 + 0.2, RESULT_DECIMALS), 0.3);
        assert_eq!(round_to(1.0 / 3.0, RESULT_DECIMALS), 0.333333);
        assert_eq!(round_to(2.0 / 3.0, RESULT_DECIMALS), 0.666667);
    }

    #[test]
    fn test_huge_values_not_scaled_to_infinity() {
        assert_eq!(round_to(1e303, RESULT_DECIMALS), 1e303);
        assert_eq!(round_to(-f64::MAX, RESULT_DECIMALS), -f64::MAX);
    }

    #[test]
    fn test_negative_zero_normalized() {
        let value = round_to(-0.0000001, RESULT_DECIMALS);
        assert_eq!(format_display(value), "0");
    }

    #[test]
    fn test_whole_numbers_render_as_integers() {
        assert_eq!(format_display(6.0), "6");
        assert_eq!(format_display(-42.0), "-42");
        assert_eq!(format_carried(1e10), "10000000000");
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(format_display(0.5), "0.5");
        assert_eq!(format_display(12.25), "12.25");
    }

    #[test]
    fn test_truncated_not_rounded() {
        assert_eq!(format_display(0.666667), "0.666667");
        assert_eq!(format_display(1234.567891), "1234.5678");
        assert_eq!(format_display(1e10), "100000000");
        assert_eq!(format_display(1e10).len(), MAX_DISPLAY_WIDTH);
    }

    #[test]
    fn test_carried_keeps_full_precision() {
        assert_eq!(format_carried(1234.567891), "1234.567891");
    }
}
