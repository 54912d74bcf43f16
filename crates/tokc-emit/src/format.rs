//! Number formatting shared by the emitters.

/// Decimal places kept when rendering floats.
const PRECISION: usize = 4;

/// Render `value` with at most four decimals and no trailing zeros.
///
/// `0.5` renders as `0.5`, `16.0` as `16`, `1.0 / 3.0` as `0.3333`.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.*}", PRECISION, value);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn rounds_to_four_places() {
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(0.00001), "0");
        assert_eq!(format_number(-0.00001), "0");
    }
}
