//! Number formatting helpers shared by the popup and the chart labels.

/// Insert `,` between every group of three digits in the integer part.
///
/// Integral values print without a fractional part (`78000.0` -> `"78,000"`),
/// other values keep their shortest decimal representation.
pub fn with_thousands_separators(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let raw = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    };

    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Population as shown in the popup: rounded to a whole person, grouped.
pub fn population(value: f64) -> String {
    with_thousands_separators(value.round())
}

/// Format a fraction in [0, 1] as a percentage with one decimal (`0.072` -> `"7.2%"`).
///
/// Ties round away from zero (`0.0625` -> `"6.3%"`).
pub fn rate_percent(rate: f64) -> String {
    format!("{:.1}%", (rate * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(1000.0, "1,000")]
    #[case(62910.0, "62,910")]
    #[case(1234567.0, "1,234,567")]
    #[case(-45000.0, "-45,000")]
    #[case(1234.5, "1,234.5")]
    fn test_with_thousands_separators(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(with_thousands_separators(value), expected);
    }

    #[test]
    fn test_population_rounds_before_grouping() {
        assert_eq!(population(78000.4), "78,000");
        assert_eq!(population(12999.6), "13,000");
    }

    #[rstest]
    #[case(0.072, "7.2%")]
    #[case(0.0, "0.0%")]
    #[case(0.1049, "10.5%")]
    #[case(1.0, "100.0%")]
    #[case(0.0625, "6.3%")]
    #[case(0.0125, "1.3%")]
    #[case(0.1125, "11.3%")]
    #[case(0.0025, "0.3%")]
    fn test_rate_percent(#[case] rate: f64, #[case] expected: &str) {
        assert_eq!(rate_percent(rate), expected);
    }
}
