// Presentation helpers. Nothing in core rounds; these run right before display.

/// Rounds half to even, the same rule `format!("{:.2}")` applies, so JSON
/// and text output never disagree on a tie.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Format a value as currency with thousands separators, e.g. `$1,742.41`.
pub fn format_currency(value: f64, symbol: &str, decimals: u32) -> String {
    let fixed = format!("{:.*}", decimals as usize, round_to(value, decimals).abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{}{}{}.{}", sign, symbol, grouped, fraction),
        None => format!("{}{}{}", sign, symbol, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1742.41375, 2), 1742.41);
        assert_eq!(round_to(1650.0, 2), 1650.0);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
    }

    #[test]
    fn test_ties_round_the_same_in_both_helpers() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(format_currency(0.125, "$", 2), "$0.12");
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(format_currency(0.375, "$", 2), "$0.38");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1742.41375, "$", 2), "$1,742.41");
        assert_eq!(format_currency(11742.41375, "₹", 2), "₹11,742.41");
        assert_eq!(format_currency(1234567.0, "", 0), "1,234,567");
        assert_eq!(format_currency(999.999, "$", 2), "$1,000.00");
        assert_eq!(format_currency(0.5, "$", 2), "$0.50");
        assert_eq!(format_currency(-12.5, "$", 2), "-$12.50");
    }
}
