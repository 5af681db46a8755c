use rust_decimal::{Decimal, RoundingStrategy};

/// Amount with Indian digit grouping (12,34,567.89).
///
/// Whole amounts print without decimals, everything else with exactly two.
pub fn format_amount(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        group_indian(amount, 0)
    } else {
        group_indian(amount, 2)
    }
}

/// Rupee amount for summaries, e.g. `₹24,182.87`.
pub fn format_inr(amount: Decimal) -> String {
    let formatted = format_amount(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-₹{rest}"),
        None => format!("₹{formatted}"),
    }
}

fn group_indian(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", dp as usize, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    // Last three digits, then pairs
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    let head_len = digits.len().saturating_sub(3);
    for (i, c) in digits[..head_len].iter().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if head_len > 0 {
        grouped.push(',');
    }
    grouped.extend(&digits[head_len..]);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_amounts_have_no_decimals() {
        assert_eq!(format_amount(dec!(100590)), "1,00,590");
        assert_eq!(format_amount(dec!(24000)), "24,000");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(12345678)), "1,23,45,678");
        assert_eq!(format_amount(dec!(590.00)), "590");
    }

    #[test]
    fn test_fractional_amounts_have_two_decimals() {
        assert_eq!(format_amount(dec!(182.8728571942)), "182.87");
        assert_eq!(format_amount(dec!(24182.8728)), "24,182.87");
        assert_eq!(format_amount(dec!(1234567.5)), "12,34,567.50");
        assert_eq!(format_amount(dec!(0.005)), "0.01");
    }

    #[test]
    fn test_inr_prefix_and_sign() {
        assert_eq!(format_inr(dec!(1015.96)), "₹1,015.96");
        assert_eq!(format_inr(dec!(-2500)), "-₹2,500");
    }
}
