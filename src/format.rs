use rust_decimal::Decimal;

/// Format an amount as currency with exactly 2 decimal places and Indian
/// digit grouping (last three digits, then groups of two).
/// e.g. `1234567.89` → `"₹12,34,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let grouped = group_indian(int_part);

    if val < Decimal::ZERO {
        format!("-₹{grouped}.{dec_part}")
    } else {
        format!("₹{grouped}.{dec_part}")
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = head
        .as_bytes()
        .rchunks(2)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect();
    groups.push(tail);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_amounts_ungrouped() {
        assert_eq!(format_amount(dec!(0)), "₹0.00");
        assert_eq!(format_amount(dec!(999.5)), "₹999.50");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_amount(dec!(50000)), "₹50,000.00");
        assert_eq!(format_amount(dec!(100000)), "₹1,00,000.00");
        assert_eq!(format_amount(dec!(1234567.89)), "₹12,34,567.89");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_amount(dec!(-2850)), "-₹2,850.00");
        assert_eq!(format_amount(Decimal::ZERO), "₹0.00");
    }

    #[test]
    fn test_two_decimal_places_always() {
        assert_eq!(format_amount(dec!(499)), "₹499.00");
        assert_eq!(format_amount(dec!(0.1)), "₹0.10");
    }
}
