//! Currency helpers — two-decimal ITBMS arithmetic.
//!
//! All monetary amounts in the workspace are `rust_decimal::Decimal`,
//! rounded to two decimal places before they are persisted, compared,
//! or echoed over the wire.

use rust_decimal::Decimal;

/// ITBMS transaction-tax rate (7%).
pub fn itbms_rate() -> Decimal {
    Decimal::new(7, 2)
}

/// Round an amount to two-decimal currency precision.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Tax owed on a subtotal at the fixed ITBMS rate.
pub fn itbms_for(subtotal: Decimal) -> Decimal {
    round_currency(subtotal * itbms_rate())
}

/// Subtotal plus tax.
pub fn total_with_itbms(subtotal: Decimal) -> Decimal {
    round_currency(subtotal + itbms_for(subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_percent_of_one_hundred() {
        let subtotal = Decimal::new(10000, 2); // 100.00
        assert_eq!(itbms_for(subtotal), Decimal::new(700, 2)); // 7.00
        assert_eq!(total_with_itbms(subtotal), Decimal::new(10700, 2)); // 107.00
    }

    #[test]
    fn rounding_is_two_decimal() {
        let subtotal = Decimal::new(999, 2); // 9.99
        // 9.99 * 0.07 = 0.6993 -> 0.70
        assert_eq!(itbms_for(subtotal), Decimal::new(70, 2));
    }
}
