//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are whole currency units (`i64`) at rest and on the wire; all
//! intermediate arithmetic runs on `Decimal` and is rounded half-up back to
//! whole units.

use rust_decimal::prelude::*;

/// Tolerance for comparing a client-proposed total against the server total
pub const CLIENT_TOTAL_TOLERANCE: i64 = 1;

/// Convert whole currency units to Decimal for calculation
#[inline]
pub fn to_decimal(value: i64) -> Decimal {
    Decimal::from(value)
}

/// Round a Decimal back to whole currency units, half-up
#[inline]
pub fn round_units(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Monetary value out of i64 range, defaulting to zero");
            0
        })
}

/// Percentage of an amount, as an unrounded Decimal
#[inline]
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_units(Decimal::new(1495, 1)), 150); // 149.5 → 150
        assert_eq!(round_units(Decimal::new(1494, 1)), 149); // 149.4 → 149
        assert_eq!(round_units(Decimal::new(-25, 1)), -3); // -2.5 → -3 (away from zero)
    }

    #[test]
    fn test_percent_of() {
        let d = percent_of(to_decimal(1500), to_decimal(10));
        assert_eq!(round_units(d), 150);

        // 33% of 1000 = 330
        let d = percent_of(to_decimal(1000), to_decimal(33));
        assert_eq!(round_units(d), 330);
    }
}
