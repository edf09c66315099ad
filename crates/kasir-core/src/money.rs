//! # Money Module
//!
//! Rupiah amounts as integer minor units.
//!
//! ## Why Integer Money?
//! The dashboard round-trips every amount through display strings
//! (`Rp.1.234.567`). Doing that math in floating point loses rupiah on
//! large carts; keeping amounts as `i64` makes parse/format lossless and
//! all arithmetic exact.
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::new(1_250_000);
//! assert_eq!(price.to_string(), "Rp.1.250.000");
//! assert_eq!(Money::parse("Rp.1.250.000"), price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A rupiah amount in whole units.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and corrections may go negative mid-calculation
/// - **Single field tuple struct**: zero-cost wrapper over i64
/// - **Never built from floats**: amounts enter via `new` or `parse` only
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    #[inline]
    pub const fn new(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Zero rupiah.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the raw rupiah amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a display string back into an amount.
    ///
    /// Accepts the forms the dashboard renders and the forms users type:
    /// an optional `Rp.`/`Rp` prefix, `.` thousand separators, `,`
    /// separators, and surrounding whitespace. Empty or unparseable input
    /// yields zero; this function never fails.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// assert_eq!(Money::parse("Rp.1.250.000").amount(), 1_250_000);
    /// assert_eq!(Money::parse("5000").amount(), 5_000);
    /// assert_eq!(Money::parse(""), Money::zero());
    /// assert_eq!(Money::parse("abc"), Money::zero());
    /// ```
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let stripped = trimmed
            .strip_prefix("Rp.")
            .or_else(|| trimmed.strip_prefix("Rp"))
            .unwrap_or(trimmed);

        let digits: String = stripped
            .chars()
            .filter(|c| *c != '.' && *c != ',' && !c.is_whitespace())
            .collect();

        digits.parse::<i64>().map(Money).unwrap_or_default()
    }

    /// Formats the amount with the `Rp.` prefix and id-ID thousands
    /// grouping. Same output as `Display`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Subtracts another amount, flooring the result at zero.
    ///
    /// Used for flat deductions that must never drive a total negative.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let total = Money::new(500_000);
    /// assert_eq!(total.saturating_deduct(Money::new(600_000)), Money::zero());
    /// ```
    #[inline]
    pub const fn saturating_deduct(&self, other: Money) -> Money {
        let result = self.0 - other.0;
        if result < 0 {
            Money(0)
        } else {
            Money(result)
        }
    }

    /// Multiplies by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount given in basis points (1000 = 10%)
    /// and returns the discounted amount.
    ///
    /// Integer math with half-up rounding on the discount value; i128
    /// intermediate to avoid overflow on large carts.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let subtotal = Money::new(1_000_000);
    /// assert_eq!(subtotal.apply_percentage_discount(1000).amount(), 900_000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        Money(self.0 - self.percentage_of(discount_bps).0)
    }

    /// The discount value itself for a rate in basis points.
    pub fn percentage_of(&self, bps: u32) -> Money {
        let value = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(value as i64)
    }

    /// Scales the amount by one thousand.
    ///
    /// The marketplace channel records prices in thousands and multiplies
    /// them out at submission time; this mirrors that behavior verbatim.
    /// The unit mismatch is an open product question, not something this
    /// layer should quietly normalize.
    #[inline]
    pub const fn scale_thousands(&self) -> Self {
        Money(self.0 * 1000)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders with the fixed `Rp.` prefix and `.` thousands separators,
/// matching what the dashboard shows everywhere.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp.{}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups: Vec<u64> = Vec::new();
    while value > 0 {
        groups.push(value % 1000);
        value /= 1000;
    }
    let mut out = String::new();
    for (i, group) in groups.iter().rev().enumerate() {
        if i == 0 {
            out.push_str(&group.to_string());
        } else {
            out.push('.');
            out.push_str(&format!("{:03}", group));
        }
    }
    out
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::new(0).to_string(), "Rp.0");
        assert_eq!(Money::new(999).to_string(), "Rp.999");
        assert_eq!(Money::new(1_000).to_string(), "Rp.1.000");
        assert_eq!(Money::new(12_050).to_string(), "Rp.12.050");
        assert_eq!(Money::new(1_250_000).to_string(), "Rp.1.250.000");
        assert_eq!(Money::new(-550).to_string(), "-Rp.550");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Money::parse("Rp.1.250.000").amount(), 1_250_000);
        assert_eq!(Money::parse("Rp1.250.000").amount(), 1_250_000);
        assert_eq!(Money::parse("1,250,000").amount(), 1_250_000);
        assert_eq!(Money::parse("  Rp.500 ").amount(), 500);
        assert_eq!(Money::parse("0"), Money::zero());
    }

    #[test]
    fn test_parse_invalid_is_zero() {
        assert_eq!(Money::parse(""), Money::zero());
        assert_eq!(Money::parse("   "), Money::zero());
        assert_eq!(Money::parse("abc"), Money::zero());
        assert_eq!(Money::parse("Rp."), Money::zero());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(10_000);
        let b = Money::new(2_500);
        assert_eq!((a + b).amount(), 12_500);
        assert_eq!((a - b).amount(), 7_500);
        assert_eq!((b * 4).amount(), 10_000);
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.amount(), 15_000);
    }

    #[test]
    fn test_saturating_deduct_floors_at_zero() {
        let total = Money::new(500_000);
        assert_eq!(total.saturating_deduct(Money::new(600_000)), Money::zero());
        assert_eq!(
            total.saturating_deduct(Money::new(100_000)).amount(),
            400_000
        );
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::new(1_000_000);
        assert_eq!(subtotal.apply_percentage_discount(1000).amount(), 900_000);
        assert_eq!(subtotal.percentage_of(1000).amount(), 100_000);
        // 12.5% of 1,000
        assert_eq!(Money::new(1_000).percentage_of(1250).amount(), 125);
    }

    #[test]
    fn test_scale_thousands() {
        assert_eq!(Money::new(12).scale_thousands().amount(), 12_000);
    }

    proptest! {
        /// Round-trip law: parse(format(x)) == x for non-negative amounts
        /// up to 10^12.
        #[test]
        fn prop_parse_format_round_trip(amount in 0i64..1_000_000_000_000) {
            let money = Money::new(amount);
            prop_assert_eq!(Money::parse(&money.to_string()), money);
        }
    }
}
