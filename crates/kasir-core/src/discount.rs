//! # Discount & Total Calculator
//!
//! Derives the grand total for a ledger under one of four discount
//! modes. Pure and idempotent: the same ledger and mode always produce
//! the same total, and computing it never mutates anything.
//!
//! ## Mode Switching
//! `none -> percent | per-item | total -> none`. Selecting a new mode is
//! destructive: the percent and flat amounts reset and every row's
//! per-item discount clears back to zero. That matches the dashboard's
//! observed behavior, where changing the dropdown wipes previous
//! discount input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ledger::Ledger;
use crate::money::Money;
use crate::types::DiscountType;

// =============================================================================
// Discount Mode
// =============================================================================

/// The active discount mode with its parameters.
///
/// Percentages are held in basis points (1000 = 10%) so the discount
/// math stays in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DiscountMode {
    #[default]
    None,
    Percent {
        bps: u32,
    },
    /// Each row carries its own `discount_per_item`; nothing extra is
    /// applied at the order level.
    PerItem,
    /// Flat deduction from the grand total, floored at zero.
    Total {
        amount: Money,
    },
}

impl DiscountMode {
    /// Builds the percent mode from a user-entered percentage.
    pub fn percent(percent: f64) -> Self {
        DiscountMode::Percent {
            bps: (percent * 100.0).round() as u32,
        }
    }

    /// The percentage as entered, for display and for the payload's
    /// `discount_percent` field.
    pub fn percent_value(&self) -> f64 {
        match self {
            DiscountMode::Percent { bps } => *bps as f64 / 100.0,
            _ => 0.0,
        }
    }

    /// Wire tag for the payload's `discount_type` field.
    pub const fn discount_type(&self) -> DiscountType {
        match self {
            DiscountMode::None => DiscountType::None,
            DiscountMode::Percent { .. } => DiscountType::Percent,
            DiscountMode::PerItem => DiscountType::Amount,
            DiscountMode::Total { .. } => DiscountType::Total,
        }
    }

    /// Whether the ledger rows should expose a per-item discount column.
    pub const fn uses_per_item_column(&self) -> bool {
        matches!(self, DiscountMode::PerItem)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Grand total for the ledger under the given mode.
///
/// - `None`: sum of row totals
/// - `Percent`: sum x (1 - p/100), basis-point integer math
/// - `PerItem`: sum of row totals (discounts already folded per row)
/// - `Total`: sum minus the flat amount, floored at zero
pub fn grand_total(ledger: &Ledger, mode: DiscountMode) -> Money {
    let subtotal = ledger.subtotal();
    match mode {
        DiscountMode::None | DiscountMode::PerItem => subtotal,
        DiscountMode::Percent { bps } => subtotal.apply_percentage_discount(bps),
        DiscountMode::Total { amount } => subtotal.saturating_deduct(amount),
    }
}

/// Grand total rendered for display, always via the money formatter.
pub fn grand_total_display(ledger: &Ledger, mode: DiscountMode) -> String {
    grand_total(ledger, mode).format()
}

/// The `total_discount` figure reported on the transaction payload.
///
/// - `PerItem`: sum of `discount_per_item x quantity` across rows
/// - `Percent`: the percentage's value against the subtotal
/// - `Total`: the flat amount as entered
/// - `None`: zero
pub fn total_discount(ledger: &Ledger, mode: DiscountMode) -> Money {
    match mode {
        DiscountMode::None => Money::zero(),
        DiscountMode::Percent { bps } => ledger.subtotal().percentage_of(bps),
        DiscountMode::PerItem => ledger.per_item_discount_total(),
        DiscountMode::Total { amount } => amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::RowField;
    use crate::types::InventoryItem;

    fn ledger_with_rows(rows: &[(i64, i64)]) -> Ledger {
        let mut ledger = Ledger::new();
        for (i, (price, qty)) in rows.iter().enumerate() {
            if i > 0 {
                ledger.add_row().unwrap();
            }
            let item = InventoryItem {
                item_id: format!("BRG-{:03}", i),
                description: String::new(),
                quantity: 1_000,
                price: Money::new(*price),
            };
            ledger.select_item(i, &item).unwrap();
            ledger.set_field(i, RowField::Quantity(*qty)).unwrap();
        }
        ledger
    }

    #[test]
    fn test_none_mode_is_plain_subtotal() {
        let ledger = ledger_with_rows(&[(100_000, 2), (50_000, 1)]);
        assert_eq!(grand_total(&ledger, DiscountMode::None), Money::new(250_000));
    }

    #[test]
    fn test_percent_mode_ten_percent_off_one_million() {
        // Three rows totaling 1.000.000, 10% off -> 900.000
        let ledger = ledger_with_rows(&[(400_000, 1), (350_000, 1), (250_000, 1)]);
        assert_eq!(ledger.subtotal(), Money::new(1_000_000));

        let mode = DiscountMode::percent(10.0);
        assert_eq!(grand_total(&ledger, mode), Money::new(900_000));
        assert_eq!(total_discount(&ledger, mode), Money::new(100_000));
    }

    #[test]
    fn test_total_mode_clamps_at_zero() {
        let ledger = ledger_with_rows(&[(500_000, 1)]);
        let mode = DiscountMode::Total {
            amount: Money::new(600_000),
        };
        assert_eq!(grand_total(&ledger, mode), Money::zero());
        assert_eq!(total_discount(&ledger, mode), Money::new(600_000));
    }

    #[test]
    fn test_per_item_mode_totals_come_from_rows() {
        let mut ledger = ledger_with_rows(&[(100_000, 2)]);
        ledger
            .set_field(0, RowField::DiscountPerItem(Money::new(10_000)))
            .unwrap();

        let mode = DiscountMode::PerItem;
        assert_eq!(grand_total(&ledger, mode), Money::new(180_000));
        assert_eq!(total_discount(&ledger, mode), Money::new(20_000));
    }

    #[test]
    fn test_grand_total_is_pure_and_idempotent() {
        let ledger = ledger_with_rows(&[(123_456, 3)]);
        let mode = DiscountMode::percent(7.5);
        let first = grand_total(&ledger, mode);
        let second = grand_total(&ledger, mode);
        assert_eq!(first, second);
    }

    #[test]
    fn test_percent_round_trip_helpers() {
        let mode = DiscountMode::percent(12.5);
        assert_eq!(mode, DiscountMode::Percent { bps: 1250 });
        assert!((mode.percent_value() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_discount_type_mapping() {
        assert_eq!(DiscountMode::None.discount_type(), DiscountType::None);
        assert_eq!(
            DiscountMode::percent(5.0).discount_type(),
            DiscountType::Percent
        );
        assert_eq!(DiscountMode::PerItem.discount_type(), DiscountType::Amount);
        assert_eq!(
            DiscountMode::Total {
                amount: Money::zero()
            }
            .discount_type(),
            DiscountType::Total
        );
    }

    #[test]
    fn test_display_goes_through_money_formatter() {
        let ledger = ledger_with_rows(&[(1_250_000, 1)]);
        assert_eq!(
            grand_total_display(&ledger, DiscountMode::None),
            "Rp.1.250.000"
        );
    }
}
