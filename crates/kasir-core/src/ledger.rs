//! # Line-Item Ledger
//!
//! The editable row list behind every sales-entry screen.
//!
//! ## Invariants
//! - Rows keep insertion order; the row index is the identity used by
//!   edits and removal
//! - At least one row exists at all times
//! - `quantity <= stock_snapshot` per row, clamped on entry with a
//!   warning rather than a hard error
//! - `computed_total = max(0, (unit_price - discount_per_item) * quantity)`
//!
//! ## Edit Flow
//! ```text
//! type item id ──► lookup_item() ──► select_item() freezes price/stock
//!       │
//! edit qty/price/discount ──► set_field() recomputes that row only
//!       │
//! add_row() / remove_row() reshape the list
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::InventoryItem;
use crate::MAX_LEDGER_ROWS;

// =============================================================================
// Ledger Row
// =============================================================================

/// One editable sale line.
///
/// `unit_price`, `description`, and `stock_snapshot` are frozen copies
/// taken when an inventory item is picked; a later inventory refresh does
/// not rewrite rows already on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerRow {
    pub item_id: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub discount_per_item: Money,
    pub computed_total: Money,
    pub description: String,
    /// Units available at the location when the item was picked.
    pub stock_snapshot: i64,
}

impl LedgerRow {
    /// A blank row: quantity 1, no discount, nothing picked yet.
    pub fn blank() -> Self {
        LedgerRow {
            item_id: String::new(),
            unit_price: Money::zero(),
            quantity: 1,
            discount_per_item: Money::zero(),
            computed_total: Money::zero(),
            description: String::new(),
            stock_snapshot: 0,
        }
    }

    /// Recomputes this row's total. Only ever called for the edited row;
    /// a keystroke never walks the whole ledger.
    fn recompute_total(&mut self) {
        let gross = self.unit_price.multiply_quantity(self.quantity);
        let discount = self.discount_per_item.multiply_quantity(self.quantity);
        self.computed_total = gross.saturating_deduct(discount);
    }
}

// =============================================================================
// Field Edits
// =============================================================================

/// A typed field edit targeting one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowField {
    ItemId(String),
    UnitPrice(Money),
    Quantity(i64),
    DiscountPerItem(Money),
}

/// Outcome of a field edit.
///
/// A clamped quantity is a warning, not an error: the edit still lands
/// (at the clamped value) and the screen shows the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
    /// Set when the entered quantity exceeded the stock snapshot and was
    /// clamped down to it.
    pub clamped_to_stock: Option<i64>,
}

// =============================================================================
// Ledger
// =============================================================================

/// Ordered, editable list of sale lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ledger {
    rows: Vec<LedgerRow>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

impl Ledger {
    /// Creates a ledger with a single blank row.
    pub fn new() -> Self {
        Ledger {
            rows: vec![LedgerRow::blank()],
        }
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a blank row.
    pub fn add_row(&mut self) -> CoreResult<()> {
        if self.rows.len() >= MAX_LEDGER_ROWS {
            return Err(CoreError::LedgerTooLarge {
                max: MAX_LEDGER_ROWS,
            });
        }
        self.rows.push(LedgerRow::blank());
        Ok(())
    }

    /// Removes a row by index.
    ///
    /// Removing the sole remaining row is a no-op (the form always shows
    /// at least one row); an out-of-range index is an error.
    pub fn remove_row(&mut self, index: usize) -> CoreResult<()> {
        if index >= self.rows.len() {
            return Err(CoreError::RowNotFound(index));
        }
        if self.rows.len() == 1 {
            return Err(CoreError::LastRow);
        }
        self.rows.remove(index);
        Ok(())
    }

    /// Applies a field edit to one row and recomputes that row's total.
    ///
    /// Quantity edits clamp to the row's stock snapshot; the outcome
    /// reports the clamp so the screen can warn.
    pub fn set_field(&mut self, index: usize, field: RowField) -> CoreResult<EditOutcome> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(CoreError::RowNotFound(index))?;

        let mut outcome = EditOutcome::default();
        match field {
            RowField::ItemId(item_id) => {
                row.item_id = item_id;
                return Ok(outcome);
            }
            RowField::UnitPrice(price) => row.unit_price = price,
            RowField::Quantity(qty) => {
                let qty = qty.max(0);
                if qty > row.stock_snapshot {
                    outcome.clamped_to_stock = Some(row.stock_snapshot);
                    row.quantity = row.stock_snapshot;
                } else {
                    row.quantity = qty;
                }
            }
            RowField::DiscountPerItem(discount) => row.discount_per_item = discount,
        }

        row.recompute_total();
        Ok(outcome)
    }

    /// Fills a row from a picked inventory item: id, frozen unit price,
    /// description, and the stock snapshot the quantity clamp works from.
    pub fn select_item(&mut self, index: usize, item: &InventoryItem) -> CoreResult<()> {
        let row = self
            .rows
            .get_mut(index)
            .ok_or(CoreError::RowNotFound(index))?;

        row.item_id = item.item_id.clone();
        row.unit_price = item.price;
        row.description = item.description.clone();
        row.stock_snapshot = item.quantity;
        if row.quantity > row.stock_snapshot {
            row.quantity = row.stock_snapshot;
        }
        row.recompute_total();
        Ok(())
    }

    /// Clears every row's per-item discount and recomputes. Invoked when
    /// the discount mode changes; switching modes is destructive.
    pub fn clear_per_item_discounts(&mut self) {
        for row in &mut self.rows {
            if !row.discount_per_item.is_zero() {
                row.discount_per_item = Money::zero();
                row.recompute_total();
            }
        }
    }

    /// Sum of row totals before any order-level discount.
    pub fn subtotal(&self) -> Money {
        self.rows.iter().map(|r| r.computed_total).sum()
    }

    /// Sum of per-item discounts across the ledger
    /// (`discount_per_item * quantity` per row).
    pub fn per_item_discount_total(&self) -> Money {
        self.rows
            .iter()
            .map(|r| r.discount_per_item.multiply_quantity(r.quantity))
            .sum()
    }

    /// Resets to a single blank row after a successful submission.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.rows.push(LedgerRow::blank());
    }
}

// =============================================================================
// Item Lookup
// =============================================================================

/// Case-insensitive substring match over the loaded inventory snapshot.
/// Drives the autocomplete picker as the user types an item id.
pub fn lookup_item<'a>(inventory: &'a [InventoryItem], query: &str) -> Vec<&'a InventoryItem> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    inventory
        .iter()
        .filter(|item| item.item_id.to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
