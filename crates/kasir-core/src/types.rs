//! # Domain Types
//!
//! Core domain types shared by every screen: locations, inventory items,
//! payment metadata, and the persisted record shapes the backend returns.
//!
//! ## Identity Conventions
//! - `item_id`: business key for inventory, chosen by the store
//! - `transaction_id` / `sale_id` / `pindahan_id`: backend-assigned integers
//! - `group_id`: client-generated UUID correlating the rows of one transfer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Location
// =============================================================================

/// A sales/inventory channel, plus the damaged-goods holding location.
///
/// Wire format is the lowercase Indonesian name used in every endpoint
/// path and payload (`/api/inventory/toko`, `"location": "tiktok"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Store front.
    Toko,
    /// Warehouse.
    Gudang,
    /// TikTok marketplace channel.
    Tiktok,
    /// Damaged-goods holding, not a sales channel.
    Rusak,
}

impl Location {
    /// Path segment / wire value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Location::Toko => "toko",
            Location::Gudang => "gudang",
            Location::Tiktok => "tiktok",
            Location::Rusak => "rusak",
        }
    }

    /// The inventory table name the backend expects in correction and
    /// return payloads (`inventory_toko` etc).
    pub fn inventory_table(&self) -> String {
        format!("inventory_{}", self.as_str())
    }

    /// Channels a sale can be recorded against. Rusak only holds
    /// damaged goods.
    pub const fn sales_channels() -> [Location; 3] {
        [Location::Toko, Location::Gudang, Location::Tiktok]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A stocked item as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    /// Business key, unique per location.
    pub item_id: String,

    /// Free-text description shown next to the id.
    pub description: String,

    /// Units on hand. The backend owns this; the UI only reads it and
    /// requests corrections.
    pub quantity: i64,

    /// Unit price in whole rupiah.
    pub price: Money,
}

impl InventoryItem {
    /// Stock value of this line (quantity x unit price).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Payment methods with their numeric wire ids.
///
/// The backend stores the raw id; the labels are what the report screens
/// print. Id 7 (DP) routes the sale through down-payment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    Tunai,
    Debit,
    Transfer,
    Giro,
    Qr,
    Hutang,
    Dp,
}

impl PaymentMethod {
    /// Numeric id sent as `payment_id`.
    pub const fn wire_id(&self) -> i64 {
        match self {
            PaymentMethod::Tunai => 1,
            PaymentMethod::Debit => 2,
            PaymentMethod::Transfer => 3,
            PaymentMethod::Giro => 4,
            PaymentMethod::Qr => 5,
            PaymentMethod::Hutang => 6,
            PaymentMethod::Dp => 7,
        }
    }

    /// Reverse lookup from a stored `payment_id`.
    pub const fn from_wire_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(PaymentMethod::Tunai),
            2 => Some(PaymentMethod::Debit),
            3 => Some(PaymentMethod::Transfer),
            4 => Some(PaymentMethod::Giro),
            5 => Some(PaymentMethod::Qr),
            6 => Some(PaymentMethod::Hutang),
            7 => Some(PaymentMethod::Dp),
            _ => None,
        }
    }

    /// Display label as shown on the daily report.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Tunai",
            PaymentMethod::Debit => "Debit",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Giro => "Cek / GIRO",
            PaymentMethod::Qr => "QR",
            PaymentMethod::Hutang => "Hutang",
            PaymentMethod::Dp => "DP",
        }
    }

    /// Whether selecting this method requires a down-payment amount.
    pub const fn requires_down_payment(&self) -> bool {
        matches!(self, PaymentMethod::Dp)
    }
}

/// Whether a transaction has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentStatus {
    #[serde(rename = "lunas")]
    Lunas,
    #[serde(rename = "belum lunas")]
    BelumLunas,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Lunas
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// Wire tag for the discount mode applied to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    None,
    Percent,
    /// Per-item discount entered on each ledger row.
    Amount,
    /// Flat deduction from the grand total.
    Total,
}

impl Default for DiscountType {
    fn default() -> Self {
        DiscountType::None
    }
}

// =============================================================================
// Persisted Records
// =============================================================================

/// A transaction as the backend returns it from `GET /api/transactions`.
/// Immutable once persisted except for `payment_status`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub transaction_id: i64,
    pub discount_type: DiscountType,
    pub discount_percent: f64,
    pub total_discount: Money,
    pub payment_id: i64,
    pub payment_status: PaymentStatus,
    pub customer_name: String,
    pub location: Location,
    pub total_price: Money,
    #[serde(default)]
    pub down_payment: Money,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Payment method if the stored id is a known one.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_wire_id(self.payment_id)
    }
}

/// A sale line as returned by `GET /api/sales`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    pub sale_id: i64,
    pub item_id: String,
    pub quantity: i64,
    pub total: Money,
    pub transaction_id: i64,
    #[serde(default)]
    pub customer_name: String,
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// One row of transfer history from `GET /api/history`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransferRecord {
    pub pindahan_id: i64,
    pub item_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub destination: String,
    #[serde(default)]
    pub group_id: String,
    /// Unit price when the backend knows it; transfer rows predating the
    /// price column come back without one.
    #[serde(default)]
    pub price: Option<Money>,
}

// =============================================================================
// Session
// =============================================================================

/// Backend-assigned role controlling which views a login may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_wire_values() {
        assert_eq!(Location::Toko.as_str(), "toko");
        assert_eq!(Location::Rusak.as_str(), "rusak");
        assert_eq!(Location::Gudang.inventory_table(), "inventory_gudang");
        assert_eq!(
            serde_json::to_string(&Location::Tiktok).unwrap(),
            "\"tiktok\""
        );
    }

    #[test]
    fn test_payment_method_wire_ids_round_trip() {
        for id in 1..=7 {
            let method = PaymentMethod::from_wire_id(id).unwrap();
            assert_eq!(method.wire_id(), id);
        }
        assert!(PaymentMethod::from_wire_id(0).is_none());
        assert!(PaymentMethod::from_wire_id(8).is_none());
    }

    #[test]
    fn test_only_dp_requires_down_payment() {
        assert!(PaymentMethod::Dp.requires_down_payment());
        assert!(!PaymentMethod::Tunai.requires_down_payment());
        assert!(!PaymentMethod::Hutang.requires_down_payment());
    }

    #[test]
    fn test_payment_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::BelumLunas).unwrap(),
            "\"belum lunas\""
        );
        let parsed: PaymentStatus = serde_json::from_str("\"lunas\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Lunas);
    }

    #[test]
    fn test_discount_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&DiscountType::Percent).unwrap(),
            "\"percent\""
        );
        assert_eq!(
            serde_json::to_string(&DiscountType::None).unwrap(),
            "\"none\""
        );
    }

    #[test]
    fn test_stock_value() {
        let item = InventoryItem {
            item_id: "BRG-001".to_string(),
            description: "Kemeja batik".to_string(),
            quantity: 4,
            price: Money::new(150_000),
        };
        assert_eq!(item.stock_value(), Money::new(600_000));
    }
}
