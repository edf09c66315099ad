//! Request and response DTOs for the backend REST API.
//!
//! These mirror the wire contract exactly, field for field, which is why
//! they live here rather than in kasir-core: the core types model the
//! domain, these model what the backend happens to accept.

use serde::{Deserialize, Serialize};

use kasir_core::money::Money;
use kasir_core::types::{DiscountType, InventoryItem, Location, PaymentStatus, Role};

// =============================================================================
// Response Envelope
// =============================================================================

/// The `{ meta, data }` envelope every list/read endpoint wraps its
/// payload in.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub data: T,
}

/// Status block accompanying enveloped responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub status: String,
}

// =============================================================================
// Sales
// =============================================================================

/// One ledger row as submitted inside a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_id: String,
    pub price: Money,
    pub quantity: i64,
    pub discount_per_item: Money,
    pub description: String,
    pub total: Money,
}

/// Body of `POST /api/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub sales: Vec<SaleLine>,
    pub discount_type: DiscountType,
    pub discount_percent: f64,
    pub total_discount: Money,
    pub payment_id: i64,
    pub payment_status: PaymentStatus,
    pub customer_name: String,
    pub total_price: Money,
    pub location: Location,
    pub down_payment: Money,
}

/// Body of `PUT /api/transactions/payment/{transaction_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusUpdate {
    pub payment_status: PaymentStatus,
}

/// Row of `GET /api/transactions/discount_percent`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountPercentRow {
    pub transaction_id: i64,
    pub discount_percent: f64,
}

// =============================================================================
// Items
// =============================================================================

/// Body of `PUT /api/items/{item_id}` for a quantity correction or a
/// goods return. `location` is the backend's inventory table name
/// (`inventory_gudang` etc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityCorrection {
    pub location: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /api/items/{item_id}` for the item edit screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEdit {
    pub description: String,
    pub quantity: i64,
    pub price: Money,
}

/// Body of `PUT /api/items/price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub item_id: String,
    pub price: Money,
}

/// One entry of a bulk item update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemChange {
    pub item_id: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<i64>,
}

/// Body of `PUT /api/items` and `PUT /api/items/rusak`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemUpdate {
    pub items: Vec<BulkItemChange>,
}

/// Body of `POST /api/items` (bulk create).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemCreate {
    pub items: Vec<InventoryItem>,
}

// =============================================================================
// Transfers & Receiving
// =============================================================================

/// Body of `POST /api/transfer`, single-item form (the Pindahan screen).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source: Location,
    pub destination: Location,
    pub item_id: String,
    pub quantity: i64,
    pub description: String,
}

/// One item of a bulk transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferItem {
    pub item_id: String,
    pub quantity: i64,
}

/// Body of `POST /api/transfer`, bulk form. The `group_id` is generated
/// client-side so history rows of one transfer stay correlated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkTransferRequest {
    pub source: Location,
    pub destination: Location,
    pub group_id: String,
    pub items: Vec<TransferItem>,
}

/// Body of `POST /api/inventory` (Terima Barang: goods received into
/// the warehouse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveRequest {
    pub item_id: String,
    pub quantity: i64,
    pub description: String,
}

// =============================================================================
// Authentication
// =============================================================================

/// Body of `POST /api/verify-user`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Payload of the verify-user response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedUser {
    pub role: Role,
}

// =============================================================================
// Unit Tests
// =============================================================================
