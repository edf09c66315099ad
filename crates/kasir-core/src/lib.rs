//! # kasir-core: Pure Business Logic for the Kasir Dashboard
//!
//! Every calculation the dashboard performs lives here as pure functions
//! and plain state, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Kasir Dashboard                            │
//! │                                                                 │
//! │  Web UI (TypeScript, out of repo)                               │
//! │        │                                                        │
//! │  ┌─────▼─────────────────────────────────────────────────────┐  │
//! │  │ kasir-screens: per-screen state machines                  │  │
//! │  └─────┬────────────────────────────────────┬────────────────┘  │
//! │        │                                    │                   │
//! │  ┌─────▼──────────────────────┐   ┌─────────▼────────────────┐  │
//! │  │ kasir-core (THIS CRATE)    │   │ kasir-client             │  │
//! │  │ money · ledger · discount  │   │ REST calls to backend    │  │
//! │  │ reports · validation       │   │                          │  │
//! │  │ NO I/O, PURE FUNCTIONS     │   └──────────────────────────┘  │
//! │  └────────────────────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Rupiah amounts as integer minor units, parse/format
//! - [`types`] - Locations, inventory items, payment metadata, records
//! - [`ledger`] - The editable line-item list behind sales entry
//! - [`discount`] - Discount modes and grand-total derivation
//! - [`report`] - Bucketed aggregation for the report screens
//! - [`validation`] - Pre-network field validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output, nothing hidden
//! 2. **No I/O**: network access lives in kasir-client only
//! 3. **Integer money**: rupiah as `i64`, never floats
//! 4. **Typed errors**: never strings, never panics outside tests

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::DiscountMode;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{Ledger, LedgerRow, RowField};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows on a single sales-entry ledger.
///
/// Keeps a runaway form bounded; a real cart at this store never gets
/// near it.
pub const MAX_LEDGER_ROWS: usize = 100;
