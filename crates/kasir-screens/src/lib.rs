//! # kasir-screens: Screen State Machines for the Kasir Dashboard
//!
//! One module per screen, each owning its form state and its staged
//! workflow. Screens combine the pure logic in kasir-core with the
//! backend calls in kasir-client; the web UI renders whatever a screen
//! exposes and feeds events back into it.
//!
//! ## Screen Inventory
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  session / view     login, roles, the tagged View enum + guard    │
//! │  inventory          Dashboard: browse, search, stock valuation    │
//! │  sales              Penjualan: ledger + discount + submission     │
//! │  transfer           Pindahan: move stock between locations        │
//! │  goods              Terima Barang / Retur Barang                  │
//! │  correction         Koreksi quantity, Koreksi harga, item editor  │
//! │  reports            Laporan Harian/Bulanan, Pindahan Harian/Bln   │
//! │  history            History Transaksi, Telusuri Item              │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Single event-driven flow per screen instance. The only suspension
//! points are network awaits; no background tasks, timers, retries, or
//! request de-duplication exist anywhere in this crate. Workflow phase
//! guards refuse a second submission while one is in flight.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod correction;
pub mod error;
pub mod goods;
pub mod history;
pub mod inventory;
pub mod reports;
pub mod sales;
pub mod session;
pub mod transfer;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{Notice, ScreenError, ScreenResult, Severity};
pub use sales::{SalesPhase, SalesScreen};
pub use session::{AuthContext, Session};
pub use view::{resolve, RouteOutcome, View};
