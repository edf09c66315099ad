//! # Sales Entry Screen
//!
//! One screen instance per sales channel (toko, tiktok, gudang),
//! combining the ledger, the discount calculator, and the staged
//! submission workflow.
//!
//! ## Workflow
//! ```text
//! Editing ──► PaymentDetails ──► DownPayment (DP only) ──► Confirming
//!    ▲              │                                          │
//!    │              └── back/cancel ◄──────────────────────────┤
//!    │                                                         ▼
//!    │                                                    Submitting
//!    │                                                         │
//!    ├──── success: ledger reset, discount none, refetch ◄─────┤
//!    └──── failure: ledger preserved, static message     ◄─────┘
//! ```
//! While a submission is in flight a second submit is refused; the
//! original dashboard left the button enabled and could double-post.

use tracing::{debug, info, warn};

use kasir_client::types::{NewTransaction, SaleLine};
use kasir_client::ApiClient;
use kasir_core::discount::{self, DiscountMode};
use kasir_core::ledger::{lookup_item, EditOutcome, Ledger, RowField};
use kasir_core::money::Money;
use kasir_core::types::{InventoryItem, Location, PaymentMethod, PaymentStatus};
use kasir_core::validation::validate_customer_name;

use crate::error::{Notice, ScreenError, ScreenResult};

// =============================================================================
// Phases
// =============================================================================

/// Where the screen is in the submission workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalesPhase {
    #[default]
    Editing,
    PaymentDetails,
    DownPayment,
    Confirming,
    Submitting,
}

/// Payment fields collected in the dialog.
#[derive(Debug, Clone, Default)]
pub struct PaymentEntry {
    pub customer_name: String,
    pub method: Option<PaymentMethod>,
    pub status: PaymentStatus,
}

/// Human-readable summary shown in the confirm dialog before the
/// irreversible submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleSummary {
    pub lines: Vec<SummaryLine>,
    pub customer_name: String,
    pub payment_method: &'static str,
    pub grand_total: String,
    /// Present only on the DP path.
    pub down_payment: Option<String>,
    pub remaining: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub item_id: String,
    pub quantity: i64,
    pub total: String,
}

// =============================================================================
// Sales Screen
// =============================================================================

/// State for one sales-entry screen.
#[derive(Debug)]
pub struct SalesScreen {
    location: Location,
    ledger: Ledger,
    discount: DiscountMode,
    inventory: Vec<InventoryItem>,
    phase: SalesPhase,
    payment: PaymentEntry,
    down_payment: Money,
    notice: Option<Notice>,
}

impl SalesScreen {
    pub fn new(location: Location) -> Self {
        SalesScreen {
            location,
            ledger: Ledger::new(),
            discount: DiscountMode::None,
            inventory: Vec::new(),
            phase: SalesPhase::Editing,
            payment: PaymentEntry {
                customer_name: String::new(),
                method: None,
                status: PaymentStatus::Lunas,
            },
            down_payment: Money::zero(),
            notice: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn phase(&self) -> SalesPhase {
        self.phase
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn discount_mode(&self) -> DiscountMode {
        self.discount
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // -------------------------------------------------------------------------
    // Inventory Snapshot
    // -------------------------------------------------------------------------

    /// Fetches the stock snapshot for the active location. Called on
    /// screen open, after a location switch, and after every successful
    /// sale.
    pub async fn load_inventory(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!(location = %self.location, "loading inventory snapshot");
        self.inventory = client.inventory().fetch(self.location).await?;
        Ok(())
    }

    /// Switches the sales channel and refreshes the snapshot.
    pub async fn set_location(
        &mut self,
        client: &ApiClient,
        location: Location,
    ) -> ScreenResult<()> {
        self.location = location;
        self.load_inventory(client).await
    }

    /// Autocomplete matches for an item-id fragment.
    pub fn search_items(&self, query: &str) -> Vec<&InventoryItem> {
        lookup_item(&self.inventory, query)
    }

    // -------------------------------------------------------------------------
    // Ledger Edits
    // -------------------------------------------------------------------------

    pub fn add_row(&mut self) -> ScreenResult<()> {
        self.ledger.add_row()?;
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> ScreenResult<()> {
        self.ledger.remove_row(index)?;
        Ok(())
    }

    /// Applies a field edit; a stock clamp becomes a warning notice,
    /// exactly as the dashboard alerted.
    pub fn set_field(&mut self, index: usize, field: RowField) -> ScreenResult<EditOutcome> {
        let outcome = self.ledger.set_field(index, field)?;
        if let Some(stock) = outcome.clamped_to_stock {
            self.notice = Some(Notice::warning(format!(
                "Jumlah tidak boleh lebih dari stok yang tersedia ({}).",
                stock
            )));
        }
        Ok(outcome)
    }

    /// Fills a row from a picked autocomplete match.
    pub fn pick_item(&mut self, index: usize, item_id: &str) -> ScreenResult<()> {
        let item = self
            .inventory
            .iter()
            .find(|i| i.item_id == item_id)
            .cloned();
        match item {
            Some(item) => {
                self.ledger.select_item(index, &item)?;
                Ok(())
            }
            None => Err(kasir_core::ValidationError::InvalidFormat {
                field: "item_id".to_string(),
                reason: format!("{} is not in the current inventory", item_id),
            }
            .into()),
        }
    }

    // -------------------------------------------------------------------------
    // Discounts
    // -------------------------------------------------------------------------

    /// Switches the discount mode. Destructive: the previous mode's
    /// amounts reset and every per-row discount clears.
    pub fn set_discount_mode(&mut self, mode: DiscountMode) {
        self.ledger.clear_per_item_discounts();
        self.discount = mode;
    }

    pub fn grand_total(&self) -> Money {
        discount::grand_total(&self.ledger, self.discount)
    }

    pub fn grand_total_display(&self) -> String {
        discount::grand_total_display(&self.ledger, self.discount)
    }

    // -------------------------------------------------------------------------
    // Workflow Transitions
    // -------------------------------------------------------------------------

    /// `Editing -> PaymentDetails`.
    pub fn proceed_to_payment(&mut self) -> ScreenResult<()> {
        self.require_phase(SalesPhase::Editing, "proceed to payment")?;
        self.phase = SalesPhase::PaymentDetails;
        Ok(())
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.payment.customer_name = name.into();
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment.method = Some(method);
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment.status = status;
    }

    /// `PaymentDetails -> DownPayment | Confirming`. Requires a customer
    /// name and a selected method; violations stay inline.
    pub fn confirm_payment_details(&mut self) -> ScreenResult<()> {
        self.require_phase(SalesPhase::PaymentDetails, "confirm payment details")?;
        validate_customer_name(&self.payment.customer_name)?;
        let Some(method) = self.payment.method else {
            self.notice = Some(Notice::error("Please select a payment method."));
            return Err(kasir_core::ValidationError::Required {
                field: "payment_method".to_string(),
            }
            .into());
        };

        self.phase = if method.requires_down_payment() {
            SalesPhase::DownPayment
        } else {
            SalesPhase::Confirming
        };
        Ok(())
    }

    pub fn set_down_payment(&mut self, amount: Money) {
        self.down_payment = amount;
    }

    /// Remaining balance after the down payment. No floor: an
    /// over-payment shows negative, as the dashboard did. Whether that
    /// should be rejected is an open product question.
    pub fn remaining_balance(&self) -> Money {
        self.grand_total() - self.down_payment
    }

    /// `DownPayment -> Confirming`.
    pub fn confirm_down_payment(&mut self) -> ScreenResult<()> {
        self.require_phase(SalesPhase::DownPayment, "confirm down payment")?;
        self.phase = SalesPhase::Confirming;
        Ok(())
    }

    /// Backs out of any dialog to the editable form, keeping every
    /// field.
    pub fn cancel(&mut self) {
        if self.phase != SalesPhase::Submitting {
            self.phase = SalesPhase::Editing;
        }
    }

    /// The confirm dialog's summary.
    pub fn summary(&self) -> ScreenResult<SaleSummary> {
        self.require_phase(SalesPhase::Confirming, "summarize")?;
        let method = self.payment.method.ok_or(ScreenError::WrongPhase {
            action: "summarize without a payment method",
        })?;

        let lines = self
            .ledger
            .rows()
            .iter()
            .map(|row| SummaryLine {
                item_id: row.item_id.clone(),
                quantity: row.quantity,
                total: row.computed_total.format(),
            })
            .collect();

        let is_dp = method.requires_down_payment();
        Ok(SaleSummary {
            lines,
            customer_name: self.payment.customer_name.clone(),
            payment_method: method.label(),
            grand_total: self.grand_total_display(),
            down_payment: is_dp.then(|| self.down_payment.format()),
            remaining: is_dp.then(|| self.remaining_balance().format()),
        })
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Composes the transaction payload from the current ledger,
    /// discount mode, and payment entry.
    pub fn build_payload(&self) -> NewTransaction {
        let sales = self
            .ledger
            .rows()
            .iter()
            .map(|row| SaleLine {
                item_id: row.item_id.clone(),
                price: row.unit_price,
                quantity: row.quantity,
                discount_per_item: row.discount_per_item,
                description: row.description.clone(),
                total: row.computed_total,
            })
            .collect();

        NewTransaction {
            sales,
            discount_type: self.discount.discount_type(),
            discount_percent: self.discount.percent_value(),
            total_discount: discount::total_discount(&self.ledger, self.discount),
            payment_id: self.payment.method.map(|m| m.wire_id()).unwrap_or(0),
            payment_status: self.payment.status,
            customer_name: self.payment.customer_name.clone(),
            total_price: self.grand_total(),
            location: self.location,
            down_payment: self.down_payment,
        }
    }

    /// `Confirming -> Submitting -> Editing`. One network write, no
    /// retry. Success resets the form and refetches stock; failure
    /// preserves the ledger behind a static message.
    pub async fn submit(&mut self, client: &ApiClient) -> ScreenResult<()> {
        if self.phase == SalesPhase::Submitting {
            return Err(ScreenError::SubmissionInFlight);
        }
        self.require_phase(SalesPhase::Confirming, "submit")?;

        self.phase = SalesPhase::Submitting;
        let payload = self.build_payload();
        debug!(location = %self.location, lines = payload.sales.len(), "submitting transaction");

        match client.transactions().create(&payload).await {
            Ok(()) => {
                self.apply_success();
                info!(location = %self.location, "sale recorded, form reset");
                if let Err(err) = self.load_inventory(client).await {
                    // The sale went through; a stale snapshot is the
                    // lesser problem and the next refetch heals it.
                    warn!(error = %err, "post-sale inventory refetch failed");
                }
                Ok(())
            }
            Err(err) => {
                self.apply_failure();
                Err(err.into())
            }
        }
    }

    /// Resets everything after a persisted sale.
    fn apply_success(&mut self) {
        self.ledger.reset();
        self.discount = DiscountMode::None;
        self.payment = PaymentEntry {
            customer_name: String::new(),
            method: None,
            status: PaymentStatus::Lunas,
        };
        self.down_payment = Money::zero();
        self.phase = SalesPhase::Editing;
        self.notice = Some(Notice::success("Sale successful!"));
    }

    /// Returns to editing with the ledger intact after a failed write.
    fn apply_failure(&mut self) {
        self.phase = SalesPhase::Editing;
        self.notice = Some(Notice::error("Transaction failed!"));
    }

    fn require_phase(&self, expected: SalesPhase, action: &'static str) -> ScreenResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ScreenError::WrongPhase { action })
        }
    }

    /// Test/UI hook: replaces the inventory snapshot without a network
    /// call.
    pub fn set_inventory(&mut self, inventory: Vec<InventoryItem>) {
        self.inventory = inventory;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::types::DiscountType;

    fn item(item_id: &str, price: i64, stock: i64) -> InventoryItem {
        InventoryItem {
            item_id: item_id.to_string(),
            description: format!("Deskripsi {}", item_id),
            quantity: stock,
            price: Money::new(price),
        }
    }

    fn screen_with_one_line(price: i64, qty: i64) -> SalesScreen {
        let mut screen = SalesScreen::new(Location::Toko);
        screen.set_inventory(vec![item("BRG-001", price, 1_000)]);
        screen.pick_item(0, "BRG-001").unwrap();
        screen.set_field(0, RowField::Quantity(qty)).unwrap();
        screen
    }

    fn walk_to_confirming(screen: &mut SalesScreen, method: PaymentMethod) {
        screen.proceed_to_payment().unwrap();
        screen.set_customer_name("Budi");
        screen.set_payment_method(method);
        screen.confirm_payment_details().unwrap();
        if method.requires_down_payment() {
            screen.confirm_down_payment().unwrap();
        }
    }

    #[test]
    fn test_search_and_pick_autofills_row() {
        let mut screen = SalesScreen::new(Location::Toko);
        screen.set_inventory(vec![item("BRG-001", 150_000, 8), item("KMJ-002", 90_000, 2)]);

        let hits = screen.search_items("brg");
        assert_eq!(hits.len(), 1);

        screen.pick_item(0, "BRG-001").unwrap();
        let row = &screen.ledger().rows()[0];
        assert_eq!(row.unit_price, Money::new(150_000));
        assert_eq!(row.stock_snapshot, 8);
        assert_eq!(row.description, "Deskripsi BRG-001");
    }

    #[test]
    fn test_pick_unknown_item_is_validation_error() {
        let mut screen = SalesScreen::new(Location::Toko);
        assert!(screen.pick_item(0, "NOPE").is_err());
    }

    #[test]
    fn test_stock_clamp_raises_warning_notice() {
        let mut screen = SalesScreen::new(Location::Toko);
        screen.set_inventory(vec![item("BRG-001", 10_000, 3)]);
        screen.pick_item(0, "BRG-001").unwrap();

        screen.set_field(0, RowField::Quantity(9)).unwrap();

        let notice = screen.notice().unwrap();
        assert_eq!(notice.severity, crate::error::Severity::Warning);
        assert!(notice.text.contains("(3)"));
        assert_eq!(screen.ledger().rows()[0].quantity, 3);
    }

    #[test]
    fn test_mode_switch_clears_per_item_discounts() {
        let mut screen = screen_with_one_line(100_000, 2);
        screen.set_discount_mode(DiscountMode::PerItem);
        screen
            .set_field(0, RowField::DiscountPerItem(Money::new(10_000)))
            .unwrap();
        assert_eq!(screen.grand_total(), Money::new(180_000));

        screen.set_discount_mode(DiscountMode::percent(10.0));

        assert!(screen.ledger().rows()[0].discount_per_item.is_zero());
        assert_eq!(screen.grand_total(), Money::new(180_000)); // 200.000 - 10%
    }

    #[test]
    fn test_payment_details_require_name_and_method() {
        let mut screen = screen_with_one_line(100_000, 1);
        screen.proceed_to_payment().unwrap();

        // No name, no method.
        assert!(screen.confirm_payment_details().is_err());
        assert_eq!(screen.phase(), SalesPhase::PaymentDetails);

        screen.set_customer_name("Budi");
        assert!(screen.confirm_payment_details().is_err());

        screen.set_payment_method(PaymentMethod::Tunai);
        screen.confirm_payment_details().unwrap();
        assert_eq!(screen.phase(), SalesPhase::Confirming);
    }

    #[test]
    fn test_dp_method_routes_through_down_payment() {
        let mut screen = screen_with_one_line(100_000, 1);
        screen.proceed_to_payment().unwrap();
        screen.set_customer_name("Budi");
        screen.set_payment_method(PaymentMethod::Dp);
        screen.confirm_payment_details().unwrap();
        assert_eq!(screen.phase(), SalesPhase::DownPayment);

        screen.set_down_payment(Money::new(40_000));
        assert_eq!(screen.remaining_balance(), Money::new(60_000));

        screen.confirm_down_payment().unwrap();
        assert_eq!(screen.phase(), SalesPhase::Confirming);
    }

    #[test]
    fn test_overpayment_shows_negative_remainder() {
        let mut screen = screen_with_one_line(100_000, 1);
        screen.set_down_payment(Money::new(150_000));
        assert_eq!(screen.remaining_balance(), Money::new(-50_000));
    }

    #[test]
    fn test_dp_payload_carries_down_payment() {
        let mut screen = screen_with_one_line(100_000, 1);
        walk_to_confirming(&mut screen, PaymentMethod::Dp);
        screen.set_down_payment(Money::new(40_000));

        let payload = screen.build_payload();

        assert_eq!(payload.down_payment, Money::new(40_000));
        assert_eq!(payload.payment_id, 7);
        assert_eq!(payload.total_price, Money::new(100_000));
        assert_eq!(screen.remaining_balance(), Money::new(60_000));
    }

    #[test]
    fn test_percent_payload_figures() {
        let mut screen = screen_with_one_line(500_000, 2);
        screen.set_discount_mode(DiscountMode::percent(10.0));
        walk_to_confirming(&mut screen, PaymentMethod::Transfer);

        let payload = screen.build_payload();

        assert_eq!(payload.discount_type, DiscountType::Percent);
        assert!((payload.discount_percent - 10.0).abs() < f64::EPSILON);
        assert_eq!(payload.total_discount, Money::new(100_000));
        assert_eq!(payload.total_price, Money::new(900_000));
        assert_eq!(payload.payment_id, 3);
        assert_eq!(payload.location, Location::Toko);
    }

    #[test]
    fn test_summary_for_dp_sale() {
        let mut screen = screen_with_one_line(100_000, 1);
        walk_to_confirming(&mut screen, PaymentMethod::Dp);
        screen.set_down_payment(Money::new(40_000));

        let summary = screen.summary().unwrap();

        assert_eq!(summary.customer_name, "Budi");
        assert_eq!(summary.payment_method, "DP");
        assert_eq!(summary.grand_total, "Rp.100.000");
        assert_eq!(summary.down_payment.as_deref(), Some("Rp.40.000"));
        assert_eq!(summary.remaining.as_deref(), Some("Rp.60.000"));
        assert_eq!(summary.lines.len(), 1);
    }

    #[test]
    fn test_cancel_preserves_the_ledger() {
        let mut screen = screen_with_one_line(100_000, 2);
        walk_to_confirming(&mut screen, PaymentMethod::Tunai);

        screen.cancel();

        assert_eq!(screen.phase(), SalesPhase::Editing);
        assert_eq!(screen.ledger().rows()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_ledger() {
        // Nothing listens on this port, so the one write attempt fails
        // at the transport and the screen must fall back to Editing
        // with everything intact.
        let client = ApiClient::new(&kasir_client::ApiConfig::with_base_url("http://127.0.0.1:9"));
        let mut screen = screen_with_one_line(100_000, 2);
        walk_to_confirming(&mut screen, PaymentMethod::Tunai);

        let err = screen.submit(&client).await.unwrap_err();

        assert!(matches!(err, ScreenError::Api(_)));
        assert_eq!(screen.phase(), SalesPhase::Editing);
        assert_eq!(screen.ledger().rows()[0].quantity, 2);
        assert_eq!(screen.notice().unwrap().text, "Transaction failed!");
    }

    #[tokio::test]
    async fn test_second_submit_refused_while_in_flight() {
        let client = ApiClient::new(&kasir_client::ApiConfig::with_base_url("http://127.0.0.1:9"));
        let mut screen = screen_with_one_line(100_000, 1);
        walk_to_confirming(&mut screen, PaymentMethod::Tunai);
        screen.phase = SalesPhase::Submitting;

        let err = screen.submit(&client).await.unwrap_err();

        assert!(matches!(err, ScreenError::SubmissionInFlight));
    }

    #[tokio::test]
    async fn test_submit_refused_outside_confirming() {
        // Still in Editing; submit must be refused before any network
        // call, which is why a dead endpoint is fine here.
        let client = ApiClient::new(&kasir_client::ApiConfig::with_base_url("http://127.0.0.1:9"));
        let mut screen = screen_with_one_line(100_000, 1);

        let err = screen.submit(&client).await.unwrap_err();

        assert!(matches!(err, ScreenError::WrongPhase { .. }));
        assert_eq!(screen.phase(), SalesPhase::Editing);
    }
}
