//! # Terima & Retur: Goods Receiving and Returns
//!
//! Two small forms with the same shape: item id, quantity, description,
//! a confirm dialog, one write. Receiving adds stock to the warehouse;
//! a return sends stock back to the warehouse, or to the damaged-goods
//! location when flagged.

use tracing::debug;

use kasir_client::types::{
    BulkItemChange, BulkItemCreate, BulkItemUpdate, QuantityCorrection, ReceiveRequest,
};
use kasir_client::ApiClient;
use kasir_core::types::{InventoryItem, Location};
use kasir_core::validation::{validate_description, validate_item_id, validate_quantity};

use crate::error::{Notice, ScreenError, ScreenResult};

// =============================================================================
// Shared Form
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoodsPhase {
    #[default]
    Editing,
    Confirming,
    Submitting,
}

/// The common item/quantity/description trio both forms collect.
#[derive(Debug, Default)]
pub struct GoodsForm {
    pub item_id: String,
    pub quantity: Option<i64>,
    pub description: String,
    phase: GoodsPhase,
    notice: Option<Notice>,
}

impl GoodsForm {
    pub fn phase(&self) -> GoodsPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// All three fields are required on both forms.
    fn validate(&mut self) -> ScreenResult<()> {
        let check = validate_item_id(&self.item_id)
            .and_then(|()| validate_quantity(self.quantity.unwrap_or(0)))
            .and_then(|()| validate_description(&self.description));
        match check {
            Ok(()) => {
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::error("All fields are required."));
                Err(err.into())
            }
        }
    }

    fn open_confirm(&mut self) -> ScreenResult<()> {
        if self.phase != GoodsPhase::Editing {
            return Err(ScreenError::WrongPhase {
                action: "open the confirm dialog",
            });
        }
        self.validate()?;
        self.phase = GoodsPhase::Confirming;
        Ok(())
    }

    fn begin_submit(&mut self) -> ScreenResult<()> {
        if self.phase == GoodsPhase::Submitting {
            return Err(ScreenError::SubmissionInFlight);
        }
        if self.phase != GoodsPhase::Confirming {
            return Err(ScreenError::WrongPhase { action: "submit" });
        }
        self.phase = GoodsPhase::Submitting;
        Ok(())
    }

    /// Success path: clear the fields, back to editing, success notice.
    fn apply_success(&mut self, message: &str) {
        self.item_id.clear();
        self.quantity = None;
        self.description.clear();
        self.phase = GoodsPhase::Editing;
        self.notice = Some(Notice::success(message));
    }

    /// Failure path: fields preserved, back to editing, static message.
    fn apply_failure(&mut self, message: &str) {
        self.phase = GoodsPhase::Editing;
        self.notice = Some(Notice::error(message));
    }

    fn cancel(&mut self) {
        if self.phase != GoodsPhase::Submitting {
            self.phase = GoodsPhase::Editing;
        }
    }
}

// =============================================================================
// Terima Barang
// =============================================================================

/// Goods received into the warehouse.
#[derive(Debug, Default)]
pub struct ReceiveScreen {
    pub form: GoodsForm,
}

impl ReceiveScreen {
    pub fn new() -> Self {
        ReceiveScreen::default()
    }

    pub fn open_confirm(&mut self) -> ScreenResult<()> {
        self.form.open_confirm()
    }

    pub fn cancel(&mut self) {
        self.form.cancel()
    }

    /// Confirm dialog text:
    /// `Anda yakin menambah 4x BRG-001 ke Inventory Gudang?`.
    pub fn confirmation_text(&self) -> String {
        format!(
            "Anda yakin menambah {}x {} ke Inventory Gudang?",
            self.form.quantity.unwrap_or(0),
            self.form.item_id
        )
    }

    pub fn request(&self) -> ReceiveRequest {
        ReceiveRequest {
            item_id: self.form.item_id.trim().to_string(),
            quantity: self.form.quantity.unwrap_or(0),
            description: self.form.description.clone(),
        }
    }

    /// Registers items the store has never stocked before in one
    /// `POST /api/items` bulk create. Receiving existing items goes
    /// through [`submit`](Self::submit) instead.
    pub async fn register_new_items(
        &mut self,
        client: &ApiClient,
        items: Vec<InventoryItem>,
    ) -> ScreenResult<()> {
        debug!(items = items.len(), "registering new items");
        let body = BulkItemCreate { items };
        match client.items().bulk_create(&body).await {
            Ok(()) => {
                self.form
                    .apply_success("Item added to inventory successfully!");
                Ok(())
            }
            Err(err) => {
                self.form
                    .apply_failure("Error adding item. Please try again.");
                Err(err.into())
            }
        }
    }

    /// One `POST /api/inventory`; success clears the form.
    pub async fn submit(&mut self, client: &ApiClient) -> ScreenResult<()> {
        self.form.begin_submit()?;
        let body = self.request();
        debug!(item_id = %body.item_id, "receiving goods");

        match client.inventory().receive(&body).await {
            Ok(()) => {
                self.form
                    .apply_success("Item added to inventory successfully!");
                Ok(())
            }
            Err(err) => {
                self.form
                    .apply_failure("Error adding item. Please try again.");
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Retur Barang
// =============================================================================

/// Goods returned to the warehouse, or to the damaged-goods location
/// when marked damaged.
#[derive(Debug, Default)]
pub struct ReturnScreen {
    pub form: GoodsForm,
    /// Damaged returns route to the rusak location instead.
    pub damaged: bool,
}

impl ReturnScreen {
    pub fn new() -> Self {
        ReturnScreen::default()
    }

    pub fn open_confirm(&mut self) -> ScreenResult<()> {
        self.form.open_confirm()
    }

    pub fn cancel(&mut self) {
        self.form.cancel()
    }

    /// Confirm dialog text: `Anda yakin retur 4x BRG-001?`.
    pub fn confirmation_text(&self) -> String {
        format!(
            "Anda yakin retur {}x {}?",
            self.form.quantity.unwrap_or(0),
            self.form.item_id
        )
    }

    /// One write; success clears the form. A plain return adjusts the
    /// warehouse inventory; a damaged return goes through the rusak
    /// bulk endpoint.
    pub async fn submit(&mut self, client: &ApiClient) -> ScreenResult<()> {
        self.form.begin_submit()?;
        debug!(item_id = %self.form.item_id, damaged = self.damaged, "returning goods");

        let outcome = if self.damaged {
            let body = BulkItemUpdate {
                items: vec![BulkItemChange {
                    item_id: self.form.item_id.trim().to_string(),
                    quantity: self.form.quantity.unwrap_or(0),
                    sale_id: None,
                }],
            };
            client.items().bulk_update_damaged(&body).await
        } else {
            let body = QuantityCorrection {
                location: Location::Gudang.inventory_table(),
                quantity: self.form.quantity.unwrap_or(0),
                description: Some(self.form.description.clone()),
            };
            client
                .items()
                .correct_quantity(self.form.item_id.trim(), &body)
                .await
        };

        match outcome {
            Ok(()) => {
                self.form
                    .apply_success("Item return request submitted successfully!");
                Ok(())
            }
            Err(err) => {
                self.form
                    .apply_failure("Error returning item. Please try again.");
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_receive() -> ReceiveScreen {
        let mut screen = ReceiveScreen::new();
        screen.form.item_id = "BRG-001".to_string();
        screen.form.quantity = Some(4);
        screen.form.description = "kiriman supplier".to_string();
        screen
    }

    #[test]
    fn test_receive_requires_all_fields() {
        let mut screen = ReceiveScreen::new();
        assert!(screen.open_confirm().is_err());
        assert_eq!(
            screen.form.notice().unwrap().text,
            "All fields are required."
        );

        let mut screen = filled_receive();
        screen.form.description.clear();
        assert!(screen.open_confirm().is_err());
    }

    #[test]
    fn test_receive_confirm_and_request_body() {
        let mut screen = filled_receive();
        screen.open_confirm().unwrap();
        assert_eq!(screen.form.phase(), GoodsPhase::Confirming);
        assert_eq!(
            screen.confirmation_text(),
            "Anda yakin menambah 4x BRG-001 ke Inventory Gudang?"
        );

        let body = screen.request();
        assert_eq!(body.item_id, "BRG-001");
        assert_eq!(body.quantity, 4);
    }

    #[test]
    fn test_return_confirmation_text() {
        let mut screen = ReturnScreen::new();
        screen.form.item_id = "BRG-001".to_string();
        screen.form.quantity = Some(2);
        screen.form.description = "salah warna".to_string();
        screen.open_confirm().unwrap();
        assert_eq!(screen.confirmation_text(), "Anda yakin retur 2x BRG-001?");
    }

    #[test]
    fn test_cancel_returns_to_editing_with_fields() {
        let mut screen = filled_receive();
        screen.open_confirm().unwrap();
        screen.cancel();
        assert_eq!(screen.form.phase(), GoodsPhase::Editing);
        assert_eq!(screen.form.item_id, "BRG-001");
    }

    #[tokio::test]
    async fn test_submit_refused_outside_confirming() {
        let client = kasir_client::ApiClient::new(&kasir_client::ApiConfig::with_base_url(
            "http://127.0.0.1:9",
        ));
        let mut screen = filled_receive();
        let err = screen.submit(&client).await.unwrap_err();
        assert!(matches!(err, ScreenError::WrongPhase { .. }));
    }
}
