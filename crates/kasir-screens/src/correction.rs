//! # Koreksi: Manual Inventory Corrections
//!
//! Corrections happen outside the normal sale/transfer flows: a stock
//! count fixes a quantity, a price correction fixes a unit price, and
//! the item editor rewrites a whole item record. Each sits behind a
//! confirm dialog and triggers an inventory refetch on success.

use tracing::debug;

use kasir_client::types::{ItemEdit, PriceUpdate, QuantityCorrection};
use kasir_client::ApiClient;
use kasir_core::money::Money;
use kasir_core::types::{InventoryItem, Location};
use kasir_core::validation::{validate_item_id, validate_price};

use crate::error::{Notice, ScreenError, ScreenResult};

// =============================================================================
// Quantity Correction (Koreksi Inventory)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrectionPhase {
    #[default]
    Editing,
    Confirming,
    Submitting,
}

/// The Koreksi Inventory dialog: item id, corrected quantity, location.
#[derive(Debug)]
pub struct QuantityCorrectionForm {
    pub item_id: String,
    pub quantity: Option<i64>,
    pub location: Location,
    phase: CorrectionPhase,
    notice: Option<Notice>,
}

impl Default for QuantityCorrectionForm {
    fn default() -> Self {
        QuantityCorrectionForm {
            item_id: String::new(),
            quantity: None,
            location: Location::Toko,
            phase: CorrectionPhase::Editing,
            notice: None,
        }
    }
}

impl QuantityCorrectionForm {
    pub fn phase(&self) -> CorrectionPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Opens the confirm dialog once item id and quantity are present.
    /// A correction may legitimately set quantity to zero, so only
    /// presence is checked here.
    pub fn open_confirm(&mut self) -> ScreenResult<()> {
        if self.phase != CorrectionPhase::Editing {
            return Err(ScreenError::WrongPhase {
                action: "open the confirm dialog",
            });
        }
        if validate_item_id(&self.item_id).is_err() || self.quantity.is_none() {
            self.notice = Some(Notice::error("Item ID, Quantity, dan Lokasi harus diisi!"));
            return Err(kasir_core::ValidationError::Required {
                field: "item_id".to_string(),
            }
            .into());
        }
        self.notice = None;
        self.phase = CorrectionPhase::Confirming;
        Ok(())
    }

    pub fn cancel(&mut self) {
        if self.phase != CorrectionPhase::Submitting {
            self.phase = CorrectionPhase::Editing;
        }
    }

    pub fn request(&self) -> QuantityCorrection {
        QuantityCorrection {
            location: self.location.inventory_table(),
            quantity: self.quantity.unwrap_or(0),
            description: None,
        }
    }

    /// `PUT /api/items/{item_id}`; success clears the dialog.
    pub async fn submit(&mut self, client: &ApiClient) -> ScreenResult<()> {
        if self.phase == CorrectionPhase::Submitting {
            return Err(ScreenError::SubmissionInFlight);
        }
        if self.phase != CorrectionPhase::Confirming {
            return Err(ScreenError::WrongPhase { action: "submit" });
        }
        self.phase = CorrectionPhase::Submitting;
        let body = self.request();
        debug!(item_id = %self.item_id, quantity = body.quantity, "submitting quantity correction");

        match client
            .items()
            .correct_quantity(self.item_id.trim(), &body)
            .await
        {
            Ok(()) => {
                self.item_id.clear();
                self.quantity = None;
                self.phase = CorrectionPhase::Editing;
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.phase = CorrectionPhase::Editing;
                self.notice = Some(Notice::error("Gagal memperbarui inventory. Coba lagi."));
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Price Correction (Koreksi Harga)
// =============================================================================

/// The Koreksi Harga dialog: item id and new price.
#[derive(Debug, Default)]
pub struct PriceCorrectionForm {
    pub item_id: String,
    pub price: Option<Money>,
    phase: CorrectionPhase,
    notice: Option<Notice>,
}

impl PriceCorrectionForm {
    pub fn phase(&self) -> CorrectionPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Opens the confirm dialog; the new price must be present and
    /// positive.
    pub fn open_confirm(&mut self) -> ScreenResult<()> {
        if self.phase != CorrectionPhase::Editing {
            return Err(ScreenError::WrongPhase {
                action: "open the confirm dialog",
            });
        }
        let valid = validate_item_id(&self.item_id).is_ok()
            && self.price.is_some_and(|p| validate_price(p).is_ok());
        if !valid {
            self.notice = Some(Notice::error("Item ID dan Harga Baru harus diisi!"));
            return Err(kasir_core::ValidationError::Required {
                field: "price".to_string(),
            }
            .into());
        }
        self.notice = None;
        self.phase = CorrectionPhase::Confirming;
        Ok(())
    }

    pub fn cancel(&mut self) {
        if self.phase != CorrectionPhase::Submitting {
            self.phase = CorrectionPhase::Editing;
        }
    }

    pub fn request(&self) -> PriceUpdate {
        PriceUpdate {
            item_id: self.item_id.trim().to_string(),
            price: self.price.unwrap_or_else(Money::zero),
        }
    }

    /// `PUT /api/items/price`; success clears the dialog.
    pub async fn submit(&mut self, client: &ApiClient) -> ScreenResult<()> {
        if self.phase == CorrectionPhase::Submitting {
            return Err(ScreenError::SubmissionInFlight);
        }
        if self.phase != CorrectionPhase::Confirming {
            return Err(ScreenError::WrongPhase { action: "submit" });
        }
        self.phase = CorrectionPhase::Submitting;
        let body = self.request();
        debug!(item_id = %body.item_id, price = %body.price, "submitting price correction");

        match client.items().update_price(&body).await {
            Ok(()) => {
                self.item_id.clear();
                self.price = None;
                self.phase = CorrectionPhase::Editing;
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.phase = CorrectionPhase::Editing;
                self.notice = Some(Notice::error("Gagal memperbarui harga. Coba lagi."));
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Item Editor
// =============================================================================

/// Full-record editor for a single item: description, quantity, price.
#[derive(Debug, Default)]
pub struct ItemEditScreen {
    item_id: String,
    item: Option<InventoryItem>,
    saving: bool,
    notice: Option<Notice>,
}

impl ItemEditScreen {
    pub fn new(item_id: impl Into<String>) -> Self {
        ItemEditScreen {
            item_id: item_id.into(),
            ..Default::default()
        }
    }

    pub fn item(&self) -> Option<&InventoryItem> {
        self.item.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// `GET /api/items/{item_id}` to seed the form.
    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!(item_id = %self.item_id, "loading item");
        match client.items().get(&self.item_id).await {
            Ok(item) => {
                self.item = Some(item);
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::error("Failed to load item data"));
                Err(err.into())
            }
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some(item) = self.item.as_mut() {
            item.description = description.into();
        }
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        if let Some(item) = self.item.as_mut() {
            item.quantity = quantity;
        }
    }

    pub fn set_price(&mut self, price: Money) {
        if let Some(item) = self.item.as_mut() {
            item.price = price;
        }
    }

    /// `PUT /api/items/{item_id}` with the edited record.
    pub async fn save(&mut self, client: &ApiClient) -> ScreenResult<()> {
        if self.saving {
            return Err(ScreenError::SubmissionInFlight);
        }
        let Some(item) = self.item.as_ref() else {
            return Err(ScreenError::WrongPhase {
                action: "save before loading",
            });
        };
        self.saving = true;
        let body = ItemEdit {
            description: item.description.clone(),
            quantity: item.quantity,
            price: item.price,
        };
        debug!(item_id = %self.item_id, "saving item edit");

        let outcome = client.items().edit(&self.item_id, &body).await;
        self.saving = false;
        match outcome {
            Ok(()) => {
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::error("Failed to save changes"));
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

    #[test]
    fn test_quantity_correction_requires_fields() {
        let mut form = QuantityCorrectionForm::default();
        assert!(form.open_confirm().is_err());
        assert_eq!(
            form.notice().unwrap().text,
            "Item ID, Quantity, dan Lokasi harus diisi!"
        );
    }

    #[test]
    fn test_quantity_correction_allows_zero() {
        let mut form = QuantityCorrectionForm {
            item_id: "BRG-001".to_string(),
            quantity: Some(0),
            location: Location::Gudang,
            ..Default::default()
        };
        form.open_confirm().unwrap();
        assert_eq!(form.phase(), CorrectionPhase::Confirming);

        let body = form.request();
        assert_eq!(body.location, "inventory_gudang");
        assert_eq!(body.quantity, 0);
        assert!(body.description.is_none());
    }

    #[test]
    fn test_price_correction_rejects_zero_price() {
        let mut form = PriceCorrectionForm {
            item_id: "BRG-001".to_string(),
            price: Some(Money::zero()),
            ..Default::default()
        };
        assert!(form.open_confirm().is_err());
        assert_eq!(
            form.notice().unwrap().text,
            "Item ID dan Harga Baru harus diisi!"
        );
    }

    #[test]
    fn test_price_correction_request_body() {
        let mut form = PriceCorrectionForm {
            item_id: "BRG-001".to_string(),
            price: Some(Money::new(175_000)),
            ..Default::default()
        };
        form.open_confirm().unwrap();
        let body = form.request();
        assert_eq!(body.item_id, "BRG-001");
        assert_eq!(body.price, Money::new(175_000));
    }

    #[test]
    fn test_item_edit_fields_mutate_loaded_item() {
        let mut screen = ItemEditScreen::new("BRG-001");
        screen.item = Some(InventoryItem {
            item_id: "BRG-001".to_string(),
            description: "Kemeja".to_string(),
            quantity: 3,
            price: Money::new(90_000),
        });

        screen.set_description("Kemeja batik");
        screen.set_quantity(5);
        screen.set_price(Money::new(95_000));

        let item = screen.item().unwrap();
        assert_eq!(item.description, "Kemeja batik");
        assert_eq!(item.quantity, 5);
        assert_eq!(item.price, Money::new(95_000));
    }

    #[tokio::test]
    async fn test_item_edit_save_requires_load() {
        let client = kasir_client::ApiClient::new(&kasir_client::ApiConfig::with_base_url(
            "http://127.0.0.1:9",
        ));
        let mut screen = ItemEditScreen::new("BRG-001");
        let err = screen.save(&client).await.unwrap_err();
        assert!(matches!(err, ScreenError::WrongPhase { .. }));
    }
}
