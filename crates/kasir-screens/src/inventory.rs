//! # Dashboard: Inventory Overview
//!
//! The landing screen: pick a location, browse its stock, search by id
//! or description, and see what the shelf is worth. The two Koreksi
//! dialogs live here because corrections are made while looking at the
//! numbers being corrected.

use tracing::debug;

use kasir_client::types::{BulkItemChange, BulkItemUpdate};
use kasir_client::ApiClient;
use kasir_core::money::Money;
use kasir_core::types::{InventoryItem, Location};

use crate::correction::{PriceCorrectionForm, QuantityCorrectionForm};
use crate::error::{Notice, ScreenResult};

/// State for the inventory dashboard.
#[derive(Debug)]
pub struct DashboardScreen {
    location: Location,
    items: Vec<InventoryItem>,
    pub search_query: String,
    /// Koreksi Inventory dialog.
    pub koreksi: QuantityCorrectionForm,
    /// Koreksi Harga dialog.
    pub koreksi_harga: PriceCorrectionForm,
    notice: Option<Notice>,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        DashboardScreen::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        DashboardScreen {
            location: Location::Toko,
            items: Vec::new(),
            search_query: String::new(),
            koreksi: QuantityCorrectionForm::default(),
            koreksi_harga: PriceCorrectionForm::default(),
            notice: None,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Fetches the active location's stock.
    pub async fn refresh(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!(location = %self.location, "refreshing dashboard inventory");
        match client.inventory().fetch(self.location).await {
            Ok(items) => {
                self.items = items;
                self.notice = None;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::error("Failed to load inventory"));
                Err(err.into())
            }
        }
    }

    /// Switches location and refetches.
    pub async fn set_location(
        &mut self,
        client: &ApiClient,
        location: Location,
    ) -> ScreenResult<()> {
        self.location = location;
        self.refresh(client).await
    }

    /// Case-insensitive substring filter over item id and description.
    pub fn filtered(&self) -> Vec<&InventoryItem> {
        let needle = self.search_query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item.item_id.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Total stock value across the whole (unfiltered) listing.
    pub fn grand_total_value(&self) -> Money {
        self.items.iter().map(|item| item.stock_value()).sum()
    }

    /// Submits the quantity correction and refreshes on success.
    pub async fn submit_correction(&mut self, client: &ApiClient) -> ScreenResult<()> {
        self.koreksi.submit(client).await?;
        self.refresh(client).await
    }

    /// Submits the price correction and refreshes on success.
    pub async fn submit_price_correction(&mut self, client: &ApiClient) -> ScreenResult<()> {
        self.koreksi_harga.submit(client).await?;
        self.refresh(client).await
    }

    /// Applies a whole stock-take in one write (`PUT /api/items`) and
    /// refreshes. Used when a physical count corrects many rows at
    /// once instead of one Koreksi dialog per item.
    pub async fn submit_bulk_correction(
        &mut self,
        client: &ApiClient,
        changes: Vec<BulkItemChange>,
    ) -> ScreenResult<()> {
        debug!(items = changes.len(), "submitting bulk stock correction");
        let body = BulkItemUpdate { items: changes };
        match client.items().bulk_update(&body).await {
            Ok(()) => self.refresh(client).await,
            Err(err) => {
                self.notice = Some(Notice::error("Gagal memperbarui inventory. Coba lagi."));
                Err(err.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
