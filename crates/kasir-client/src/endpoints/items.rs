//! Item endpoints: reads, corrections, price updates, bulk changes.

use reqwest::Method;
use tracing::info;

use kasir_core::types::InventoryItem;

use crate::error::ClientResult;
use crate::types::{BulkItemCreate, BulkItemUpdate, ItemEdit, PriceUpdate, QuantityCorrection};
use crate::ApiClient;

/// Item endpoint group.
pub struct ItemsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ItemsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        ItemsApi { client }
    }

    /// `GET /api/items/{item_id}`: one item, for the edit screen.
    pub async fn get(&self, item_id: &str) -> ClientResult<InventoryItem> {
        self.client.fetch(&format!("/api/items/{}", item_id)).await
    }

    /// `PUT /api/items/{item_id}` with a location/quantity body: the
    /// Koreksi quantity correction, also used by goods returns.
    pub async fn correct_quantity(
        &self,
        item_id: &str,
        body: &QuantityCorrection,
    ) -> ClientResult<()> {
        self.client
            .write(Method::PUT, &format!("/api/items/{}", item_id), body)
            .await?;
        info!(item_id = %item_id, location = %body.location, quantity = body.quantity, "Quantity corrected");
        Ok(())
    }

    /// `PUT /api/items/{item_id}` with a full description/quantity/price
    /// body: the item edit screen.
    pub async fn edit(&self, item_id: &str, body: &ItemEdit) -> ClientResult<()> {
        self.client
            .write(Method::PUT, &format!("/api/items/{}", item_id), body)
            .await?;
        info!(item_id = %item_id, "Item edited");
        Ok(())
    }

    /// `PUT /api/items/price`: the Koreksi price correction.
    pub async fn update_price(&self, body: &PriceUpdate) -> ClientResult<()> {
        self.client
            .write(Method::PUT, "/api/items/price", body)
            .await?;
        info!(item_id = %body.item_id, price = %body.price, "Price corrected");
        Ok(())
    }

    /// `PUT /api/items`: bulk quantity update.
    pub async fn bulk_update(&self, body: &BulkItemUpdate) -> ClientResult<()> {
        self.client.write(Method::PUT, "/api/items", body).await
    }

    /// `PUT /api/items/rusak`: bulk update against the damaged-goods
    /// location (Retur with damaged marking).
    pub async fn bulk_update_damaged(&self, body: &BulkItemUpdate) -> ClientResult<()> {
        self.client
            .write(Method::PUT, "/api/items/rusak", body)
            .await
    }

    /// `POST /api/items`: bulk create.
    pub async fn bulk_create(&self, body: &BulkItemCreate) -> ClientResult<()> {
        self.client.write(Method::POST, "/api/items", body).await
    }
}
