//! Inventory endpoints: per-location listings and goods receiving.

use reqwest::Method;
use tracing::info;

use kasir_core::types::{InventoryItem, Location};

use crate::error::ClientResult;
use crate::types::ReceiveRequest;
use crate::ApiClient;

/// Inventory endpoint group.
pub struct InventoryApi<'a> {
    client: &'a ApiClient,
}

impl<'a> InventoryApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        InventoryApi { client }
    }

    /// `GET /api/inventory/{location}`: the stock snapshot for one
    /// location. Screens refetch this whenever the active location
    /// changes and after every successful sale.
    pub async fn fetch(&self, location: Location) -> ClientResult<Vec<InventoryItem>> {
        self.client
            .fetch(&format!("/api/inventory/{}", location))
            .await
    }

    /// `POST /api/inventory`: record goods received into the warehouse
    /// (Terima Barang).
    pub async fn receive(&self, body: &ReceiveRequest) -> ClientResult<()> {
        self.client
            .write(Method::POST, "/api/inventory", body)
            .await?;
        info!(item_id = %body.item_id, quantity = body.quantity, "Goods received");
        Ok(())
    }
}
