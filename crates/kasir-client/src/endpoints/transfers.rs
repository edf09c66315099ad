//! Transfer endpoints: moving stock between locations and reading the
//! transfer history.

use reqwest::Method;
use tracing::info;

use kasir_core::types::TransferRecord;

use crate::error::ClientResult;
use crate::types::{BulkTransferRequest, TransferRequest};
use crate::ApiClient;

/// Transfer endpoint group.
pub struct TransfersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TransfersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        TransfersApi { client }
    }

    /// `POST /api/transfer`, single-item form (the Pindahan screen).
    /// Source and destination are validated distinct before this is
    /// ever called.
    pub async fn transfer(&self, body: &TransferRequest) -> ClientResult<()> {
        self.client.write(Method::POST, "/api/transfer", body).await?;
        info!(
            item_id = %body.item_id,
            quantity = body.quantity,
            source = %body.source,
            destination = %body.destination,
            "Stock transferred"
        );
        Ok(())
    }

    /// `POST /api/transfer`, bulk form with a client-generated
    /// `group_id` correlating the resulting history rows.
    pub async fn transfer_bulk(&self, body: &BulkTransferRequest) -> ClientResult<()> {
        self.client.write(Method::POST, "/api/transfer", body).await?;
        info!(
            group_id = %body.group_id,
            items = body.items.len(),
            source = %body.source,
            destination = %body.destination,
            "Bulk stock transfer"
        );
        Ok(())
    }

    /// `GET /api/history`: all transfer history rows.
    pub async fn history(&self) -> ClientResult<Vec<TransferRecord>> {
        self.client.fetch("/api/history").await
    }
}
