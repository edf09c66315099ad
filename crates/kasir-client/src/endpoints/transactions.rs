//! Transaction endpoints: sale creation, listings, payment status.

use reqwest::Method;
use tracing::info;

use kasir_core::types::{PaymentStatus, SaleRecord, Transaction};

use crate::error::ClientResult;
use crate::types::{DiscountPercentRow, NewTransaction, PaymentStatusUpdate};
use crate::ApiClient;

/// Transaction endpoint group.
pub struct TransactionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        TransactionsApi { client }
    }

    /// `POST /api/transactions`: persist a composed sale. One attempt,
    /// no retry; the sales screen keeps its ledger on failure.
    pub async fn create(&self, body: &NewTransaction) -> ClientResult<()> {
        self.client
            .write(Method::POST, "/api/transactions", body)
            .await?;
        info!(
            customer = %body.customer_name,
            location = %body.location,
            total = %body.total_price,
            lines = body.sales.len(),
            "Transaction submitted"
        );
        Ok(())
    }

    /// `GET /api/transactions`: every recorded transaction.
    pub async fn list(&self) -> ClientResult<Vec<Transaction>> {
        self.client.fetch("/api/transactions").await
    }

    /// `GET /api/sales`: individual sale lines.
    pub async fn list_sales(&self) -> ClientResult<Vec<SaleRecord>> {
        self.client.fetch("/api/sales").await
    }

    /// `GET /api/transactions/discount_percent`: per-transaction
    /// discount percentages.
    pub async fn discount_percents(&self) -> ClientResult<Vec<DiscountPercentRow>> {
        self.client.fetch("/api/transactions/discount_percent").await
    }

    /// `PUT /api/transactions/payment/{transaction_id}`: the only field
    /// of a persisted transaction that may change.
    pub async fn update_payment_status(
        &self,
        transaction_id: i64,
        payment_status: PaymentStatus,
    ) -> ClientResult<()> {
        let body = PaymentStatusUpdate { payment_status };
        self.client
            .write(
                Method::PUT,
                &format!("/api/transactions/payment/{}", transaction_id),
                &body,
            )
            .await?;
        info!(transaction_id, "Payment status updated");
        Ok(())
    }
}
