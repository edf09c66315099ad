//! # History Screens
//!
//! Transaction history (filter by customer, newest first, payment-status
//! correction) and the item lookup over sale rows.

use tracing::debug;

use kasir_client::types::DiscountPercentRow;
use kasir_client::ApiClient;
use kasir_core::report::paginate;
use kasir_core::types::{PaymentStatus, SaleRecord, Transaction};

use crate::error::ScreenResult;
use crate::reports::LoadState;

/// Page size of the transaction history table.
pub const TRANSACTION_PAGE_SIZE: usize = 50;

// =============================================================================
// History Transaksi
// =============================================================================

/// Transaction history state.
#[derive(Debug, Default)]
pub struct TransactionHistoryScreen {
    transactions: Vec<Transaction>,
    discount_percents: Vec<DiscountPercentRow>,
    pub search_query: String,
    pub page: usize,
    state: LoadState,
}

impl TransactionHistoryScreen {
    pub fn new() -> Self {
        TransactionHistoryScreen::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Static failure message for this screen.
    pub const LOAD_FAILED_MESSAGE: &'static str =
        "Error fetching transaction history. Please try again.";

    /// Fetches all transactions plus the per-transaction discount
    /// percentages.
    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!("loading transaction history");
        let fetched = async {
            let transactions = client.transactions().list().await?;
            let discount_percents = client.transactions().discount_percents().await?;
            Ok::<_, kasir_client::ClientError>((transactions, discount_percents))
        }
        .await;

        match fetched {
            Ok((transactions, discount_percents)) => {
                self.transactions = transactions;
                self.discount_percents = discount_percents;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err.into())
            }
        }
    }

    /// Case-insensitive substring filter on customer name, sorted by
    /// `transaction_id` descending (newest faktur first).
    pub fn filtered(&self) -> Vec<&Transaction> {
        let needle = self.search_query.to_lowercase();
        let mut rows: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|tx| tx.customer_name.to_lowercase().contains(&needle))
            .collect();
        rows.sort_by(|a, b| b.transaction_id.cmp(&a.transaction_id));
        rows
    }

    /// The visible page of the filtered table.
    pub fn page_rows(&self) -> Vec<&Transaction> {
        let rows = self.filtered();
        paginate(&rows, self.page, TRANSACTION_PAGE_SIZE).to_vec()
    }

    /// Recorded discount percentage for a transaction, when the backend
    /// has one.
    pub fn discount_percent_for(&self, transaction_id: i64) -> Option<f64> {
        self.discount_percents
            .iter()
            .find(|row| row.transaction_id == transaction_id)
            .map(|row| row.discount_percent)
    }

    /// Corrects a transaction's payment status, the only mutation a
    /// persisted transaction allows, and mirrors it locally on success.
    pub async fn set_payment_status(
        &mut self,
        client: &ApiClient,
        transaction_id: i64,
        status: PaymentStatus,
    ) -> ScreenResult<()> {
        client
            .transactions()
            .update_payment_status(transaction_id, status)
            .await?;
        if let Some(tx) = self
            .transactions
            .iter_mut()
            .find(|tx| tx.transaction_id == transaction_id)
        {
            tx.payment_status = status;
        }
        Ok(())
    }
}

// =============================================================================
// Telusuri Item
// =============================================================================

/// Sale rows searched by item id.
#[derive(Debug, Default)]
pub struct ItemLookupScreen {
    sales: Vec<SaleRecord>,
    pub search_query: String,
    state: LoadState,
}

impl ItemLookupScreen {
    pub fn new() -> Self {
        ItemLookupScreen::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!("loading sales for item lookup");
        match client.transactions().list_sales().await {
            Ok(sales) => {
                self.sales = sales;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err.into())
            }
        }
    }

    /// Case-insensitive substring filter on item id.
    pub fn filtered(&self) -> Vec<&SaleRecord> {
        let needle = self.search_query.to_lowercase();
        self.sales
            .iter()
            .filter(|sale| sale.item_id.to_lowercase().contains(&needle))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::money::Money;
    use kasir_core::types::{DiscountType, Location};

    fn tx(id: i64, customer: &str) -> Transaction {
        Transaction {
            transaction_id: id,
            discount_type: DiscountType::None,
            discount_percent: 0.0,
            total_discount: Money::zero(),
            payment_id: 1,
            payment_status: PaymentStatus::BelumLunas,
            customer_name: customer.to_string(),
            location: Location::Toko,
            total_price: Money::new(100_000),
            down_payment: Money::zero(),
            timestamp: "2025-02-07T09:00:00Z".parse().unwrap(),
        }
    }

    fn sale(id: i64, item_id: &str) -> SaleRecord {
        SaleRecord {
            sale_id: id,
            item_id: item_id.to_string(),
            quantity: 1,
            total: Money::new(50_000),
            transaction_id: id,
            customer_name: String::new(),
            timestamp: None,
        }
    }

    #[test]
    fn test_filter_by_customer_sorted_desc() {
        let mut screen = TransactionHistoryScreen::new();
        screen.transactions = vec![tx(1, "Budi"), tx(3, "Budiman"), tx(2, "Sari")];

        screen.search_query = "budi".to_string();
        let rows = screen.filtered();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction_id, 3);
        assert_eq!(rows[1].transaction_id, 1);
    }

    #[test]
    fn test_history_pagination_at_fifty() {
        let mut screen = TransactionHistoryScreen::new();
        screen.transactions = (1..=120).map(|i| tx(i, "Budi")).collect();

        assert_eq!(screen.page_rows().len(), 50);
        assert_eq!(screen.page_rows()[0].transaction_id, 120);

        screen.page = 2;
        assert_eq!(screen.page_rows().len(), 20);
    }

    #[test]
    fn test_discount_percent_lookup() {
        let mut screen = TransactionHistoryScreen::new();
        screen.discount_percents = vec![DiscountPercentRow {
            transaction_id: 7,
            discount_percent: 12.5,
        }];

        assert_eq!(screen.discount_percent_for(7), Some(12.5));
        assert_eq!(screen.discount_percent_for(8), None);
    }

    #[test]
    fn test_item_lookup_filter() {
        let mut screen = ItemLookupScreen::new();
        screen.sales = vec![sale(1, "ITM001"), sale(2, "ITM002"), sale(3, "KMJ010")];

        screen.search_query = "itm".to_string();
        assert_eq!(screen.filtered().len(), 2);

        screen.search_query = String::new();
        assert_eq!(screen.filtered().len(), 3);
    }
}
