//! # Report Screens
//!
//! Four read-only screens over the same pattern: fetch a flat list,
//! group it with the core aggregator, render buckets newest-first.
//! Fetch failure shows a static message, an empty result another; there
//! is no retry and no partial render.
//!
//! - Laporan Bulanan: sales joined to transactions, bucketed by month
//! - Laporan Harian: transactions on one date, grouped by payment method
//! - Pindahan Bulanan: transfer history bucketed by month
//! - Pindahan Harian: transfer history on one date, grouped by transfer

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use kasir_client::ApiClient;
use kasir_core::money::Money;
use kasir_core::report::{
    filter_by_date, group_by_bucket, month_label, page_count, page_of, Bucket, ReportRow,
};
use kasir_core::types::{PaymentMethod, SaleRecord, Transaction, TransferRecord};

use crate::error::ScreenResult;

// =============================================================================
// Load State
// =============================================================================

/// Where a report screen is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Failed,
    Ready,
}

/// Static failure message shared by the history screens.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load history data";
/// Static empty-data messages, per screen.
pub const NO_SALES_MESSAGE: &str = "No sales data available.";
pub const NO_SALES_ON_DATE_MESSAGE: &str = "Tidak ada penjualan di tanggal ini.";
pub const NO_HISTORY_MESSAGE: &str = "Tidak ada data history yang tersedia.";

// =============================================================================
// Laporan Bulanan (Monthly Sales)
// =============================================================================

/// A sale line joined to its transaction's timestamp, the unit the
/// monthly report buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySaleRow {
    pub sale_id: i64,
    pub quantity: i64,
    pub total: Money,
    pub timestamp: DateTime<Utc>,
}

impl ReportRow for MonthlySaleRow {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn amount(&self) -> Money {
        self.total
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Monthly sales report state.
#[derive(Debug, Default)]
pub struct MonthlySalesReport {
    rows: Vec<MonthlySaleRow>,
    state: LoadState,
}

impl MonthlySalesReport {
    pub fn new() -> Self {
        MonthlySalesReport::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Fetches sales and transactions, then joins each sale to its
    /// transaction's timestamp. Sales whose transaction is missing are
    /// dropped, as the original did.
    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!("loading monthly sales report");
        let fetched = async {
            let sales = client.transactions().list_sales().await?;
            let transactions = client.transactions().list().await?;
            Ok::<_, kasir_client::ClientError>((sales, transactions))
        }
        .await;

        match fetched {
            Ok((sales, transactions)) => {
                self.rows = join_sales(sales, &transactions);
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err.into())
            }
        }
    }

    /// Month buckets, newest month first.
    pub fn buckets(&self) -> Vec<Bucket<String, MonthlySaleRow>> {
        group_by_bucket(self.rows.clone(), |row| month_label(row.timestamp))
    }
}

/// Joins sale lines to their transactions by `transaction_id`.
fn join_sales(sales: Vec<SaleRecord>, transactions: &[Transaction]) -> Vec<MonthlySaleRow> {
    sales
        .into_iter()
        .filter_map(|sale| {
            let tx = transactions
                .iter()
                .find(|tx| tx.transaction_id == sale.transaction_id)?;
            Some(MonthlySaleRow {
                sale_id: sale.sale_id,
                quantity: sale.quantity,
                total: sale.total,
                timestamp: tx.timestamp,
            })
        })
        .collect()
}

// =============================================================================
// Laporan Harian (Daily Sales)
// =============================================================================

/// One customer's merged amount within a payment-method group.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerTotal {
    pub customer: String,
    pub amount: Money,
}

/// One payment method's card on the daily report.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodGroup {
    pub label: String,
    pub entries: Vec<CustomerTotal>,
    pub total: Money,
}

/// Daily sales report state.
#[derive(Debug)]
pub struct DailySalesReport {
    transactions: Vec<Transaction>,
    pub selected_date: NaiveDate,
    state: LoadState,
}

impl DailySalesReport {
    pub fn new(today: NaiveDate) -> Self {
        DailySalesReport {
            transactions: Vec::new(),
            selected_date: today,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Fetches all transactions; the date filter is applied at render.
    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!(date = %self.selected_date, "loading daily sales report");
        match client.transactions().list().await {
            Ok(transactions) => {
                self.transactions = transactions;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err.into())
            }
        }
    }

    /// Transactions on the selected date, grouped by payment-method
    /// label, amounts merged per customer within each group. Groups
    /// keep first-seen order; an unknown `payment_id` lands under
    /// `Unknown`.
    pub fn groups(&self) -> Vec<PaymentMethodGroup> {
        let on_date = self
            .transactions
            .iter()
            .filter(|tx| tx.timestamp.date_naive() == self.selected_date);

        let mut groups: Vec<PaymentMethodGroup> = Vec::new();
        for tx in on_date {
            let label = PaymentMethod::from_wire_id(tx.payment_id)
                .map(|m| m.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string());

            let group = match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => group,
                None => {
                    groups.push(PaymentMethodGroup {
                        label,
                        entries: Vec::new(),
                        total: Money::zero(),
                    });
                    groups.last_mut().expect("just pushed")
                }
            };

            group.total += tx.total_price;
            match group
                .entries
                .iter_mut()
                .find(|e| e.customer == tx.customer_name)
            {
                Some(entry) => entry.amount += tx.total_price,
                None => group.entries.push(CustomerTotal {
                    customer: tx.customer_name.clone(),
                    amount: tx.total_price,
                }),
            }
        }
        groups
    }
}

// =============================================================================
// Pindahan Bulanan (Monthly Transfer History)
// =============================================================================

/// Monthly transfer history state.
#[derive(Debug, Default)]
pub struct MonthlyTransferReport {
    rows: Vec<TransferRecord>,
    state: LoadState,
}

impl MonthlyTransferReport {
    pub fn new() -> Self {
        MonthlyTransferReport::default()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!("loading monthly transfer history");
        match client.transfers().history().await {
            Ok(rows) => {
                self.rows = rows;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err.into())
            }
        }
    }

    /// Month buckets with quantity and amount summaries, newest first.
    pub fn buckets(&self) -> Vec<Bucket<String, TransferRecord>> {
        group_by_bucket(self.rows.clone(), |row| month_label(row.timestamp))
    }
}

// =============================================================================
// Pindahan Harian (Daily Transfer History)
// =============================================================================

/// Daily transfer history state: one date, grouped by `group_id`,
/// paginated at the fixed report page size.
#[derive(Debug)]
pub struct DailyTransferReport {
    rows: Vec<TransferRecord>,
    pub selected_date: NaiveDate,
    pub page: usize,
    state: LoadState,
}

impl DailyTransferReport {
    pub fn new(today: NaiveDate) -> Self {
        DailyTransferReport {
            rows: Vec::new(),
            selected_date: today,
            page: 0,
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub async fn load(&mut self, client: &ApiClient) -> ScreenResult<()> {
        debug!(date = %self.selected_date, "loading daily transfer history");
        match client.transfers().history().await {
            Ok(rows) => {
                self.rows = rows;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed;
                Err(err.into())
            }
        }
    }

    /// Picking a date resets pagination.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.page = 0;
    }

    /// All of the selected date's transfers, one bucket per `group_id`,
    /// newest transfer first.
    pub fn buckets(&self) -> Vec<Bucket<String, TransferRecord>> {
        let on_date = filter_by_date(self.rows.clone(), self.selected_date);
        group_by_bucket(on_date, |row| row.group_id.clone())
    }

    /// The current page of buckets.
    pub fn page_buckets(&self) -> Vec<Bucket<String, TransferRecord>> {
        let buckets = self.buckets();
        page_of(&buckets, self.page).to_vec()
    }

    pub fn total_pages(&self) -> usize {
        page_count(self.buckets().len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::types::{DiscountType, Location, PaymentStatus};

    fn tx(id: i64, payment_id: i64, customer: &str, total: i64, ts: &str) -> Transaction {
        Transaction {
            transaction_id: id,
            discount_type: DiscountType::None,
            discount_percent: 0.0,
            total_discount: Money::zero(),
            payment_id,
            payment_status: PaymentStatus::Lunas,
            customer_name: customer.to_string(),
            location: Location::Toko,
            total_price: Money::new(total),
            down_payment: Money::zero(),
            timestamp: ts.parse().unwrap(),
        }
    }

    fn sale(sale_id: i64, tx_id: i64, qty: i64, total: i64) -> SaleRecord {
        SaleRecord {
            sale_id,
            item_id: format!("BRG-{:03}", sale_id),
            quantity: qty,
            total: Money::new(total),
            transaction_id: tx_id,
            customer_name: String::new(),
            timestamp: None,
        }
    }

    fn transfer(group_id: &str, qty: i64, ts: &str) -> TransferRecord {
        TransferRecord {
            pindahan_id: 1,
            item_id: "BRG-001".to_string(),
            quantity: qty,
            timestamp: ts.parse().unwrap(),
            source: "gudang".to_string(),
            destination: "toko".to_string(),
            group_id: group_id.to_string(),
            price: None,
        }
    }

    #[test]
    fn test_monthly_sales_join_and_bucket() {
        let transactions = vec![
            tx(1, 1, "Budi", 250_000, "2025-01-10T09:00:00Z"),
            tx(2, 1, "Sari", 100_000, "2025-02-03T10:00:00Z"),
        ];
        let sales = vec![
            sale(10, 1, 2, 250_000),
            sale(11, 2, 1, 100_000),
            // Orphan sale with no transaction: dropped.
            sale(12, 99, 5, 500_000),
        ];

        let mut report = MonthlySalesReport::new();
        report.rows = join_sales(sales, &transactions);

        let buckets = report.buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "Februari 2025");
        assert_eq!(buckets[0].total_amount, Money::new(100_000));
        assert_eq!(buckets[1].key, "Januari 2025");
        assert_eq!(buckets[1].total_amount, Money::new(250_000));
        assert_eq!(buckets[1].total_quantity, 2);
    }

    #[test]
    fn test_daily_sales_groups_by_method_and_merges_customers() {
        let mut report = DailySalesReport::new(NaiveDate::from_ymd_opt(2025, 2, 7).unwrap());
        report.transactions = vec![
            tx(1, 1, "Budi", 100_000, "2025-02-07T09:00:00Z"),
            tx(2, 1, "Budi", 50_000, "2025-02-07T11:00:00Z"),
            tx(3, 2, "Sari", 75_000, "2025-02-07T12:00:00Z"),
            // Different day: excluded.
            tx(4, 1, "Andi", 999_000, "2025-02-08T09:00:00Z"),
            // Unknown payment id.
            tx(5, 42, "Tono", 10_000, "2025-02-07T13:00:00Z"),
        ];
        report.state = LoadState::Ready;

        let groups = report.groups();
        assert_eq!(groups.len(), 3);

        let tunai = &groups[0];
        assert_eq!(tunai.label, "Tunai");
        assert_eq!(tunai.entries.len(), 1);
        assert_eq!(tunai.entries[0].customer, "Budi");
        assert_eq!(tunai.entries[0].amount, Money::new(150_000));
        assert_eq!(tunai.total, Money::new(150_000));

        assert_eq!(groups[1].label, "Debit");
        assert_eq!(groups[2].label, "Unknown");
    }

    #[test]
    fn test_daily_sales_empty_date() {
        let mut report = DailySalesReport::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        report.transactions = vec![tx(1, 1, "Budi", 100_000, "2025-02-07T09:00:00Z")];
        assert!(report.groups().is_empty());
    }

    #[test]
    fn test_monthly_transfer_buckets() {
        let mut report = MonthlyTransferReport::new();
        report.rows = vec![
            transfer("g-1", 2, "2024-01-05T00:00:00Z"),
            transfer("g-2", 3, "2024-02-01T00:00:00Z"),
        ];

        let buckets = report.buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "Februari 2024");
        assert_eq!(buckets[0].total_quantity, 3);
        assert_eq!(buckets[1].total_quantity, 2);
    }

    #[test]
    fn test_daily_transfer_filters_groups_and_paginates() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let mut report = DailyTransferReport::new(day);
        // Seven groups on the day plus one on another day.
        report.rows = (0..7)
            .map(|i| transfer(&format!("g-{}", i), 1, "2024-03-02T08:00:00Z"))
            .chain(std::iter::once(transfer(
                "other-day",
                1,
                "2024-03-03T08:00:00Z",
            )))
            .collect();

        assert_eq!(report.buckets().len(), 7);
        assert_eq!(report.total_pages(), 2);
        assert_eq!(report.page_buckets().len(), 5);

        report.page = 1;
        assert_eq!(report.page_buckets().len(), 2);

        // Picking a new date resets the page.
        report.set_date(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(report.page, 0);
        assert_eq!(report.buckets().len(), 1);
    }
}
