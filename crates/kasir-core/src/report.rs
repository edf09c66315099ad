//! # Report Aggregator
//!
//! Groups a fetched flat list into display buckets and accumulates
//! per-bucket totals in a single pass.
//!
//! Buckets are keyed by whatever the screen needs: a month label, a day,
//! a `group_id`, or a payment-method label. After grouping, buckets sort
//! by the most recent timestamp they contain, newest first.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::money::Money;
use crate::types::{SaleRecord, Transaction, TransferRecord};

/// Fixed page size for paginated bucket lists.
pub const REPORT_PAGE_SIZE: usize = 5;

// =============================================================================
// Report Rows
// =============================================================================

/// Anything the aggregator can bucket: a quantity, an amount, and a
/// timestamp for recency ordering.
pub trait ReportRow {
    fn quantity(&self) -> i64;
    fn amount(&self) -> Money;
    fn timestamp(&self) -> DateTime<Utc>;
}

impl ReportRow for TransferRecord {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `quantity x price`; rows without a price contribute nothing.
    fn amount(&self) -> Money {
        self.price
            .unwrap_or_else(Money::zero)
            .multiply_quantity(self.quantity)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl ReportRow for Transaction {
    fn quantity(&self) -> i64 {
        1
    }

    fn amount(&self) -> Money {
        self.total_price
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl ReportRow for SaleRecord {
    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn amount(&self) -> Money {
        self.total
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_default()
    }
}

// =============================================================================
// Buckets
// =============================================================================

/// One display group: the rows plus the totals accumulated while
/// grouping. Never persisted; rebuilt from the fetched list on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<K, R> {
    pub key: K,
    pub rows: Vec<R>,
    pub total_quantity: i64,
    pub total_amount: Money,
    /// Most recent row timestamp in the bucket; the sort key.
    pub latest: DateTime<Utc>,
}

/// Groups rows by `key_fn` in one pass, accumulating quantity and
/// amount per bucket, then sorts buckets newest-first by their most
/// recent row.
pub fn group_by_bucket<R, K, F>(rows: Vec<R>, key_fn: F) -> Vec<Bucket<K, R>>
where
    R: ReportRow,
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&R) -> K,
{
    let mut order: Vec<K> = Vec::new();
    let mut buckets: HashMap<K, Bucket<K, R>> = HashMap::new();

    for row in rows {
        let key = key_fn(&row);
        let bucket = buckets.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            Bucket {
                key,
                rows: Vec::new(),
                total_quantity: 0,
                total_amount: Money::zero(),
                latest: DateTime::<Utc>::MIN_UTC,
            }
        });
        bucket.total_quantity += row.quantity();
        bucket.total_amount += row.amount();
        if row.timestamp() > bucket.latest {
            bucket.latest = row.timestamp();
        }
        bucket.rows.push(row);
    }

    let mut result: Vec<Bucket<K, R>> = order
        .into_iter()
        .filter_map(|key| buckets.remove(&key))
        .collect();
    result.sort_by(|a, b| b.latest.cmp(&a.latest));
    result
}

/// Keeps only rows dated `date` (UTC calendar day). Day-level reports
/// filter before bucketing.
pub fn filter_by_date<R: ReportRow>(rows: Vec<R>, date: NaiveDate) -> Vec<R> {
    rows.into_iter()
        .filter(|row| row.timestamp().date_naive() == date)
        .collect()
}

/// One page of a list at an arbitrary page size. Page indices start at
/// zero; a page past the end is empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// One fixed-size page of a bucket list.
pub fn page_of<T>(items: &[T], page: usize) -> &[T] {
    paginate(items, page, REPORT_PAGE_SIZE)
}

/// Number of pages needed for a bucket list.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(REPORT_PAGE_SIZE)
}

// =============================================================================
// Label Formatting
// =============================================================================

/// Indonesian month names, as the dashboard's id-ID locale rendered them.
const MONTH_NAMES_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Month bucket label, e.g. `Februari 2025`.
pub fn month_label(ts: DateTime<Utc>) -> String {
    let month = MONTH_NAMES_ID[(ts.month0()) as usize];
    format!("{} {}", month, ts.year())
}

/// Day bucket label, e.g. `07/02/2025`.
pub fn day_label(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// Full timestamp for table cells, e.g. `07/02/2025 10:00:00`.
pub fn timestamp_label(ts: DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M:%S").to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn transfer(item_id: &str, qty: i64, price: Option<i64>, ts: &str) -> TransferRecord {
        TransferRecord {
            pindahan_id: 1,
            item_id: item_id.to_string(),
            quantity: qty,
            timestamp: ts.parse().unwrap(),
            source: "gudang".to_string(),
            destination: "toko".to_string(),
            group_id: "g-1".to_string(),
            price: price.map(Money::new),
        }
    }

    #[test]
    fn test_group_by_month_totals_and_order() {
        let rows = vec![
            transfer("A", 2, None, "2024-01-05T00:00:00Z"),
            transfer("B", 3, None, "2024-02-01T00:00:00Z"),
        ];

        let buckets = group_by_bucket(rows, |r| month_label(r.timestamp()));

        assert_eq!(buckets.len(), 2);
        // Sorted newest-first: February before January.
        assert_eq!(buckets[0].key, "Februari 2024");
        assert_eq!(buckets[0].total_quantity, 3);
        assert_eq!(buckets[1].key, "Januari 2024");
        assert_eq!(buckets[1].total_quantity, 2);
    }

    #[test]
    fn test_amount_accumulation_uses_price_when_present() {
        let rows = vec![
            transfer("A", 2, Some(10_000), "2024-01-05T00:00:00Z"),
            transfer("B", 1, None, "2024-01-06T00:00:00Z"),
        ];

        let buckets = group_by_bucket(rows, |r| month_label(r.timestamp()));

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_quantity, 3);
        // Priceless row contributes nothing to the amount.
        assert_eq!(buckets[0].total_amount, Money::new(20_000));
        assert_eq!(
            buckets[0].latest,
            Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_group_by_group_id() {
        let mut a = transfer("A", 1, None, "2024-03-01T08:00:00Z");
        a.group_id = "g-7".to_string();
        let mut b = transfer("B", 2, None, "2024-03-01T08:00:05Z");
        b.group_id = "g-7".to_string();
        let mut c = transfer("C", 4, None, "2024-03-02T09:00:00Z");
        c.group_id = "g-8".to_string();

        let buckets = group_by_bucket(vec![a, b, c], |r| r.group_id.clone());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "g-8");
        assert_eq!(buckets[1].key, "g-7");
        assert_eq!(buckets[1].rows.len(), 2);
        assert_eq!(buckets[1].total_quantity, 3);
    }

    #[test]
    fn test_filter_by_date() {
        let rows = vec![
            transfer("A", 1, None, "2024-03-01T08:00:00Z"),
            transfer("B", 2, None, "2024-03-02T23:59:59Z"),
            transfer("C", 3, None, "2024-03-02T00:00:01Z"),
        ];

        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let filtered = filter_by_date(rows, day);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.timestamp().date_naive() == day));
    }

    #[test]
    fn test_pagination_fixed_page_size() {
        let items: Vec<i32> = (0..12).collect();
        assert_eq!(page_of(&items, 0), &[0, 1, 2, 3, 4]);
        assert_eq!(page_of(&items, 1), &[5, 6, 7, 8, 9]);
        assert_eq!(page_of(&items, 2), &[10, 11]);
        assert!(page_of(&items, 3).is_empty());
        assert_eq!(page_count(12), 3);
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(5), 1);
    }

    #[test]
    fn test_month_labels_are_indonesian() {
        let ts = Utc.with_ymd_and_hms(2025, 2, 7, 10, 0, 0).unwrap();
        assert_eq!(month_label(ts), "Februari 2025");
        assert_eq!(day_label(ts), "07/02/2025");
        assert_eq!(timestamp_label(ts), "07/02/2025 10:00:00");
    }

    #[test]
    fn test_empty_input_yields_no_buckets() {
        let buckets = group_by_bucket(Vec::<TransferRecord>::new(), |r| r.group_id.clone());
        assert!(buckets.is_empty());
    }
}
