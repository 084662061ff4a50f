//! Integration tests for Shelf Life.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelf-life-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `classify_aggregate` - Freshness tiers and batch rollups
//! - `list_pipeline` - Search, filters, sorting, paging and badges
//! - `digests` - Daily alert and weekly report data
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use shelf_life_core::{Batch, Product};

/// Snapshot shared by the pipeline tests, relative to [`REFERENCE`].
///
/// | product  | batches (days from reference)    | category |
/// |----------|----------------------------------|----------|
/// | yogurt   | -2 (qty 4)                       | Dairy    |
/// | bagels   | 0 (qty 12), 9 (qty 6)            | Bakery   |
/// | salsa    | 5 (unknown qty)                  | Pantry   |
/// | honey    | 10 (qty 1)                       | Pantry   |
/// | draft    | none                             | Pantry   |
pub const SNAPSHOT_JSON: &str = r#"[
  {"id": "yogurt", "name": "Greek Yogurt", "category": "Dairy", "created_at": "2025-01-01T00:00:00Z",
   "batches": [{"id": "y1", "product_id": "yogurt", "batch_number": "GY-0308", "expiry_date": "2025-03-08", "quantity": 4, "created_at": "2025-01-01T00:00:00Z"}]},
  {"id": "bagels", "name": "Sesame Bagels", "category": "Bakery", "created_at": "2025-01-02T00:00:00Z",
   "batches": [
     {"id": "g2", "product_id": "bagels", "expiry_date": "2025-03-19", "quantity": 6, "created_at": "2025-01-05T00:00:00Z"},
     {"id": "g1", "product_id": "bagels", "expiry_date": "2025-03-10", "quantity": 12, "created_at": "2025-01-02T00:00:00Z"}
   ]},
  {"id": "salsa", "name": "Salsa Verde", "category": "Pantry", "created_at": "2025-01-03T00:00:00Z",
   "batches": [{"id": "s1", "product_id": "salsa", "batch_number": "SV-77", "expiry_date": "2025-03-15", "created_at": "2025-01-03T00:00:00Z"}]},
  {"id": "honey", "name": "Wildflower Honey", "category": "Pantry", "created_at": "2025-01-04T00:00:00Z",
   "batches": [{"id": "h1", "product_id": "honey", "expiry_date": "2025-03-20", "quantity": 1, "created_at": "2025-01-04T00:00:00Z"}]},
  {"id": "draft", "name": "Draft Product", "category": "Pantry", "created_at": "2025-01-05T00:00:00Z", "batches": []}
]"#;

/// Reference day for [`SNAPSHOT_JSON`]: 2025-03-10.
pub const REFERENCE: (i32, u32, u32) = (2025, 3, 10);

/// Calendar date shorthand.
///
/// # Panics
///
/// Panics on an invalid date.
#[must_use]
pub fn day(year: i32, month: u32, day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day_of_month).expect("valid fixture date")
}

/// The fixture reference day.
#[must_use]
pub fn reference() -> NaiveDate {
    day(REFERENCE.0, REFERENCE.1, REFERENCE.2)
}

/// Fixed creation timestamp for built fixtures.
///
/// # Panics
///
/// Never in practice; the timestamp is in range.
#[must_use]
pub fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).expect("valid fixture timestamp")
}

/// Parse [`SNAPSHOT_JSON`].
///
/// # Panics
///
/// Panics if the fixture no longer matches the product schema.
#[must_use]
pub fn snapshot() -> Vec<Product> {
    serde_json::from_str(SNAPSHOT_JSON).expect("fixture snapshot parses")
}

/// A product with one batch expiring `days` after [`reference`].
#[must_use]
pub fn single_batch(id: &str, name: &str, category: &str, days: i64) -> Product {
    Product::new(id, name, category, created_at()).with_batch(Batch::new(
        format!("{id}-b1"),
        id,
        reference() + Duration::days(days),
        created_at(),
    ))
}

/// `count` products named `Item 01`, `Item 02`, ... with distinct expiries.
#[must_use]
pub fn numbered(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|n| {
            let days = i64::try_from(n).unwrap_or_default();
            single_batch(&format!("item-{n:02}"), &format!("Item {n:02}"), "Bulk", days)
        })
        .collect()
}

/// IDs of the given products, in order.
#[must_use]
pub fn ids<'a, I>(products: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().map(|p| p.id.as_str()).collect()
}
