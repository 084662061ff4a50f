//! Product and batch records.
//!
//! A product owns zero or more dated batches. Persisted products always have
//! at least one batch; an empty batch list only shows up transiently (e.g.
//! mid-edit) and means the product's expiry can't be determined.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{BatchId, ProductId};

/// One dated quantity of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch ID.
    pub id: BatchId,
    /// Product this batch belongs to.
    pub product_id: ProductId,
    /// Optional batch/lot label printed on the packaging.
    #[serde(default)]
    pub batch_number: Option<String>,
    /// Calendar expiry date (no time component).
    pub expiry_date: NaiveDate,
    /// Number of units, `None` when unknown.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// When the batch was recorded.
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Create a batch with unknown quantity and no batch number.
    #[must_use]
    pub fn new(
        id: impl Into<BatchId>,
        product_id: impl Into<ProductId>,
        expiry_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            batch_number: None,
            expiry_date,
            quantity: None,
            created_at,
        }
    }

    /// Set the unit count.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the batch number label.
    #[must_use]
    pub fn with_batch_number(mut self, batch_number: impl Into<String>) -> Self {
        self.batch_number = Some(batch_number.into());
        self
    }

    /// Quantity with unknown counted as zero.
    #[must_use]
    pub fn quantity_or_zero(&self) -> u32 {
        self.quantity.unwrap_or(0)
    }
}

/// A tenant-owned catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Optional supplier name.
    #[serde(default)]
    pub supplier: Option<String>,
    /// Optional storage location (shelf, fridge, ...).
    #[serde(default)]
    pub location: Option<String>,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Optional barcode.
    #[serde(default)]
    pub barcode: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// Dated batches. Order carries no meaning.
    #[serde(default)]
    pub batches: Vec<Batch>,
}

impl Product {
    /// Create a product with no batches and no optional fields.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            supplier: None,
            location: None,
            notes: None,
            barcode: None,
            created_at,
            batches: Vec::new(),
        }
    }

    /// Append a batch.
    #[must_use]
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batches.push(batch);
        self
    }

    /// The batch with the soonest expiry date.
    ///
    /// Ties go to the batch that comes first in the batch list. Returns `None`
    /// for a product without batches.
    #[must_use]
    pub fn earliest_batch(&self) -> Option<&Batch> {
        self.batches.iter().min_by_key(|batch| batch.expiry_date)
    }

    /// Expiry date of the earliest batch, if any.
    #[must_use]
    pub fn earliest_expiry(&self) -> Option<NaiveDate> {
        self.earliest_batch().map(|batch| batch.expiry_date)
    }

    /// Sum of all batch quantities, unknown quantities counted as zero.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.batches
            .iter()
            .map(|batch| u64::from(batch.quantity_or_zero()))
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp(1_735_689_600, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_earliest_batch_picks_minimum_expiry() {
        let product = Product::new("p1", "Milk", "Dairy", ts())
            .with_batch(Batch::new("b1", "p1", date(2025, 3, 1), ts()))
            .with_batch(Batch::new("b2", "p1", date(2025, 1, 15), ts()))
            .with_batch(Batch::new("b3", "p1", date(2025, 2, 10), ts()));

        let earliest = product.earliest_batch().unwrap();
        assert_eq!(earliest.expiry_date, date(2025, 1, 15));
        assert_eq!(earliest.id.as_str(), "b2");
    }

    #[test]
    fn test_earliest_batch_tie_keeps_first() {
        let product = Product::new("p1", "Milk", "Dairy", ts())
            .with_batch(Batch::new("first", "p1", date(2025, 1, 15), ts()))
            .with_batch(Batch::new("second", "p1", date(2025, 1, 15), ts()));

        assert_eq!(product.earliest_batch().unwrap().id.as_str(), "first");
    }

    #[test]
    fn test_earliest_batch_none_without_batches() {
        let product = Product::new("p1", "Milk", "Dairy", ts());
        assert!(product.earliest_batch().is_none());
        assert!(product.earliest_expiry().is_none());
    }

    #[test]
    fn test_total_quantity_treats_unknown_as_zero() {
        let product = Product::new("p1", "Eggs", "Dairy", ts())
            .with_batch(Batch::new("b1", "p1", date(2025, 1, 1), ts()).with_quantity(12))
            .with_batch(Batch::new("b2", "p1", date(2025, 1, 2), ts()))
            .with_batch(Batch::new("b3", "p1", date(2025, 1, 3), ts()).with_quantity(6));

        assert_eq!(product.total_quantity(), 18);
    }

    #[test]
    fn test_deserialize_minimal_product() {
        let json = r#"{
            "id": "p1",
            "name": "Yogurt",
            "category": "Dairy",
            "created_at": "2025-01-01T00:00:00Z",
            "batches": [
                {
                    "id": "b1",
                    "product_id": "p1",
                    "expiry_date": "2025-02-01",
                    "quantity": null,
                    "created_at": "2025-01-01T00:00:00Z"
                }
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.batches.len(), 1);
        assert!(product.supplier.is_none());
        assert_eq!(product.batches.first().unwrap().quantity, None);
        assert_eq!(product.earliest_expiry(), Some(date(2025, 2, 1)));
    }
}
