//! Batch aggregator.
//!
//! Rolls a product's batch list up into the values shown in detail panels.
//! Nothing here is persisted; views are recomputed on every call.

use chrono::NaiveDate;
use serde::Serialize;

use super::classify::days_until;
use crate::types::{Batch, Product};

/// Derived rollup of a product's batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateView<'a> {
    /// Batch with the soonest expiry, `None` when the product has no batches.
    pub earliest_batch: Option<&'a Batch>,
    /// Sum of batch quantities, unknown counted as zero.
    pub total_quantity: u64,
    /// Batches already past their expiry date.
    pub expired_batch_count: usize,
    /// Batches expiring within the requested window (inclusive).
    pub expiring_batch_count: usize,
}

impl AggregateView<'_> {
    /// Whether the product's expiry can be determined at all.
    #[must_use]
    pub const fn has_expiry(&self) -> bool {
        self.earliest_batch.is_some()
    }
}

/// Aggregate a product's batches in a single pass.
///
/// A batch counts as expiring when `0 <= days_until <= expiring_within_days`.
#[must_use]
pub fn aggregate(
    product: &Product,
    reference: NaiveDate,
    expiring_within_days: i64,
) -> AggregateView<'_> {
    let mut view = AggregateView {
        earliest_batch: None,
        total_quantity: 0,
        expired_batch_count: 0,
        expiring_batch_count: 0,
    };

    for batch in &product.batches {
        // Strict comparison keeps the first batch on ties.
        if view
            .earliest_batch
            .is_none_or(|earliest| batch.expiry_date < earliest.expiry_date)
        {
            view.earliest_batch = Some(batch);
        }

        view.total_quantity += u64::from(batch.quantity_or_zero());

        let days = days_until(reference, batch.expiry_date);
        if days < 0 {
            view.expired_batch_count += 1;
        } else if days <= expiring_within_days {
            view.expiring_batch_count += 1;
        }
    }

    view
}
