//! Daily alert and weekly report digests.
//!
//! These are the data behind the scheduled emails. Rendering and delivery
//! happen elsewhere; a digest is built from a product snapshot and the
//! instant the job runs for.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::aggregate::aggregate;
use super::filter::FilterCriteria;
use super::sort::{StatusCounts, status_counts};
use crate::types::{Batch, BatchId, Product, ProductId, Thresholds, Tier};

/// One batch listed in an alert or report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertEntry {
    pub product_id: ProductId,
    pub product_name: String,
    pub category: String,
    pub batch_id: BatchId,
    pub batch_number: Option<String>,
    pub expiry_date: NaiveDate,
    pub quantity: Option<u32>,
    pub days_until: i64,
    pub tier: Tier,
}

impl AlertEntry {
    fn new(product: &Product, batch: &Batch, reference: NaiveDate, thresholds: &Thresholds) -> Self {
        let classification = thresholds.classify(reference, batch.expiry_date);
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            category: product.category.clone(),
            batch_id: batch.id.clone(),
            batch_number: batch.batch_number.clone(),
            expiry_date: batch.expiry_date,
            quantity: batch.quantity,
            days_until: classification.days_until,
            tier: classification.tier,
        }
    }

    /// Human wording of the day count ("expired 2 days ago", "expires today").
    #[must_use]
    pub fn days_label(&self) -> String {
        match self.days_until {
            0 => "expires today".to_string(),
            1 => "expires tomorrow".to_string(),
            -1 => "expired yesterday".to_string(),
            d if d < 0 => format!("expired {} days ago", d.unsigned_abs()),
            d => format!("expires in {d} days"),
        }
    }
}

fn sort_entries(entries: &mut [AlertEntry]) {
    entries.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.product_name.to_lowercase().cmp(&b.product_name.to_lowercase()))
    });
}

/// Batches needing attention today, grouped by tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAlert {
    /// Day the alert was computed for.
    pub reference: NaiveDate,
    pub expired: Vec<AlertEntry>,
    pub urgent: Vec<AlertEntry>,
    pub warning: Vec<AlertEntry>,
}

impl DailyAlert {
    /// Nothing to report; the scheduler skips sending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.urgent.is_empty() && self.warning.is_empty()
    }

    /// Number of listed batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expired.len() + self.urgent.len() + self.warning.len()
    }

    /// All entries, most pressing first.
    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> {
        self.expired
            .iter()
            .chain(&self.urgent)
            .chain(&self.warning)
    }
}

/// Build the daily alert: every batch in the expired, urgent, or warning tier.
///
/// Each section is ordered by days until expiry, then product name.
pub fn daily_alert<'a, I>(products: I, reference: NaiveDate, thresholds: &Thresholds) -> DailyAlert
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut alert = DailyAlert {
        reference,
        expired: Vec::new(),
        urgent: Vec::new(),
        warning: Vec::new(),
    };

    for product in products {
        for batch in &product.batches {
            let entry = AlertEntry::new(product, batch, reference, thresholds);
            match entry.tier {
                Tier::Expired => alert.expired.push(entry),
                Tier::Urgent => alert.urgent.push(entry),
                Tier::Warning => alert.warning.push(entry),
                Tier::Ok => {}
            }
        }
    }

    sort_entries(&mut alert.expired);
    sort_entries(&mut alert.urgent);
    sort_entries(&mut alert.warning);

    tracing::debug!(
        %reference,
        expired = alert.expired.len(),
        urgent = alert.urgent.len(),
        warning = alert.warning.len(),
        "built daily alert"
    );
    alert
}

/// Per-category rollup in the weekly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategorySummary {
    pub product_count: usize,
    pub batch_count: usize,
    pub total_quantity: u64,
    pub expired_batches: usize,
    pub expiring_batches: usize,
}

/// Weekly inventory summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyReport {
    /// Day the report was computed for.
    pub reference: NaiveDate,
    /// Last day of the look-ahead window.
    pub period_end: NaiveDate,
    pub product_count: usize,
    pub batch_count: usize,
    pub total_quantity: u64,
    pub expired_batch_count: usize,
    pub expiring_batch_count: usize,
    /// Product badges, by earliest batch.
    pub status: StatusCounts,
    /// Rollups keyed by category label.
    pub categories: BTreeMap<String, CategorySummary>,
    /// Batches expiring within the look-ahead window, soonest first.
    pub upcoming: Vec<AlertEntry>,
}

/// Last day of a look-ahead window, saturating at the latest representable date.
fn window_end(reference: NaiveDate, window: i64) -> NaiveDate {
    Duration::try_days(window)
        .and_then(|span| reference.checked_add_signed(span))
        .unwrap_or(NaiveDate::MAX)
}

/// Build the weekly report.
///
/// The look-ahead window is `expiring_soon_days` from `thresholds`.
pub fn weekly_report<'a, I>(products: I, reference: NaiveDate, thresholds: &Thresholds) -> WeeklyReport
where
    I: IntoIterator<Item = &'a Product>,
{
    let products: Vec<&Product> = products.into_iter().collect();
    let window = thresholds.expiring_soon_days();

    let mut report = WeeklyReport {
        reference,
        period_end: window_end(reference, window),
        product_count: products.len(),
        batch_count: 0,
        total_quantity: 0,
        expired_batch_count: 0,
        expiring_batch_count: 0,
        status: status_counts(products.iter().copied(), &FilterCriteria::new(), reference, thresholds),
        categories: BTreeMap::new(),
        upcoming: Vec::new(),
    };

    for product in &products {
        let view = aggregate(product, reference, window);

        report.batch_count += product.batches.len();
        report.total_quantity += view.total_quantity;
        report.expired_batch_count += view.expired_batch_count;
        report.expiring_batch_count += view.expiring_batch_count;

        let summary = report.categories.entry(product.category.clone()).or_default();
        summary.product_count += 1;
        summary.batch_count += product.batches.len();
        summary.total_quantity += view.total_quantity;
        summary.expired_batches += view.expired_batch_count;
        summary.expiring_batches += view.expiring_batch_count;

        report.upcoming.extend(
            product
                .batches
                .iter()
                .map(|batch| AlertEntry::new(product, batch, reference, thresholds))
                .filter(|entry| (0..=window).contains(&entry.days_until)),
        );
    }

    sort_entries(&mut report.upcoming);

    tracing::debug!(
        %reference,
        products = report.product_count,
        upcoming = report.upcoming.len(),
        "built weekly report"
    );
    report
}
