//! Filter pipeline.
//!
//! Filters compose by logical AND and are applied in a fixed order:
//! search -> status -> date range. Each one is a pure predicate, so running
//! the pipeline twice with the same criteria changes nothing.

use chrono::NaiveDate;

use super::classify::days_until;
use super::search::{SearchTerm, parse_date_bound};
use crate::types::{ExpiryStatus, Product, StatusFilter, Thresholds};

/// Criteria selected in the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Parsed search box term.
    pub search: Option<SearchTerm>,
    /// Status filter.
    pub status: StatusFilter,
    /// Inclusive lower bound on the earliest expiry.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the earliest expiry.
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Criteria that match everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw form values.
    ///
    /// Never fails: an unknown status means `all`, malformed dates mean no
    /// bound, and an empty search means no search.
    #[must_use]
    pub fn from_raw(
        search: Option<&str>,
        status: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Self {
        Self {
            search: search.and_then(SearchTerm::parse),
            status: status.map(StatusFilter::parse_or_default).unwrap_or_default(),
            start_date: start_date.and_then(parse_date_bound),
            end_date: end_date.and_then(parse_date_bound),
        }
    }

    /// Set the search term from a raw search box value.
    #[must_use]
    pub fn with_search(mut self, raw: &str) -> Self {
        self.search = SearchTerm::parse(raw);
        self
    }

    /// Set the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Set both date-range bounds.
    #[must_use]
    pub const fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Whether either date-range bound is set.
    #[must_use]
    pub const fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Search predicate. No search term matches everything.
    #[must_use]
    pub fn matches_search(&self, product: &Product) -> bool {
        self.search.as_ref().is_none_or(|term| term.matches(product))
    }

    /// Status predicate, evaluated on the earliest batch.
    #[must_use]
    pub fn matches_status(
        &self,
        product: &Product,
        reference: NaiveDate,
        thresholds: &Thresholds,
    ) -> bool {
        self.status
            .matches(product_status(product, reference, thresholds))
    }

    /// Date-range predicate, evaluated on the earliest batch.
    ///
    /// A product without batches fails whenever a bound is active.
    #[must_use]
    pub fn matches_date_range(&self, product: &Product) -> bool {
        if !self.has_date_range() {
            return true;
        }
        let Some(expiry) = product.earliest_expiry() else {
            return false;
        };
        self.start_date.is_none_or(|start| expiry >= start)
            && self.end_date.is_none_or(|end| expiry <= end)
    }

    /// All predicates, in canonical order.
    #[must_use]
    pub fn matches(&self, product: &Product, reference: NaiveDate, thresholds: &Thresholds) -> bool {
        self.matches_search(product)
            && self.matches_status(product, reference, thresholds)
            && self.matches_date_range(product)
    }
}

/// Three-step status of a product's earliest batch.
///
/// Returns `None` when the product has no batches.
#[must_use]
pub fn product_status(
    product: &Product,
    reference: NaiveDate,
    thresholds: &Thresholds,
) -> Option<ExpiryStatus> {
    product
        .earliest_expiry()
        .map(|expiry| thresholds.status(days_until(reference, expiry)))
}

/// Keep the products matching `criteria`, preserving input order.
pub fn filter_products<'a, I>(
    products: I,
    criteria: &FilterCriteria,
    reference: NaiveDate,
    thresholds: &Thresholds,
) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut total = 0_usize;
    let matched: Vec<&Product> = products
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|product| criteria.matches(product, reference, thresholds))
        .collect();

    tracing::debug!(
        total,
        matched = matched.len(),
        status = %criteria.status,
        "filtered products"
    );
    matched
}
