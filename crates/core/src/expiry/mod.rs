//! Expiry classification and batch aggregation engine.
//!
//! Data flows one way: raw products -> [`aggregate`] (per product) ->
//! [`filter_products`] -> [`sort_and_page`] -> rendered page + counts.
//! Every stage is pure and takes an explicit reference date; none of them
//! reads the clock or mutates its input.

pub mod aggregate;
pub mod classify;
pub mod digest;
pub mod filter;
pub mod search;
pub mod sort;

pub use aggregate::{AggregateView, aggregate};
pub use classify::{Classification, classify, days_until, reference_day};
pub use digest::{AlertEntry, CategorySummary, DailyAlert, WeeklyReport, daily_alert, weekly_report};
pub use filter::{FilterCriteria, filter_products, product_status};
pub use search::{SearchTerm, parse_date_bound, parse_search_date};
pub use sort::{
    Page, SortDirection, SortField, SortOptions, StatusCounts, sort_and_page, status_counts,
};
