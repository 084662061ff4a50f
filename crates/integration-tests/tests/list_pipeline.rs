//! Integration tests for the product list pipeline:
//! search, status and date filters, sorting, paging and badge counts.

#![allow(clippy::unwrap_used)]

use shelf_life_core::{
    FilterCriteria, Product, SortDirection, SortField, SortOptions, StatusCounts, StatusFilter,
    Thresholds, filter_products, sort_and_page, status_counts,
};
use shelf_life_integration_tests::{day, ids, numbered, reference, single_batch, snapshot};

fn search(term: &str) -> Vec<String> {
    let products = snapshot();
    let criteria = FilterCriteria::new().with_search(term);
    filter_products(&products, &criteria, reference(), &Thresholds::default())
        .into_iter()
        .map(|p| p.id.to_string())
        .collect()
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_us_date_matches_earliest_expiry() {
    assert_eq!(search("03/15/2025"), vec!["salsa"]);
    assert!(search("03/16/2025").is_empty());
}

#[test]
fn test_search_date_formats_agree() {
    assert_eq!(search("2025-03-15"), vec!["salsa"]);
    assert_eq!(search("3/15/2025"), vec!["salsa"]);
    assert_eq!(search("March 15, 2025"), vec!["salsa"]);
}

#[test]
fn test_search_date_ignores_later_batches() {
    // Bagels have a batch on the 19th, but their earliest is the 10th.
    assert!(search("2025-03-19").is_empty());
    assert_eq!(search("2025-03-10"), vec!["bagels"]);
}

#[test]
fn test_search_text_fields() {
    assert_eq!(search("YOGURT"), vec!["yogurt"]);
    assert_eq!(search("pantry"), vec!["salsa", "honey", "draft"]);
    assert_eq!(search("sv-77"), vec!["salsa"]);
    assert!(search("kombucha").is_empty());
}

#[test]
fn test_blank_search_matches_all() {
    assert_eq!(search("   ").len(), 5);
}

// =============================================================================
// Status & Date Range
// =============================================================================

#[test]
fn test_status_scenario() {
    let products: Vec<_> = [-2, 0, 5, 10]
        .into_iter()
        .enumerate()
        .map(|(n, days)| single_batch(&format!("p{n}"), &format!("Product {n}"), "Misc", days))
        .collect();
    let filter = |status: StatusFilter| {
        let criteria = FilterCriteria::new().with_status(status);
        ids(filter_products(&products, &criteria, reference(), &Thresholds::default()))
    };

    assert_eq!(filter(StatusFilter::Expired), vec!["p0"]);
    assert_eq!(filter(StatusFilter::ExpiringSoon), vec!["p1", "p2"]);
    assert_eq!(filter(StatusFilter::Good), vec!["p3"]);
    assert_eq!(filter(StatusFilter::All).len(), 4);
}

#[test]
fn test_product_without_batches_only_in_all() {
    let products = snapshot();
    for status in [StatusFilter::Expired, StatusFilter::ExpiringSoon, StatusFilter::Good] {
        let criteria = FilterCriteria::new().with_status(status);
        let matched = filter_products(&products, &criteria, reference(), &Thresholds::default());
        assert!(!ids(matched).contains(&"draft"));
    }
}

#[test]
fn test_date_range_inclusive() {
    let products = snapshot();
    let criteria = FilterCriteria::new().with_date_range(Some(day(2025, 3, 10)), Some(day(2025, 3, 15)));
    let matched = filter_products(&products, &criteria, reference(), &Thresholds::default());
    assert_eq!(ids(matched), vec!["bagels", "salsa"]);
}

#[test]
fn test_from_raw_is_lenient() {
    let products = snapshot();
    let criteria = FilterCriteria::from_raw(Some(""), Some("stale"), Some("not a date"), None);
    let matched = filter_products(&products, &criteria, reference(), &Thresholds::default());
    assert_eq!(matched.len(), 5);
}

#[test]
fn test_filters_compose_and_are_idempotent() {
    let products = snapshot();
    let criteria = FilterCriteria::from_raw(Some("pantry"), Some("expiring-soon"), None, None);
    let thresholds = Thresholds::default();

    let once = filter_products(&products, &criteria, reference(), &thresholds);
    let twice = filter_products(once.iter().copied(), &criteria, reference(), &thresholds);
    assert_eq!(ids(once.iter().copied()), vec!["salsa"]);
    assert_eq!(once, twice);
    assert_eq!(products, snapshot());
}

// =============================================================================
// Sorting & Paging
// =============================================================================

fn sorted(field: SortField, direction: SortDirection) -> Vec<String> {
    let products = snapshot();
    let page = sort_and_page(&products, SortOptions::new(field, direction), 1, 10);
    page.items.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn test_sort_by_expiry_missing_last() {
    assert_eq!(
        sorted(SortField::ExpiryDate, SortDirection::Asc),
        vec!["yogurt", "bagels", "salsa", "honey", "draft"]
    );
    assert_eq!(
        sorted(SortField::ExpiryDate, SortDirection::Desc),
        vec!["draft", "honey", "salsa", "bagels", "yogurt"]
    );
}

#[test]
fn test_sort_by_name_case_insensitive() {
    assert_eq!(
        sorted(SortField::Name, SortDirection::Asc),
        vec!["draft", "yogurt", "salsa", "bagels", "honey"]
    );
}

#[test]
fn test_sort_by_quantity_uses_totals() {
    assert_eq!(
        sorted(SortField::Quantity, SortDirection::Asc),
        vec!["salsa", "draft", "honey", "yogurt", "bagels"]
    );
}

#[test]
fn test_category_sort_is_stable() {
    assert_eq!(
        sorted(SortField::Category, SortDirection::Asc),
        vec!["bagels", "yogurt", "salsa", "honey", "draft"]
    );
    assert_eq!(
        sorted(SortField::Category, SortDirection::Desc),
        vec!["salsa", "honey", "draft", "yogurt", "bagels"]
    );
}

#[test]
fn test_unknown_sort_falls_back_to_expiry_asc() {
    let products = snapshot();
    let options = SortOptions::parse_or_default("popularity", "sideways");
    assert_eq!(options, SortOptions::default());
    let page = sort_and_page(&products, options, 1, 10);
    assert_eq!(ids(page.items).first(), Some(&"yogurt"));
}

#[test]
fn test_pagination_23_items() {
    let products = numbered(23);
    let options = SortOptions::default();

    let third = sort_and_page(&products, options, 3, 10);
    assert_eq!(third.total_pages, 3);
    assert_eq!(third.total_count, 23);
    assert_eq!(ids(third.items), vec!["item-21", "item-22", "item-23"]);

    let fourth = sort_and_page(&products, options, 4, 10);
    assert!(fourth.items.is_empty());
    assert!(!fourth.has_next());

    assert!(sort_and_page(&products, options, 0, 10).items.is_empty());
}

#[test]
fn test_empty_list_shows_one_page() {
    let page = sort_and_page(std::iter::empty::<&Product>(), SortOptions::default(), 1, 10);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.display_total_pages(), 1);
    assert!(page.items.is_empty());
}

// =============================================================================
// Badges
// =============================================================================

#[test]
fn test_badges_ignore_status_filter() {
    let products = snapshot();
    let thresholds = Thresholds::default();
    let expected = StatusCounts {
        all: 5,
        expired: 1,
        expiring_soon: 2,
        good: 1,
    };

    for status in [
        StatusFilter::All,
        StatusFilter::Expired,
        StatusFilter::ExpiringSoon,
        StatusFilter::Good,
    ] {
        let criteria = FilterCriteria::new().with_status(status);
        assert_eq!(status_counts(&products, &criteria, reference(), &thresholds), expected);
    }
}

#[test]
fn test_badges_follow_date_range() {
    let products = snapshot();
    let criteria = FilterCriteria::new().with_date_range(Some(day(2025, 3, 10)), None);
    let counts = status_counts(&products, &criteria, reference(), &Thresholds::default());

    assert_eq!(counts.all, 3);
    assert_eq!(counts.get(StatusFilter::Expired), 0);
    assert_eq!(counts.get(StatusFilter::ExpiringSoon), 2);
    assert_eq!(counts.get(StatusFilter::Good), 1);
}

#[test]
fn test_badges_with_date_range_ignore_status_filter() {
    let products = snapshot();
    let thresholds = Thresholds::default();
    // Keeps bagels and salsa; drops yogurt, honey and draft.
    let range = (Some(day(2025, 3, 10)), Some(day(2025, 3, 15)));
    let expected = StatusCounts {
        all: 2,
        expired: 0,
        expiring_soon: 2,
        good: 0,
    };

    for status in [
        StatusFilter::All,
        StatusFilter::Expired,
        StatusFilter::ExpiringSoon,
        StatusFilter::Good,
    ] {
        let criteria = FilterCriteria::new()
            .with_date_range(range.0, range.1)
            .with_status(status);
        assert_eq!(status_counts(&products, &criteria, reference(), &thresholds), expected);
    }
}
