//! Integration tests for freshness classification and batch aggregation.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use shelf_life_core::{
    Batch, ExpiryStatus, Product, Thresholds, Tier, aggregate, classify, days_until, reference_day,
};
use shelf_life_integration_tests::{created_at, day, reference, snapshot};

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_same_calendar_day_is_zero() {
    let morning = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
    let night = Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap();

    assert_eq!(days_until(reference_day(&morning), reference_day(&night)), 0);
    let classification = classify(reference_day(&morning), reference_day(&night));
    assert_eq!(classification.days_until, 0);
    assert_eq!(classification.tier, Tier::Urgent);
}

#[test]
fn test_reference_day_uses_local_calendar() {
    // 2025-03-10 02:00 in UTC is still 2025-03-09 in New York.
    let instant: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 3, 10, 2, 0, 0).unwrap();
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

    assert_eq!(reference_day(&instant), day(2025, 3, 10));
    assert_eq!(reference_day(&instant.with_timezone(&new_york)), day(2025, 3, 9));
}

#[test]
fn test_tier_boundaries_with_defaults() {
    let today = reference();
    let tier = |days: i64| classify(today, today + Duration::days(days)).tier;

    assert_eq!(tier(-1), Tier::Expired);
    assert_eq!(tier(0), Tier::Urgent);
    assert_eq!(tier(3), Tier::Urgent);
    assert_eq!(tier(4), Tier::Warning);
    assert_eq!(tier(7), Tier::Warning);
    assert_eq!(tier(8), Tier::Ok);
}

#[test]
fn test_custom_thresholds() {
    let thresholds = Thresholds::new(1, 14, 30).unwrap();
    let today = reference();

    assert_eq!(thresholds.classify(today, today + Duration::days(2)).tier, Tier::Warning);
    assert_eq!(thresholds.status_of(today, today + Duration::days(30)), ExpiryStatus::ExpiringSoon);
    assert_eq!(thresholds.status_of(today, today + Duration::days(31)), ExpiryStatus::Good);
}

#[test]
fn test_inconsistent_thresholds_rejected() {
    assert!(Thresholds::new(10, 5, 7).is_err());
    assert!(Thresholds::new(-1, 5, 7).is_err());
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_earliest_batch_of_three() {
    let product = Product::new("p1", "Feta", "Dairy", created_at())
        .with_batch(Batch::new("b1", "p1", day(2025, 3, 1), created_at()))
        .with_batch(Batch::new("b2", "p1", day(2025, 1, 15), created_at()))
        .with_batch(Batch::new("b3", "p1", day(2025, 2, 10), created_at()));

    assert_eq!(product.earliest_expiry(), Some(day(2025, 1, 15)));
    let view = aggregate(&product, day(2025, 1, 1), 7);
    assert_eq!(view.earliest_batch.map(|b| b.id.as_str()), Some("b2"));
}

#[test]
fn test_total_quantity_is_sum_with_unknown_as_zero() {
    let product = Product::new("p1", "Feta", "Dairy", created_at())
        .with_batch(Batch::new("b1", "p1", day(2025, 3, 1), created_at()).with_quantity(7))
        .with_batch(Batch::new("b2", "p1", day(2025, 3, 2), created_at()))
        .with_batch(Batch::new("b3", "p1", day(2025, 3, 3), created_at()).with_quantity(5));

    assert_eq!(product.total_quantity(), 12);
    assert_eq!(aggregate(&product, reference(), 7).total_quantity, 12);
}

#[test]
fn test_aggregate_snapshot_product() {
    let products = snapshot();
    let bagels = products.iter().find(|p| p.id.as_str() == "bagels").unwrap();

    let view = aggregate(bagels, reference(), Thresholds::default().expiring_soon_days());
    assert_eq!(view.earliest_batch.map(|b| b.id.as_str()), Some("g1"));
    assert_eq!(view.total_quantity, 18);
    assert_eq!(view.expired_batch_count, 0);
    assert_eq!(view.expiring_batch_count, 1);
}

#[test]
fn test_aggregate_without_batches() {
    let products = snapshot();
    let draft = products.iter().find(|p| p.id.as_str() == "draft").unwrap();

    let view = aggregate(draft, reference(), 7);
    assert!(!view.has_expiry());
    assert_eq!(view.total_quantity, 0);
    assert_eq!(view.expired_batch_count, 0);
}
