//! Freshness classifier.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::types::{ExpiryStatus, Thresholds, Tier};

/// Result of classifying one expiry date against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Signed day count from reference to target; negative means past.
    pub days_until: i64,
    /// Four-step freshness tier.
    pub tier: Tier,
}

/// Calendar day of an instant, in the instant's own time zone.
///
/// This is the midnight normalization applied before any day arithmetic: two
/// instants on the same local calendar day map to the same date.
#[must_use]
pub fn reference_day<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

/// Whole days from `reference` to `target`.
///
/// Both sides are calendar dates, so the difference is always an exact number
/// of days. A target on the reference day yields 0.
#[must_use]
pub fn days_until(reference: NaiveDate, target: NaiveDate) -> i64 {
    target.signed_duration_since(reference).num_days()
}

/// Classify `target` against `reference` with the default thresholds.
#[must_use]
pub fn classify(reference: NaiveDate, target: NaiveDate) -> Classification {
    Thresholds::default().classify(reference, target)
}

impl Thresholds {
    /// Classify `target` against `reference` on the four-step tier scale.
    #[must_use]
    pub fn classify(&self, reference: NaiveDate, target: NaiveDate) -> Classification {
        let days_until = days_until(reference, target);
        Classification {
            days_until,
            tier: self.tier(days_until),
        }
    }

    /// Three-step status of `target` relative to `reference`.
    #[must_use]
    pub fn status_of(&self, reference: NaiveDate, target: NaiveDate) -> ExpiryStatus {
        self.status(days_until(reference, target))
    }
}
