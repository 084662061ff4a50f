//! Configurable day thresholds for freshness classification.

use serde::{Deserialize, Serialize};

use super::status::{ExpiryStatus, Tier};

/// Errors that can occur when building a [`Thresholds`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    /// A threshold is below zero.
    #[error("{name} must not be negative (got {value})")]
    Negative {
        /// Which threshold.
        name: &'static str,
        /// Rejected value.
        value: i64,
    },
    /// The urgent window is wider than the warning window.
    #[error("urgent_days ({urgent}) must not exceed warning_days ({warning})")]
    UrgentAfterWarning {
        /// Urgent window in days.
        urgent: i64,
        /// Warning window in days.
        warning: i64,
    },
}

/// Day thresholds for both freshness conventions.
///
/// - Tier scale: `expired < 0 <= urgent <= urgent_days < warning <= warning_days < ok`
/// - Status scale: `expired < 0 <= expiring-soon <= expiring_soon_days < good`
///
/// Defaults are 3 / 7 for the tier scale and 7 for the status scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct Thresholds {
    urgent_days: i64,
    warning_days: i64,
    expiring_soon_days: i64,
}

#[derive(Deserialize)]
struct RawThresholds {
    urgent_days: i64,
    warning_days: i64,
    expiring_soon_days: i64,
}

impl TryFrom<RawThresholds> for Thresholds {
    type Error = ThresholdError;

    fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.urgent_days, raw.warning_days, raw.expiring_soon_days)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            urgent_days: Self::DEFAULT_URGENT_DAYS,
            warning_days: Self::DEFAULT_WARNING_DAYS,
            expiring_soon_days: Self::DEFAULT_EXPIRING_SOON_DAYS,
        }
    }
}

impl Thresholds {
    /// Default upper bound of the urgent tier.
    pub const DEFAULT_URGENT_DAYS: i64 = 3;
    /// Default upper bound of the warning tier.
    pub const DEFAULT_WARNING_DAYS: i64 = 7;
    /// Default upper bound of the expiring-soon status.
    pub const DEFAULT_EXPIRING_SOON_DAYS: i64 = 7;

    /// Build a validated threshold set.
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold is negative or if `urgent_days`
    /// exceeds `warning_days`.
    pub const fn new(
        urgent_days: i64,
        warning_days: i64,
        expiring_soon_days: i64,
    ) -> Result<Self, ThresholdError> {
        if urgent_days < 0 {
            return Err(ThresholdError::Negative {
                name: "urgent_days",
                value: urgent_days,
            });
        }
        if warning_days < 0 {
            return Err(ThresholdError::Negative {
                name: "warning_days",
                value: warning_days,
            });
        }
        if expiring_soon_days < 0 {
            return Err(ThresholdError::Negative {
                name: "expiring_soon_days",
                value: expiring_soon_days,
            });
        }
        if urgent_days > warning_days {
            return Err(ThresholdError::UrgentAfterWarning {
                urgent: urgent_days,
                warning: warning_days,
            });
        }
        Ok(Self {
            urgent_days,
            warning_days,
            expiring_soon_days,
        })
    }

    /// Upper bound (inclusive) of the urgent tier.
    #[must_use]
    pub const fn urgent_days(&self) -> i64 {
        self.urgent_days
    }

    /// Upper bound (inclusive) of the warning tier.
    #[must_use]
    pub const fn warning_days(&self) -> i64 {
        self.warning_days
    }

    /// Upper bound (inclusive) of the expiring-soon status.
    #[must_use]
    pub const fn expiring_soon_days(&self) -> i64 {
        self.expiring_soon_days
    }

    /// Map a signed day count onto the four-step tier scale.
    #[must_use]
    pub const fn tier(&self, days_until: i64) -> Tier {
        if days_until < 0 {
            Tier::Expired
        } else if days_until <= self.urgent_days {
            Tier::Urgent
        } else if days_until <= self.warning_days {
            Tier::Warning
        } else {
            Tier::Ok
        }
    }

    /// Map a signed day count onto the three-step status scale.
    #[must_use]
    pub const fn status(&self, days_until: i64) -> ExpiryStatus {
        if days_until < 0 {
            ExpiryStatus::Expired
        } else if days_until <= self.expiring_soon_days {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Good
        }
    }
}
