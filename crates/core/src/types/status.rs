//! Freshness statuses and the filters built on them.
//!
//! Two bucket schemes coexist:
//! - [`Tier`] - the four-step scale used to style alert emails
//! - [`ExpiryStatus`] - the three-step scale behind list filters and badges

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing filter and sort options.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown status filter name.
    #[error("invalid status filter: {0}")]
    StatusFilter(String),
    /// Unknown sort field name.
    #[error("invalid sort field: {0}")]
    SortField(String),
    /// Unknown sort direction.
    #[error("invalid sort direction: {0}")]
    SortDirection(String),
}

/// Four-step freshness tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Already past its expiry date.
    Expired,
    /// Expires within the urgent window.
    Urgent,
    /// Expires within the warning window.
    Warning,
    /// Nothing to worry about yet.
    Ok,
}

impl Tier {
    /// Whether this tier should show up in an alert.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        !matches!(self, Self::Ok)
    }

    /// Stable lowercase name, suitable for CSS classes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-step expiry status used by list filters and badge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    /// Past its expiry date.
    Expired,
    /// Expires today or within `expiring_soon_days`.
    ExpiringSoon,
    /// Further out than the expiring-soon window.
    Good,
}

impl ExpiryStatus {
    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::ExpiringSoon => "expiring-soon",
            Self::Good => "good",
        }
    }
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter selected in the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// No filtering; includes products without batches.
    #[default]
    All,
    /// Earliest batch is expired.
    Expired,
    /// Earliest batch is expiring soon.
    ExpiringSoon,
    /// Earliest batch is good.
    Good,
}

impl StatusFilter {
    /// Check a product's status against this filter.
    ///
    /// `None` means the product's expiry can't be determined; such products
    /// only pass [`StatusFilter::All`].
    #[must_use]
    pub fn matches(self, status: Option<ExpiryStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Expired => status == Some(ExpiryStatus::Expired),
            Self::ExpiringSoon => status == Some(ExpiryStatus::ExpiringSoon),
            Self::Good => status == Some(ExpiryStatus::Good),
        }
    }

    /// Parse a filter name, falling back to [`StatusFilter::All`].
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Expired => write!(f, "expired"),
            Self::ExpiringSoon => write!(f, "expiring-soon"),
            Self::Good => write!(f, "good"),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "expired" => Ok(Self::Expired),
            "expiring-soon" | "expiring_soon" | "expiringsoon" => Ok(Self::ExpiringSoon),
            "good" => Ok(Self::Good),
            _ => Err(ParseError::StatusFilter(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!("expired".parse::<StatusFilter>().unwrap(), StatusFilter::Expired);
        assert_eq!(
            "expiring-soon".parse::<StatusFilter>().unwrap(),
            StatusFilter::ExpiringSoon
        );
        assert_eq!(
            "Expiring_Soon".parse::<StatusFilter>().unwrap(),
            StatusFilter::ExpiringSoon
        );
        assert!(matches!(
            "stale".parse::<StatusFilter>(),
            Err(ParseError::StatusFilter(_))
        ));
    }

    #[test]
    fn test_status_filter_parse_or_default() {
        assert_eq!(StatusFilter::parse_or_default("bogus"), StatusFilter::All);
        assert_eq!(StatusFilter::parse_or_default("good"), StatusFilter::Good);
    }

    #[test]
    fn test_undetermined_only_matches_all() {
        assert!(StatusFilter::All.matches(None));
        assert!(!StatusFilter::Expired.matches(None));
        assert!(!StatusFilter::ExpiringSoon.matches(None));
        assert!(!StatusFilter::Good.matches(None));
    }

    #[test]
    fn test_display_roundtrip() {
        for filter in [
            StatusFilter::All,
            StatusFilter::Expired,
            StatusFilter::ExpiringSoon,
            StatusFilter::Good,
        ] {
            assert_eq!(filter.to_string().parse::<StatusFilter>().unwrap(), filter);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&ExpiryStatus::ExpiringSoon).unwrap(),
            "\"expiring-soon\""
        );
        assert_eq!(serde_json::to_string(&Tier::Urgent).unwrap(), "\"urgent\"");
    }
}
