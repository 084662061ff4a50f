//! Date-aware search term parsing.
//!
//! A search box term is tried as a date first, in this order:
//! 1. ISO `YYYY-MM-DD`
//! 2. US `M/D/YYYY` or `MM/DD/YYYY`
//! 3. A looser set of written formats (`March 15, 2025`, `15 Mar 2025`,
//!    `2025/03/15`, RFC 3339 timestamps), only for terms longer than
//!    [`MIN_LOOSE_DATE_LEN`] characters so short product codes stay text.
//!
//! Anything that isn't a date is matched as case-insensitive text.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::types::Product;

/// Terms this short or shorter are never run through the loose date formats.
pub const MIN_LOOSE_DATE_LEN: usize = 5;

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("Invalid regex"));

static US_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("Invalid regex"));

const LOOSE_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
    "%a %b %d %Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%Y.%m.%d",
];

const LOOSE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// A parsed search box term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Match products whose earliest batch expires on this day.
    Date(NaiveDate),
    /// Case-insensitive substring match. Stored lowercased.
    Text(String),
}

impl SearchTerm {
    /// Parse a raw search box value.
    ///
    /// Returns `None` for an empty or whitespace-only term.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            return None;
        }
        Some(parse_search_date(term).map_or_else(|| Self::Text(term.to_lowercase()), Self::Date))
    }

    /// Check a product against this term.
    ///
    /// Date terms compare against the earliest batch's expiry; products
    /// without batches never match. Text terms look at the name, the
    /// category, and every batch number.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Date(date) => product.earliest_expiry() == Some(*date),
            Self::Text(needle) => {
                contains_ignore_case(&product.name, needle)
                    || contains_ignore_case(&product.category, needle)
                    || product.batches.iter().any(|batch| {
                        batch
                            .batch_number
                            .as_deref()
                            .is_some_and(|number| contains_ignore_case(number, needle))
                    })
            }
        }
    }
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Try all three date strategies on a search term.
#[must_use]
pub fn parse_search_date(raw: &str) -> Option<NaiveDate> {
    let term = raw.trim();
    parse_iso(term)
        .or_else(|| parse_us(term))
        .or_else(|| parse_loose(term))
}

/// Parse a date-range bound.
///
/// Accepts ISO and US dates. Anything else, including an empty string, means
/// "no bound".
#[must_use]
pub fn parse_date_bound(raw: &str) -> Option<NaiveDate> {
    let term = raw.trim();
    parse_iso(term).or_else(|| parse_us(term))
}

fn parse_iso(term: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE_RE.captures(term)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_us(term: &str) -> Option<NaiveDate> {
    let caps = US_DATE_RE.captures(term)?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    // Rejects 2/30/2025 and friends.
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_loose(term: &str) -> Option<NaiveDate> {
    if term.chars().count() <= MIN_LOOSE_DATE_LEN {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(term) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(term) {
        return Some(dt.date_naive());
    }

    LOOSE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(term, fmt).ok())
        .or_else(|| {
            LOOSE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(term, fmt).ok())
                .map(|dt| dt.date())
        })
}
