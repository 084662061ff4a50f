//! Sort & paginate, plus the status badge counters.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::filter::{FilterCriteria, product_status};
use crate::types::{ExpiryStatus, ParseError, Product, StatusFilter, Thresholds};

/// Column the product list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Case-insensitive product name.
    Name,
    /// Case-insensitive category label.
    Category,
    /// Earliest batch expiry; products without batches sort last.
    #[default]
    ExpiryDate,
    /// Same ordering as [`SortField::ExpiryDate`].
    Status,
    /// Aggregate quantity across batches.
    Quantity,
}

impl SortField {
    /// Parse a field name, falling back to [`SortField::ExpiryDate`].
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Category => write!(f, "category"),
            Self::ExpiryDate => write!(f, "expiry_date"),
            Self::Status => write!(f, "status"),
            Self::Quantity => write!(f, "quantity"),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "expiry_date" | "expirydate" | "expiry-date" | "expiry" => Ok(Self::ExpiryDate),
            "status" => Ok(Self::Status),
            "quantity" | "qty" => Ok(Self::Quantity),
            _ => Err(ParseError::SortField(s.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending (A to Z, soonest first).
    #[default]
    Asc,
    /// Exact reverse of ascending.
    Desc,
}

impl SortDirection {
    /// Parse a direction, falling back to [`SortDirection::Asc`].
    #[must_use]
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ascending: Ordering) -> Ordering {
        match self {
            Self::Asc => ascending,
            Self::Desc => ascending.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseError::SortDirection(s.to_owned())),
        }
    }
}

/// Sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SortOptions {
    /// Column to sort by.
    pub field: SortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortOptions {
    /// Create sort options.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Build sort options from raw query values, using defaults for anything
    /// unrecognized.
    #[must_use]
    pub fn parse_or_default(field: &str, direction: &str) -> Self {
        Self {
            field: SortField::parse_or_default(field),
            direction: SortDirection::parse_or_default(direction),
        }
    }
}

/// Precomputed ascending sort key.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    // `undetermined` first so missing expiries order after every real date.
    Expiry {
        undetermined: bool,
        date: Option<NaiveDate>,
    },
    Quantity(u64),
}

impl SortKey {
    fn of(product: &Product, field: SortField) -> Self {
        match field {
            SortField::Name => Self::Text(product.name.to_lowercase()),
            SortField::Category => Self::Text(product.category.to_lowercase()),
            SortField::ExpiryDate | SortField::Status => {
                let date = product.earliest_expiry();
                Self::Expiry {
                    undetermined: date.is_none(),
                    date,
                }
            }
            SortField::Quantity => Self::Quantity(product.total_quantity()),
        }
    }
}

/// Sort products with a stable comparator.
///
/// Equal keys keep their input order in both directions; `desc` is the
/// ascending comparison reversed.
pub fn sort_products<'a, I>(products: I, options: SortOptions) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut keyed: Vec<(SortKey, &Product)> = products
        .into_iter()
        .map(|product| (SortKey::of(product, options.field), product))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| options.direction.apply(a.cmp(b)));
    keyed.into_iter().map(|(_, product)| product).collect()
}

/// One page of the sorted product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    /// Products on this page.
    pub items: Vec<&'a Product>,
    /// Requested page number (1-indexed).
    pub page: usize,
    /// Page size used for slicing.
    pub page_size: usize,
    /// `ceil(total_count / page_size)`; 0 when there are no products.
    pub total_pages: usize,
    /// Number of products across all pages.
    pub total_count: usize,
}

impl Page<'_> {
    /// Page count for display: an empty list still shows "page 1 of 1".
    #[must_use]
    pub fn display_total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    /// Whether a later page has items.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Sort products and cut out one page.
///
/// Pages are 1-indexed. A page outside `1..=total_pages` comes back empty
/// rather than failing; callers reset to page 1 when criteria change. A page
/// size of 0 is treated as 1.
pub fn sort_and_page<'a, I>(
    products: I,
    options: SortOptions,
    page: usize,
    page_size: usize,
) -> Page<'a>
where
    I: IntoIterator<Item = &'a Product>,
{
    let page_size = page_size.max(1);
    let sorted = sort_products(products, options);
    let total_count = sorted.len();
    let total_pages = total_count.div_ceil(page_size);

    let items: Vec<&Product> = match page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
    {
        Some(start) => sorted.into_iter().skip(start).take(page_size).collect(),
        None => Vec::new(),
    };

    tracing::debug!(
        field = %options.field,
        direction = %options.direction,
        page,
        page_size,
        total_count,
        returned = items.len(),
        "paged products"
    );

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_count,
    }
}

/// Counts behind the "All / Expired / Expiring soon / Good" badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Products within the date range, including those without batches.
    pub all: usize,
    /// Products whose earliest batch is expired.
    pub expired: usize,
    /// Products whose earliest batch is expiring soon.
    pub expiring_soon: usize,
    /// Products whose earliest batch is good.
    pub good: usize,
}

impl StatusCounts {
    /// Badge value for a status filter.
    #[must_use]
    pub const fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Expired => self.expired,
            StatusFilter::ExpiringSoon => self.expiring_soon,
            StatusFilter::Good => self.good,
        }
    }

    fn record(&mut self, status: Option<ExpiryStatus>) {
        self.all += 1;
        match status {
            Some(ExpiryStatus::Expired) => self.expired += 1,
            Some(ExpiryStatus::ExpiringSoon) => self.expiring_soon += 1,
            Some(ExpiryStatus::Good) => self.good += 1,
            None => {}
        }
    }
}

/// Compute badge counts.
///
/// Only the date range of `criteria` applies; the remaining products are
/// then bucketed by status. The active status filter is ignored, so switching
/// filters never moves the badges.
pub fn status_counts<'a, I>(
    products: I,
    criteria: &FilterCriteria,
    reference: NaiveDate,
    thresholds: &Thresholds,
) -> StatusCounts
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|product| criteria.matches_date_range(product))
        .fold(StatusCounts::default(), |mut counts, product| {
            counts.record(product_status(product, reference, thresholds));
            counts
        })
}
