//! `list` command: filter, sort and page a snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use shelf_life_core::{
    FilterCriteria, Page, Product, SortOptions, StatusCounts, filter_products, sort_and_page,
    status_counts,
};

use crate::config::CliConfig;
use crate::error::CliError;

/// Raw list options as typed on the command line.
///
/// Values are lenient: anything unrecognized falls back to its default.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: usize,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    page: Page<'a>,
    badges: StatusCounts,
}

/// Run the product list pipeline and encode the page with its badges.
///
/// # Errors
///
/// Returns an error if the output can't be encoded.
pub fn run(
    products: &[Product],
    args: &ListArgs,
    reference: NaiveDate,
    config: &CliConfig,
) -> Result<String, CliError> {
    let criteria = FilterCriteria::from_raw(
        args.search.as_deref(),
        args.status.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
    );
    let options = SortOptions::parse_or_default(
        args.sort.as_deref().unwrap_or_default(),
        args.dir.as_deref().unwrap_or_default(),
    );

    let matched = filter_products(products, &criteria, reference, &config.thresholds);
    let page = sort_and_page(
        matched,
        options,
        args.page,
        args.page_size.unwrap_or(config.page_size),
    );
    let badges = status_counts(products, &criteria, reference, &config.thresholds);

    tracing::info!(
        total = page.total_count,
        page = page.page,
        pages = page.display_total_pages(),
        "Listed products"
    );

    Ok(serde_json::to_string_pretty(&ListOutput { page, badges })?)
}
