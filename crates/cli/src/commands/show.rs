//! `show` command: one product with its batch rollup.

use chrono::NaiveDate;
use serde::Serialize;

use shelf_life_core::{
    AggregateView, Classification, ExpiryStatus, Product, aggregate, product_status,
};

use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    product: &'a Product,
    reference: NaiveDate,
    status: Option<ExpiryStatus>,
    /// Classification of the earliest batch.
    classification: Option<Classification>,
    aggregate: AggregateView<'a>,
}

/// Look up a product and encode its aggregate view.
///
/// # Errors
///
/// Returns [`CliError::UnknownProduct`] if no product has `product_id`, or an
/// error if the output can't be encoded.
pub fn run(
    products: &[Product],
    product_id: &str,
    reference: NaiveDate,
    config: &CliConfig,
) -> Result<String, CliError> {
    let product = products
        .iter()
        .find(|product| product.id.as_str() == product_id)
        .ok_or_else(|| CliError::UnknownProduct(product_id.to_string()))?;

    let view = aggregate(product, reference, config.thresholds.expiring_soon_days());
    let output = ShowOutput {
        product,
        reference,
        status: product_status(product, reference, &config.thresholds),
        classification: view
            .earliest_batch
            .map(|batch| config.thresholds.classify(reference, batch.expiry_date)),
        aggregate: view,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
