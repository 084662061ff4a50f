//! Product snapshot loading.
//!
//! Snapshots are JSON or YAML files holding either a bare list of products or
//! an object with a `products` list. Records written by the old single-batch
//! forms (flat `expiry_date` / `quantity` / `batch_number` on the product)
//! are translated here into one-batch products; the core model only knows
//! batch lists.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use shelf_life_core::{Batch, BatchId, Product, ProductId};

/// Errors that can occur when loading a snapshot.
#[derive(Debug, Error)]
pub enum InputError {
    /// File could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON did not match the product schema.
    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML did not match the product schema.
    #[error("Invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither JSON nor YAML.
    #[error("Unsupported snapshot format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Wrapped { products: Vec<ProductRecord> },
    List(Vec<ProductRecord>),
}

impl SnapshotFile {
    fn into_records(self) -> Vec<ProductRecord> {
        match self {
            Self::Wrapped { products } | Self::List(products) => products,
        }
    }
}

/// A product as stored, in either the batch-list or the legacy flat shape.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    category: String,
    #[serde(default)]
    supplier: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    barcode: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    batches: Vec<Batch>,
    // Legacy flat fields.
    #[serde(default)]
    expiry_date: Option<NaiveDate>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    batch_number: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let mut batches = record.batches;

        // Batch lists win; flat fields only describe products that have none.
        if let (true, Some(expiry_date)) = (batches.is_empty(), record.expiry_date) {
            batches.push(Batch {
                id: BatchId::new(format!("{}-legacy", record.id)),
                product_id: record.id.clone(),
                batch_number: record.batch_number,
                expiry_date,
                quantity: record.quantity,
                created_at: record.created_at,
            });
        }

        Self {
            id: record.id,
            name: record.name,
            category: record.category,
            supplier: record.supplier,
            location: record.location,
            notes: record.notes,
            barcode: record.barcode,
            created_at: record.created_at,
            batches,
        }
    }
}

fn into_products(file: SnapshotFile) -> Vec<Product> {
    file.into_records().into_iter().map(Product::from).collect()
}

/// Parse a JSON snapshot.
///
/// # Errors
///
/// Returns an error if the document doesn't match the snapshot schema.
pub fn parse_json(raw: &str) -> Result<Vec<Product>, InputError> {
    Ok(into_products(serde_json::from_str(raw)?))
}

/// Parse a YAML snapshot.
///
/// # Errors
///
/// Returns an error if the document doesn't match the snapshot schema.
pub fn parse_yaml(raw: &str) -> Result<Vec<Product>, InputError> {
    Ok(into_products(serde_yaml::from_str(raw)?))
}

/// Load a snapshot file, picking the format from its extension.
///
/// # Errors
///
/// Returns an error if the file can't be read, has an unknown extension, or
/// doesn't match the snapshot schema.
pub fn load_products(path: &Path) -> Result<Vec<Product>, InputError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let parse: fn(&str) -> Result<Vec<Product>, InputError> = match extension.as_str() {
        "json" => parse_json,
        "yaml" | "yml" => parse_yaml,
        _ => return Err(InputError::UnsupportedFormat(path.display().to_string())),
    };

    let raw = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let products = parse(&raw)?;

    tracing::info!(
        path = %path.display(),
        products = products.len(),
        batches = products.iter().map(|p| p.batches.len()).sum::<usize>(),
        "Loaded product snapshot"
    );
    Ok(products)
}
