//! CLI error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::email::RenderError;
use crate::input::InputError;

/// Errors surfaced by `shelf-cli` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Output serialization failed.
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// No product in the snapshot has the requested id.
    #[error("Product not found: {0}")]
    UnknownProduct(String),
}
