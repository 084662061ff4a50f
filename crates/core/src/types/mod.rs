//! Core types for Shelf Life.
//!
//! This module provides the product/batch records and the type-safe wrappers
//! used by the expiry engine.

pub mod id;
pub mod product;
pub mod status;
pub mod threshold;

pub use id::*;
pub use product::{Batch, Product};
pub use status::*;
pub use threshold::{ThresholdError, Thresholds};
