//! Shelf Life Core - Expiry classification and batch aggregation engine.
//!
//! This crate provides the domain types and the pure computations behind the
//! Shelf Life inventory tracker. It is shared by:
//! - `shelf-life-cli` - Loads product snapshots and renders list pages,
//!   detail panels, and alert/report emails
//! - Scheduled email jobs, which run the same functions for a fixed date
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no clock reads. Every classification takes an explicit reference
//! date, so the same code serves live rendering and scheduled email jobs that
//! run at a different instant.
//!
//! # Modules
//!
//! - [`types`] - Products, batches, type-safe IDs, statuses, and thresholds
//! - [`expiry`] - Freshness classifier, batch aggregator, filter pipeline,
//!   sort & paginate, and alert/report digests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod expiry;
pub mod types;

pub use expiry::*;
pub use types::*;
