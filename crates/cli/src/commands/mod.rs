//! Command implementations.
//!
//! Each command returns its output as a string; `main` writes it to stdout.

pub mod digest;
pub mod list;
pub mod show;
