//! Command implementations for the CLI
//!
//! - report: Print the per-company cost report
//! - prices: List the configured price table
//! - config: Configuration display and validation

pub mod config;
pub mod prices;
pub mod report;
