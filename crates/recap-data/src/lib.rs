//! Data pipeline for the recap dashboard.
//!
//! Responsible for fetching the staff recap sheets, normalizing their rows
//! into records, aggregating net units per month and staff member, and
//! reshaping the result for table and chart display.

pub mod aggregator;
pub mod analysis;
pub mod normalizer;
pub mod shaper;
pub mod source;

pub use recap_core as core;
