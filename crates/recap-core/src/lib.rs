//! Shared domain layer for the recap dashboard.
//!
//! Holds the record and summary models, the error taxonomy, the fixed sheet
//! catalog, date/bucket helpers, display formatting and CLI settings.

pub mod catalog;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
