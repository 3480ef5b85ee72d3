//! Terminal UI layer for the recap dashboard.
//!
//! Provides themes, record/summary tables, the month-to-month PnL chart, a
//! plain-text report, and the blocking application loop built on top of
//! [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod plain_view;
pub mod table_view;
pub mod themes;

pub use recap_core as core;
