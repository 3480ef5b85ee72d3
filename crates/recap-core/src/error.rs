use thiserror::Error;

/// Message shown when the staff or date selection is too small to run.
pub const SELECTION_HINT: &str =
    "Please select at least one staff member and at least 2 dates or All.";

/// All errors produced by the recap dashboard.
#[derive(Error, Debug)]
pub enum RecapError {
    /// A remote sheet could not be fetched (transport failure or HTTP error).
    #[error("Failed to fetch sheet for {source_name}: {reason}")]
    Connectivity { source_name: String, reason: String },

    /// A record's date cell did not match `MM/DD/YYYY`.
    #[error("Invalid date {value:?} for {entity} (row {row})")]
    MalformedDate {
        entity: String,
        value: String,
        row: usize,
    },

    /// The staff / date selection cannot be aggregated.
    #[error("Insufficient selection: {0}")]
    InsufficientSelection(String),

    /// A staff name is not present in the source catalog.
    #[error("Unknown staff member: {0}")]
    UnknownEntity(String),

    /// A date selection is neither `"All"` nor a `M/YYYY` bucket.
    #[error("Invalid date bucket: {0}")]
    InvalidBucket(String),

    /// A fetched row does not have the fixed record width.
    #[error("Row {row} has {found} columns, expected {expected}")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The CSV export could not be decoded.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// How an error is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connectivity,
    MalformedDate,
    InsufficientSelection,
    Generic,
}

impl RecapError {
    /// Classify this error for display.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecapError::Connectivity { .. } => ErrorCategory::Connectivity,
            RecapError::MalformedDate { .. } => ErrorCategory::MalformedDate,
            RecapError::InsufficientSelection(_) => ErrorCategory::InsufficientSelection,
            _ => ErrorCategory::Generic,
        }
    }

    /// Text that replaces the dashboard output when a run fails.
    pub fn user_message(&self) -> String {
        match self {
            RecapError::Connectivity { reason, .. } => format!(
                "This dashboard requires internet access.\nConnection error: {}",
                reason
            ),
            RecapError::InsufficientSelection(msg) => msg.clone(),
            other => format!(
                "Failed to fetch data. Please check the Google Sheet URL.\n{}",
                other
            ),
        }
    }
}

/// Convenience alias used throughout the recap crates.
pub type Result<T> = std::result::Result<T, RecapError>;
