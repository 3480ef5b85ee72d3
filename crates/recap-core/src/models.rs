use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{RecapError, Result, SELECTION_HINT};

/// Literal selection value meaning "no date filter".
pub const ALL_BUCKETS: &str = "All";

/// Column headers of a normalized record, in positional order.
pub const RECORD_COLUMNS: [&str; 7] = [
    "Name",
    "Date",
    "Play",
    "Odds",
    "Units Risked",
    "Result",
    "Units Won/Lost",
];

/// One remote tabular feed: a sheet fetch key plus the staff member it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// URL-encoded sheet name used to build the export URL.
    pub key: String,
    /// Display name attached to every row of this sheet.
    pub name: String,
}

impl Source {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// A fetched row before normalization.
///
/// `fields[0]` is the staff name; the remaining fields are the sheet cells,
/// truncated or padded to the configured width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub fields: Vec<String>,
}

impl RawRow {
    /// Name of the staff member this row was fetched for.
    pub fn entity_name(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }
}

/// A calendar year-month grouping unit, displayed as `M/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bucket {
    pub year: i32,
    pub month: u32,
}

impl Bucket {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Bucket containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The following calendar month.
    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// First instant of the month, used as the chart x-coordinate.
    pub fn start(self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

impl FromStr for Bucket {
    type Err = RecapError;

    fn from_str(s: &str) -> Result<Self> {
        crate::time_utils::parse_bucket(s).ok_or_else(|| RecapError::InvalidBucket(s.to_string()))
    }
}

/// One normalized betting record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub entity_name: String,
    pub date: NaiveDate,
    pub play: String,
    pub odds: String,
    pub units_risked: Option<f64>,
    pub result: String,
    /// Net units; `None` when the sheet cell was not numeric.
    pub units_won_lost: Option<f64>,
}

impl Record {
    /// Date as `DD/MM/YYYY`, the form date filters match against.
    pub fn display_date(&self) -> String {
        crate::time_utils::to_day_month_year(self.date)
    }

    pub fn bucket(&self) -> Bucket {
        Bucket::of(self.date)
    }
}

/// Which months a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketSelection {
    All,
    /// Raw bucket strings, matched as substrings of `DD/MM/YYYY` dates.
    Explicit(Vec<String>),
}

impl BucketSelection {
    /// Build a selection from UI date strings. `"All"` anywhere wins.
    pub fn from_strings<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.iter().any(|v| v.as_ref() == ALL_BUCKETS) {
            return Ok(BucketSelection::All);
        }
        let mut buckets = Vec::with_capacity(values.len());
        for value in values {
            let value = value.as_ref().trim();
            value.parse::<Bucket>()?;
            buckets.push(value.to_string());
        }
        Ok(BucketSelection::Explicit(buckets))
    }

    /// Whether a `DD/MM/YYYY` date string passes this selection.
    pub fn matches(&self, day_month_year: &str) -> bool {
        match self {
            BucketSelection::All => true,
            BucketSelection::Explicit(buckets) => {
                buckets.iter().any(|b| day_month_year.contains(b.as_str()))
            }
        }
    }
}

/// Staff and month selection for one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected staff names, in selection order, without repeats.
    pub entities: Vec<String>,
    pub buckets: BucketSelection,
}

impl FilterCriteria {
    /// Repeated staff names collapse to their first occurrence.
    pub fn new(entities: Vec<String>, buckets: BucketSelection) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(entities.len());
        for name in entities {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            entities: unique,
            buckets,
        }
    }

    /// Reject selections with no staff, or fewer than two explicit months.
    pub fn validate(&self) -> Result<()> {
        if self.entities.is_empty() {
            return Err(RecapError::InsufficientSelection(SELECTION_HINT.to_string()));
        }
        if let BucketSelection::Explicit(buckets) = &self.buckets {
            if buckets.len() < 2 {
                return Err(RecapError::InsufficientSelection(
                    "Please select at least 2 dates or All.".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn includes_entity(&self, name: &str) -> bool {
        self.entities.iter().any(|e| e == name)
    }

    /// Position of `name` in the selection, used for stable ordering.
    pub fn entity_rank(&self, name: &str) -> usize {
        self.entities
            .iter()
            .position(|e| e == name)
            .unwrap_or(usize::MAX)
    }
}

/// Net units for one staff member in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub bucket: Bucket,
    pub entity_name: String,
    pub net_units: f64,
}

/// Totals for one staff member across the filtered window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTotals {
    pub entity_name: String,
    pub total_net_units: f64,
    pub total_bets: usize,
}

/// One point of the long-form chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// First instant of the month.
    pub date: NaiveDateTime,
    pub entity_name: String,
    pub net_units: f64,
}
