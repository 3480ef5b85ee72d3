use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{Bucket, ALL_BUCKETS};

/// Date format used in the recap sheets.
pub const SHEET_DATE_FORMAT: &str = "%m/%d/%Y";

/// Date format used for display and date-bucket matching.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Earliest month offered in the date picker.
pub const FIRST_BUCKET: Bucket = Bucket {
    year: 2023,
    month: 3,
};

fn bucket_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{4})$").expect("regex is valid"))
}

// ── Sheet dates ───────────────────────────────────────────────────────────────

/// Parse a sheet date cell (`MM/DD/YYYY`, surrounding whitespace ignored).
///
/// Returns `None` for empty or unrecognised values.
pub fn parse_sheet_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, SHEET_DATE_FORMAT).ok()
}

/// Format `date` as `DD/MM/YYYY`.
pub fn to_day_month_year(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

// ── Buckets ───────────────────────────────────────────────────────────────────

/// Parse a `M/YYYY` (or `MM/YYYY`) bucket string.
pub fn parse_bucket(s: &str) -> Option<Bucket> {
    let caps = bucket_regex().captures(s.trim())?;
    let month: u32 = caps[1].parse().ok()?;
    let year: i32 = caps[2].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(Bucket::new(year, month))
}

/// Every selectable bucket from [`FIRST_BUCKET`] through the month of
/// `today`, inclusive.
///
/// When `today` precedes the first bucket only the first bucket is returned.
pub fn bucket_range(today: NaiveDate) -> Vec<Bucket> {
    let last = Bucket::of(today);
    let mut buckets = vec![FIRST_BUCKET];
    let mut current = FIRST_BUCKET;
    while current < last {
        current = current.next();
        buckets.push(current);
    }
    buckets
}

/// Date picker options: `"All"` followed by [`bucket_range`] as `M/YYYY`.
pub fn bucket_catalog(today: NaiveDate) -> Vec<String> {
    std::iter::once(ALL_BUCKETS.to_string())
        .chain(bucket_range(today).into_iter().map(|b| b.to_string()))
        .collect()
}
