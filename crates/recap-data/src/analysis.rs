//! Main pipeline for the recap dashboard.
//!
//! Validates the selection, fetches the chosen sheets, normalizes and
//! aggregates their rows, and returns a [`DashboardResult`] ready for the UI
//! layer.

use std::time::Instant;

use chrono::Utc;
use recap_core::catalog::SourceCatalog;
use recap_core::error::{RecapError, Result, SELECTION_HINT};
use recap_core::models::{
    BucketSelection, EntityTotals, FilterCriteria, MonthlySummary, Record, SeriesPoint,
};
use serde::Serialize;
use tracing::info;

use crate::aggregator::RecapAggregator;
use crate::normalizer::normalize;
use crate::shaper::reshape;
use crate::source::{fetch_sources, FeedFetcher};

// ── Public types ──────────────────────────────────────────────────────────────

/// What the user picked: staff names and raw date strings (`M/YYYY` or `"All"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub staff: Vec<String>,
    pub dates: Vec<String>,
}

impl Selection {
    pub fn new(staff: Vec<String>, dates: Vec<String>) -> Self {
        Self { staff, dates }
    }

    /// Convert to validated [`FilterCriteria`].
    ///
    /// An empty staff list is reported before any date string is inspected.
    pub fn criteria(&self) -> Result<FilterCriteria> {
        if self.staff.is_empty() {
            return Err(RecapError::InsufficientSelection(SELECTION_HINT.to_string()));
        }
        let criteria = FilterCriteria::new(
            self.staff.clone(),
            BucketSelection::from_strings(&self.dates)?,
        );
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Metadata produced alongside the dashboard result.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of sheets fetched.
    pub sources_fetched: usize,
    /// Rows returned by the sheets after header and blank-row removal.
    pub rows_fetched: usize,
    /// Records left after the staff/month filter.
    pub records_filtered: usize,
    /// Filtered records whose units won/lost was not numeric.
    pub null_units: usize,
    /// Wall-clock seconds spent fetching sheets.
    pub fetch_time_seconds: f64,
    /// Wall-clock seconds spent normalizing, aggregating and reshaping.
    pub transform_time_seconds: f64,
}

/// The complete output of [`run_dashboard`].
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResult {
    /// Filtered records for the record table.
    pub records: Vec<Record>,
    /// Net units per month and staff member.
    pub monthly: Vec<MonthlySummary>,
    /// Summary table rows.
    pub totals: Vec<EntityTotals>,
    /// Dense long-form series for the chart.
    pub series: Vec<SeriesPoint>,
    pub metadata: DashboardMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline for one selection.
///
/// 1. Validate the selection (no network access when it is insufficient).
/// 2. Resolve staff names to sheets via `catalog`.
/// 3. Fetch, normalize, aggregate and reshape.
///
/// Any failure aborts the run; no partial result is returned.
pub fn run_dashboard(
    fetcher: &dyn FeedFetcher,
    catalog: &SourceCatalog,
    selection: &Selection,
    truncate_width: usize,
) -> Result<DashboardResult> {
    let criteria = selection.criteria()?;
    let sources = catalog.select(&criteria.entities)?;

    // ── Step 1: Fetch ─────────────────────────────────────────────────────────
    let fetch_start = Instant::now();
    let rows = fetch_sources(fetcher, &sources, truncate_width)?;
    let fetch_time = fetch_start.elapsed().as_secs_f64();
    info!(
        "Fetched {} rows from {} sheets in {:.2}s",
        rows.len(),
        sources.len(),
        fetch_time
    );

    // ── Step 2: Normalize, aggregate, reshape ─────────────────────────────────
    let transform_start = Instant::now();
    let records = normalize(&rows)?;
    let aggregation = RecapAggregator::aggregate(&records, &criteria)?;
    let series = reshape(&aggregation.monthly, &criteria.entities);
    let transform_time = transform_start.elapsed().as_secs_f64();

    let null_units = aggregation
        .filtered
        .iter()
        .filter(|r| r.units_won_lost.is_none())
        .count();

    info!(
        "Kept {} of {} records ({} without units) across {} months",
        aggregation.filtered.len(),
        records.len(),
        null_units,
        aggregation
            .monthly
            .iter()
            .map(|m| m.bucket)
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    );

    let metadata = DashboardMetadata {
        generated_at: Utc::now().to_rfc3339(),
        sources_fetched: sources.len(),
        rows_fetched: rows.len(),
        records_filtered: aggregation.filtered.len(),
        null_units,
        fetch_time_seconds: fetch_time,
        transform_time_seconds: transform_time,
    };

    Ok(DashboardResult {
        records: aggregation.filtered,
        monthly: aggregation.monthly,
        totals: aggregation.totals,
        series,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
