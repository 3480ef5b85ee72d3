//! Plain-text rendering of a dashboard result for non-interactive output.
//!
//! Column widths are measured with [`unicode_width`] so staff names and plays
//! containing wide characters still line up.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use recap_core::formatting;
use recap_core::models::{Bucket, RECORD_COLUMNS};
use recap_data::analysis::DashboardResult;
use recap_data::shaper::MonthlyGrid;

use crate::table_view::{grand_total, record_cells, summary_cells, SUMMARY_COLUMNS};

const COLUMN_GAP: &str = "  ";

fn pad(cell: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(cell);
    let mut s = String::with_capacity(cell.len() + width.saturating_sub(w));
    s.push_str(cell);
    s.extend(std::iter::repeat(' ').take(width.saturating_sub(w)));
    s
}

/// Format `rows` under `headers` as left-aligned, width-padded text.
///
/// Trailing whitespace is trimmed from each line.
pub fn format_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let w = UnicodeWidthStr::width(cell.as_ref());
            match widths.get_mut(i) {
                Some(cur) => *cur = (*cur).max(w),
                None => widths.push(w),
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let joined = cells
            .iter()
            .enumerate()
            .map(|(i, c)| pad(c, widths[i]))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        joined.trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule_width: usize =
        widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(|c| c.as_ref()).collect()));
        out.push('\n');
    }
    out
}

/// Render the whole dashboard: records, summary and the monthly PnL grid.
pub fn render_report(result: &DashboardResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "List of Selected Staff and Dates ({})",
        result.records.len()
    );
    if result.records.is_empty() {
        out.push_str("No bets match the selected staff and dates\n");
    } else {
        let rows: Vec<Vec<String>> = result
            .records
            .iter()
            .map(|r| record_cells(r).to_vec())
            .collect();
        out.push_str(&format_table(&RECORD_COLUMNS, &rows));
    }
    out.push('\n');

    out.push_str("Summary Over Selected Period\n");
    let mut rows: Vec<Vec<String>> = result
        .totals
        .iter()
        .map(|t| summary_cells(t).to_vec())
        .collect();
    let (units, bets) = grand_total(&result.totals);
    rows.push(vec![
        "TOTAL".to_string(),
        formatting::format_units(units),
        bets.to_string(),
    ]);
    out.push_str(&format_table(&SUMMARY_COLUMNS, &rows));
    out.push('\n');

    out.push_str("Month-to-month PnL (Units)\n");
    out.push_str(&render_monthly_grid(&MonthlyGrid::from_long(&result.series)));

    out
}

/// One line per month with a column per staff member.
pub fn render_monthly_grid(grid: &MonthlyGrid) -> String {
    if grid.is_empty() {
        return "No monthly data\n".to_string();
    }
    let mut headers: Vec<&str> = vec!["Month"];
    headers.extend(grid.entities.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = grid
        .buckets
        .iter()
        .zip(&grid.values)
        .map(|(bucket, values): (&Bucket, &Vec<f64>)| {
            let mut row = vec![bucket.to_string()];
            row.extend(values.iter().map(|v| formatting::format_units(*v)));
            row
        })
        .collect();

    format_table(&headers, &rows)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
