//! Raw row → [`Record`] conversion.
//!
//! Numeric cells are coerced leniently (bad values become `None`), while a bad
//! date is fatal for the whole run.

use recap_core::error::{RecapError, Result};
use recap_core::models::{RawRow, Record, RECORD_COLUMNS};
use recap_core::time_utils::parse_sheet_date;
use tracing::debug;

/// Marker appended to unit amounts in the sheets (e.g. `"2.5u"`).
pub const UNITS_MARKER: char = 'u';

/// Number of positional fields in a normalized row.
pub const RECORD_WIDTH: usize = RECORD_COLUMNS.len();

/// Normalize fetched rows into records, preserving order.
///
/// Fails on the first row that is too short or has an unparsable date.
/// Fields past the record width are ignored.
pub fn normalize(rows: &[RawRow]) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(rows.len());
    let mut null_units = 0usize;

    for (idx, row) in rows.iter().enumerate() {
        let record = normalize_row(idx, row)?;
        if record.units_won_lost.is_none() {
            null_units += 1;
        }
        records.push(record);
    }

    debug!(
        "Normalized {} rows ({} with non-numeric units won/lost)",
        records.len(),
        null_units
    );

    Ok(records)
}

/// Strip the units marker and parse the remainder as a number.
///
/// Returns `None` instead of failing for anything non-numeric.
pub fn coerce_units(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != UNITS_MARKER).collect();
    parse_number(&cleaned)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn normalize_row(idx: usize, row: &RawRow) -> Result<Record> {
    let [name, date, play, odds, risked, result, won_lost, ..] = row.fields.as_slice() else {
        return Err(RecapError::SchemaMismatch {
            row: idx,
            expected: RECORD_WIDTH,
            found: row.fields.len(),
        });
    };

    let parsed_date = parse_sheet_date(date).ok_or_else(|| RecapError::MalformedDate {
        entity: name.clone(),
        value: date.clone(),
        row: idx,
    })?;

    Ok(Record {
        entity_name: name.clone(),
        date: parsed_date,
        play: play.trim().to_string(),
        odds: odds.trim().to_string(),
        units_risked: parse_number(risked),
        result: result.trim().to_string(),
        units_won_lost: coerce_units(won_lost),
    })
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(fields: &[&str]) -> RawRow {
        RawRow {
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample_rows() -> Vec<RawRow> {
        vec![
            raw(&["Caleb", "03/01/2023", "Lakers ML", "-110", "1", "W", "2u"]),
            raw(&["Caleb", "03/15/2023", "Over 210", "+100", "1", "L", "-1u"]),
            raw(&["Yous", "04/01/2023", "Chiefs -3", "-105", "", "P", "push"]),
        ]
    }

    // ── coerce_units ──────────────────────────────────────────────────────────

    #[test]
    fn test_coerce_units_strips_marker() {
        assert_eq!(coerce_units("12u"), Some(12.0));
        assert_eq!(coerce_units("-3.5u"), Some(-3.5));
        assert_eq!(coerce_units("+0.91u"), Some(0.91));
    }

    #[test]
    fn test_coerce_units_plain_numbers() {
        assert_eq!(coerce_units("4"), Some(4.0));
        assert_eq!(coerce_units(" 1.5 "), Some(1.5));
    }

    #[test]
    fn test_coerce_units_embedded_marker() {
        assert_eq!(coerce_units("1u0"), Some(10.0));
    }

    #[test]
    fn test_coerce_units_non_numeric_is_none() {
        assert_eq!(coerce_units("abc"), None);
        assert_eq!(coerce_units(""), None);
        assert_eq!(coerce_units("u"), None);
        assert_eq!(coerce_units("nan"), None);
        assert_eq!(coerce_units("1,000u"), None);
    }

    // ── normalize ─────────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_maps_fields() {
        let records = normalize(&sample_rows()).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.entity_name, "Caleb");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        assert_eq!(first.play, "Lakers ML");
        assert_eq!(first.odds, "-110");
        assert_eq!(first.units_risked, Some(1.0));
        assert_eq!(first.result, "W");
        assert_eq!(first.units_won_lost, Some(2.0));
    }

    #[test]
    fn test_normalize_keeps_rows_with_bad_units() {
        let records = normalize(&sample_rows()).unwrap();
        let push = &records[2];
        assert_eq!(push.entity_name, "Yous");
        assert_eq!(push.units_won_lost, None);
        assert_eq!(push.units_risked, None);
    }

    #[test]
    fn test_normalize_preserves_order() {
        let records = normalize(&sample_rows()).unwrap();
        let dates: Vec<String> = records.iter().map(|r| r.display_date()).collect();
        assert_eq!(dates, vec!["01/03/2023", "15/03/2023", "01/04/2023"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let rows = sample_rows();
        assert_eq!(normalize(&rows).unwrap(), normalize(&rows).unwrap());
    }

    #[test]
    fn test_normalize_date_round_trip() {
        let records = normalize(&[raw(&["Caleb", "03/15/2023", "", "", "", "", "1u"])]).unwrap();
        assert_eq!(records[0].display_date(), "15/03/2023");
        assert_eq!(records[0].bucket().to_string(), "3/2023");
    }

    #[test]
    fn test_normalize_bad_date_aborts() {
        let mut rows = sample_rows();
        rows.insert(1, raw(&["Serbian", "Week 3", "x", "x", "1", "W", "1u"]));

        let err = normalize(&rows).unwrap_err();
        match err {
            RecapError::MalformedDate { entity, value, row } => {
                assert_eq!(entity, "Serbian");
                assert_eq!(value, "Week 3");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_empty_date_aborts() {
        let err = normalize(&[raw(&["Caleb", "", "a", "b", "1", "W", "1u"])]).unwrap_err();
        assert!(matches!(err, RecapError::MalformedDate { .. }));
    }

    #[test]
    fn test_normalize_wrong_width() {
        let err = normalize(&[raw(&["Caleb", "03/01/2023", "a"])]).unwrap_err();
        assert!(matches!(
            err,
            RecapError::SchemaMismatch {
                row: 0,
                expected: 7,
                found: 3
            }
        ));
    }

    #[test]
    fn test_normalize_ignores_extra_fields() {
        let row = raw(&["Caleb", "03/01/2023", "a", "b", "1", "W", "2u", "note"]);
        let records = normalize(&[row]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].units_won_lost, Some(2.0));
        assert_eq!(records[0].result, "W");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert!(normalize(&[]).unwrap().is_empty());
    }
}
