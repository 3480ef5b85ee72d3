//! Net-unit aggregation by staff member and month.

use std::collections::{BTreeMap, HashMap};

use recap_core::error::Result;
use recap_core::models::{Bucket, EntityTotals, FilterCriteria, MonthlySummary, Record};
use serde::Serialize;
use tracing::debug;

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Everything derived from one filter selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregation {
    /// Records that passed the staff and month filter, in input order.
    pub filtered: Vec<Record>,
    /// Net units per (month, staff) pair that has at least one record.
    /// Sorted by month, then staff selection order.
    pub monthly: Vec<MonthlySummary>,
    /// Per-staff totals in selection order.
    pub totals: Vec<EntityTotals>,
}

// ── RecapAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that filters records and groups them by month and staff.
pub struct RecapAggregator;

impl RecapAggregator {
    /// Filter `records` by `criteria` and compute the monthly and total views.
    ///
    /// Fails with `InsufficientSelection` when `criteria` selects no staff or
    /// fewer than two explicit months.
    pub fn aggregate(records: &[Record], criteria: &FilterCriteria) -> Result<Aggregation> {
        criteria.validate()?;

        let filtered = Self::filter(records, criteria);
        let monthly = Self::monthly_net(&filtered, criteria);
        let totals = Self::entity_totals(&filtered, &monthly, criteria);

        debug!(
            "Aggregated {} of {} records into {} monthly rows for {} staff",
            filtered.len(),
            records.len(),
            monthly.len(),
            totals.len()
        );

        Ok(Aggregation {
            filtered,
            monthly,
            totals,
        })
    }

    /// Keep records whose staff member is selected and whose `DD/MM/YYYY`
    /// date contains one of the selected month strings.
    pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
        records
            .iter()
            .filter(|r| {
                criteria.includes_entity(&r.entity_name)
                    && criteria.buckets.matches(&r.display_date())
            })
            .cloned()
            .collect()
    }

    /// Number of records per staff member, including rows with no net value.
    pub fn count_bets(records: &[Record]) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.entity_name.as_str()).or_default() += 1;
        }
        counts
    }

    /// Sum net units per (month, staff member); missing values count as 0.
    pub fn monthly_net(records: &[Record], criteria: &FilterCriteria) -> Vec<MonthlySummary> {
        // Keyed by rank so the BTreeMap yields selection order within a month.
        let mut map: BTreeMap<(Bucket, usize, &str), f64> = BTreeMap::new();

        for record in records {
            let key = (
                record.bucket(),
                criteria.entity_rank(&record.entity_name),
                record.entity_name.as_str(),
            );
            *map.entry(key).or_insert(0.0) += record.units_won_lost.unwrap_or(0.0);
        }

        map.into_iter()
            .map(|((bucket, _, name), net_units)| MonthlySummary {
                bucket,
                entity_name: name.to_string(),
                net_units,
            })
            .collect()
    }

    /// Join per-staff monthly sums with bet counts.
    pub fn entity_totals(
        records: &[Record],
        monthly: &[MonthlySummary],
        criteria: &FilterCriteria,
    ) -> Vec<EntityTotals> {
        let counts = Self::count_bets(records);

        let mut totals: Vec<EntityTotals> = counts
            .into_iter()
            .map(|(name, total_bets)| EntityTotals {
                entity_name: name.to_string(),
                total_net_units: monthly
                    .iter()
                    .filter(|m| m.entity_name == name)
                    .map(|m| m.net_units)
                    .sum(),
                total_bets,
            })
            .collect();

        totals.sort_by(|a, b| {
            criteria
                .entity_rank(&a.entity_name)
                .cmp(&criteria.entity_rank(&b.entity_name))
                .then_with(|| a.entity_name.cmp(&b.entity_name))
        });
        totals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use recap_core::error::RecapError;
    use recap_core::models::BucketSelection;

    fn make_record(name: &str, date: &str, units: Option<f64>) -> Record {
        Record {
            entity_name: name.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            play: "play".to_string(),
            odds: "-110".to_string(),
            units_risked: Some(1.0),
            result: "W".to_string(),
            units_won_lost: units,
        }
    }

    fn criteria(entities: &[&str], buckets: BucketSelection) -> FilterCriteria {
        FilterCriteria::new(entities.iter().map(|s| s.to_string()).collect(), buckets)
    }

    fn explicit(buckets: &[&str]) -> BucketSelection {
        BucketSelection::Explicit(buckets.iter().map(|s| s.to_string()).collect())
    }

    fn scenario() -> Vec<Record> {
        vec![
            make_record("E1", "2023-03-01", Some(2.0)),
            make_record("E1", "2023-03-15", Some(-1.0)),
            make_record("E2", "2023-04-01", Some(5.0)),
        ]
    }

    // ── aggregate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_scenario_all_buckets() {
        let agg = RecapAggregator::aggregate(
            &scenario(),
            &criteria(&["E1", "E2"], BucketSelection::All),
        )
        .unwrap();

        assert_eq!(
            agg.monthly,
            vec![
                MonthlySummary {
                    bucket: Bucket::new(2023, 3),
                    entity_name: "E1".into(),
                    net_units: 1.0,
                },
                MonthlySummary {
                    bucket: Bucket::new(2023, 4),
                    entity_name: "E2".into(),
                    net_units: 5.0,
                },
            ]
        );
        assert_eq!(
            agg.totals,
            vec![
                EntityTotals {
                    entity_name: "E1".into(),
                    total_net_units: 1.0,
                    total_bets: 2,
                },
                EntityTotals {
                    entity_name: "E2".into(),
                    total_net_units: 5.0,
                    total_bets: 1,
                },
            ]
        );
        assert_eq!(agg.filtered.len(), 3);
    }

    #[test]
    fn test_rejects_single_explicit_bucket() {
        let err = RecapAggregator::aggregate(&scenario(), &criteria(&["E1"], explicit(&["3/2023"])))
            .unwrap_err();
        assert!(matches!(err, RecapError::InsufficientSelection(_)));
    }

    #[test]
    fn test_rejects_empty_entities() {
        let err = RecapAggregator::aggregate(&scenario(), &criteria(&[], BucketSelection::All))
            .unwrap_err();
        assert!(matches!(err, RecapError::InsufficientSelection(_)));
    }

    #[test]
    fn test_totals_entities_are_selection_intersect_present() {
        // E3 is selected but has no data; E2 has data but is not selected.
        let agg = RecapAggregator::aggregate(
            &scenario(),
            &criteria(&["E3", "E1"], BucketSelection::All),
        )
        .unwrap();
        let names: Vec<&str> = agg.totals.iter().map(|t| t.entity_name.as_str()).collect();
        assert_eq!(names, vec!["E1"]);
        assert!(agg.filtered.iter().all(|r| r.entity_name == "E1"));
    }

    #[test]
    fn test_null_units_count_as_bets_not_units() {
        let records = vec![
            make_record("E1", "2023-03-01", None),
            make_record("E1", "2023-03-02", None),
        ];
        let agg =
            RecapAggregator::aggregate(&records, &criteria(&["E1"], BucketSelection::All)).unwrap();

        assert_eq!(agg.totals.len(), 1);
        assert_eq!(agg.totals[0].total_bets, 2);
        assert_eq!(agg.totals[0].total_net_units, 0.0);
        assert_eq!(agg.monthly.len(), 1);
        assert_eq!(agg.monthly[0].net_units, 0.0);
    }

    #[test]
    fn test_explicit_buckets_filter() {
        let mut records = scenario();
        records.push(make_record("E1", "2023-05-10", Some(3.0)));

        let agg = RecapAggregator::aggregate(
            &records,
            &criteria(&["E1", "E2"], explicit(&["3/2023", "5/2023"])),
        )
        .unwrap();

        assert_eq!(agg.filtered.len(), 3);
        let buckets: Vec<String> = agg.monthly.iter().map(|m| m.bucket.to_string()).collect();
        assert_eq!(buckets, vec!["3/2023", "5/2023"]);
        assert_eq!(agg.totals.len(), 1);
        assert_eq!(agg.totals[0].total_net_units, 4.0);
        assert_eq!(agg.totals[0].total_bets, 3);
    }

    #[test]
    fn test_bucket_substring_over_match_is_kept() {
        // "1/2023" is contained in "dd/11/2023" as well as "dd/01/2023".
        let records = vec![
            make_record("E1", "2023-01-05", Some(1.0)),
            make_record("E1", "2023-11-05", Some(2.0)),
            make_record("E1", "2023-02-05", Some(4.0)),
        ];
        let agg = RecapAggregator::aggregate(
            &records,
            &criteria(&["E1"], explicit(&["1/2023", "6/2023"])),
        )
        .unwrap();

        assert_eq!(agg.filtered.len(), 2);
        assert_eq!(agg.totals[0].total_net_units, 3.0);
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_sorted_by_bucket_then_selection_order() {
        let records = vec![
            make_record("A", "2024-01-03", Some(1.0)),
            make_record("B", "2023-12-03", Some(1.0)),
            make_record("A", "2023-12-04", Some(1.0)),
            make_record("B", "2024-01-04", Some(1.0)),
        ];
        let agg =
            RecapAggregator::aggregate(&records, &criteria(&["B", "A"], BucketSelection::All))
                .unwrap();

        let keys: Vec<(String, &str)> = agg
            .monthly
            .iter()
            .map(|m| (m.bucket.to_string(), m.entity_name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("12/2023".to_string(), "B"),
                ("12/2023".to_string(), "A"),
                ("1/2024".to_string(), "B"),
                ("1/2024".to_string(), "A"),
            ]
        );
        let totals: Vec<&str> = agg.totals.iter().map(|t| t.entity_name.as_str()).collect();
        assert_eq!(totals, vec!["B", "A"]);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let records = vec![
            make_record("E2", "2023-04-01", Some(5.0)),
            make_record("E1", "2023-03-01", Some(2.0)),
        ];
        let filtered =
            RecapAggregator::filter(&records, &criteria(&["E1", "E2"], BucketSelection::All));
        assert_eq!(filtered[0].entity_name, "E2");
        assert_eq!(filtered[1].entity_name, "E1");
    }

    #[test]
    fn test_count_bets() {
        let records = scenario();
        let counts = RecapAggregator::count_bets(&records);
        assert_eq!(counts.get("E1"), Some(&2));
        assert_eq!(counts.get("E2"), Some(&1));
    }

    #[test]
    fn test_empty_records() {
        let agg =
            RecapAggregator::aggregate(&[], &criteria(&["E1"], BucketSelection::All)).unwrap();
        assert!(agg.filtered.is_empty());
        assert!(agg.monthly.is_empty());
        assert!(agg.totals.is_empty());
    }
}
