//! Wide/long reshaping of monthly results for charting.
//!
//! [`MonthlyGrid`] is the dense month × staff layout (missing pairs are 0);
//! its long form is one [`SeriesPoint`] per cell.

use std::collections::HashMap;

use recap_core::models::{Bucket, MonthlySummary, SeriesPoint};
use serde::Serialize;

/// Dense month × staff grid of net units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyGrid {
    /// Months in ascending order.
    pub buckets: Vec<Bucket>,
    /// Staff names in first-seen order.
    pub entities: Vec<String>,
    /// `values[b][e]` is the net for `buckets[b]` and `entities[e]`.
    pub values: Vec<Vec<f64>>,
}

impl MonthlyGrid {
    /// Pivot monthly summaries to the wide layout, filling gaps with 0.
    ///
    /// Staff columns follow `entity_order`; names missing from it come after,
    /// in first-seen order. Names without any summary get no column.
    pub fn from_summaries(summaries: &[MonthlySummary], entity_order: &[String]) -> Self {
        let mut buckets: Vec<Bucket> = summaries.iter().map(|s| s.bucket).collect();
        buckets.sort();
        buckets.dedup();

        let present = |name: &String| summaries.iter().any(|s| s.entity_name == *name);
        let mut entities: Vec<String> = Vec::new();
        for name in entity_order.iter().filter(|n| present(n)) {
            if !entities.contains(name) {
                entities.push(name.clone());
            }
        }
        for s in summaries {
            if !entities.contains(&s.entity_name) {
                entities.push(s.entity_name.clone());
            }
        }

        let mut values = vec![vec![0.0; entities.len()]; buckets.len()];
        let bucket_idx: HashMap<Bucket, usize> =
            buckets.iter().enumerate().map(|(i, b)| (*b, i)).collect();

        for s in summaries {
            let b = bucket_idx[&s.bucket];
            if let Some(e) = entities.iter().position(|name| *name == s.entity_name) {
                values[b][e] += s.net_units;
            }
        }

        Self {
            buckets,
            entities,
            values,
        }
    }

    /// One point per grid cell, month-major then staff order.
    pub fn to_long(&self) -> Vec<SeriesPoint> {
        let mut points = Vec::with_capacity(self.buckets.len() * self.entities.len());
        for (b, bucket) in self.buckets.iter().enumerate() {
            let date = bucket.start();
            for (e, entity) in self.entities.iter().enumerate() {
                points.push(SeriesPoint {
                    date,
                    entity_name: entity.clone(),
                    net_units: self.values[b][e],
                });
            }
        }
        points
    }

    /// Rebuild a grid from its long form (inverse of [`to_long`](Self::to_long)).
    pub fn from_long(points: &[SeriesPoint]) -> Self {
        let mut buckets: Vec<Bucket> = Vec::new();
        let mut entities: Vec<String> = Vec::new();
        for p in points {
            let bucket = Bucket::of(p.date.date());
            if !buckets.contains(&bucket) {
                buckets.push(bucket);
            }
            if !entities.contains(&p.entity_name) {
                entities.push(p.entity_name.clone());
            }
        }
        buckets.sort();

        let mut values = vec![vec![0.0; entities.len()]; buckets.len()];
        for p in points {
            let bucket = Bucket::of(p.date.date());
            let b = buckets.iter().position(|x| *x == bucket);
            let e = entities.iter().position(|x| *x == p.entity_name);
            if let (Some(b), Some(e)) = (b, e) {
                values[b][e] = p.net_units;
            }
        }

        Self {
            buckets,
            entities,
            values,
        }
    }

    /// Net units for every staff member in one month.
    pub fn row(&self, bucket: Bucket) -> Option<&[f64]> {
        let idx = self.buckets.iter().position(|b| *b == bucket)?;
        Some(&self.values[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() || self.entities.is_empty()
    }
}

/// Reshape monthly summaries into the dense long series used by the chart,
/// with staff in `entity_order` within each month.
pub fn reshape(summaries: &[MonthlySummary], entity_order: &[String]) -> Vec<SeriesPoint> {
    MonthlyGrid::from_summaries(summaries, entity_order).to_long()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
